use {
    meshgen::MeshGenConfig,
    std::{fmt, path::PathBuf, time::Duration},
};

pub const ADDR_ENV: &str = "PHYSIQUE_ADDR";
pub const PYTHON_ENV: &str = "PHYSIQUE_PYTHON";
pub const ENGINE_DIR_ENV: &str = "PHYSIQUE_ENGINE_DIR";
pub const BASE_DIR_ENV: &str = "PHYSIQUE_BASE_DIR";
pub const BATCH_SIZE_ENV: &str = "PHYSIQUE_BATCH_SIZE";
pub const TIMEOUT_ENV: &str = "PHYSIQUE_GENERATE_TIMEOUT_SECS";
pub const MEASUREMENTS_ENV: &str = "PHYSIQUE_INCLUDE_MEASUREMENTS";
pub const LOG_DIR_ENV: &str = "PHYSIQUE_LOG_DIR";

const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, PartialEq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}: {}", self.value, self.var, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Server settings, read once at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    addr: String,
    meshgen: MeshGenConfig,
    include_measurements: bool,
    log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            meshgen: MeshGenConfig::default(),
            include_measurements: false,
            log_dir: None,
        }
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError {
            var,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}

fn parse_timeout(value: &str) -> Result<Option<Duration>, ConfigError> {
    let invalid = || ConfigError {
        var: TIMEOUT_ENV,
        value: value.to_string(),
        reason: "expected a non-negative number of seconds",
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let secs: f64 = trimmed.parse().map_err(|_| invalid())?;
    if secs == 0.0 {
        // Zero means no limit.
        return Ok(None);
    }
    Duration::try_from_secs_f64(secs).map(Some).map_err(|_| invalid())
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut meshgen = MeshGenConfig::default();

        if let Some(addr) = lookup(ADDR_ENV) {
            config.addr = addr;
        }
        if let Some(python) = lookup(PYTHON_ENV) {
            meshgen = meshgen.with_python(python);
        }
        if let Some(dir) = lookup(ENGINE_DIR_ENV) {
            meshgen = meshgen.with_engine_dir(dir);
        }
        if let Some(dir) = lookup(BASE_DIR_ENV).filter(|d| !d.is_empty()) {
            meshgen = meshgen.with_base_dir(Some(PathBuf::from(dir)));
        }
        if let Some(value) = lookup(BATCH_SIZE_ENV) {
            let batch_size = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| ConfigError {
                    var: BATCH_SIZE_ENV,
                    value: value.clone(),
                    reason: "expected a positive integer",
                })?;
            meshgen = meshgen.with_batch_size(batch_size);
        }
        if let Some(value) = lookup(TIMEOUT_ENV) {
            meshgen = meshgen.with_timeout(parse_timeout(&value)?);
        }
        if let Some(value) = lookup(MEASUREMENTS_ENV) {
            config.include_measurements = parse_flag(MEASUREMENTS_ENV, &value)?;
        }
        config.log_dir = lookup(LOG_DIR_ENV).filter(|d| !d.is_empty()).map(PathBuf::from);
        config.meshgen = meshgen;
        Ok(config)
    }

    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    pub fn with_meshgen(mut self, meshgen: MeshGenConfig) -> Self {
        self.meshgen = meshgen;
        self
    }

    /// Put the scalar body measurements into `/analyze` reports.
    pub fn with_include_measurements(mut self, include: bool) -> Self {
        self.include_measurements = include;
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    // Getters
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn meshgen(&self) -> &MeshGenConfig {
        &self.meshgen
    }

    pub fn include_measurements(&self) -> bool {
        self.include_measurements
    }

    pub fn log_dir(&self) -> Option<&std::path::Path> {
        self.log_dir.as_deref()
    }
}
