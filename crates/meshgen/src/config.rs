use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

/// How to reach and drive the external mesh reconstruction program.
#[derive(Clone, Debug)]
pub struct MeshGenConfig {
    python: String,
    engine_dir: PathBuf,
    base_dir: Option<PathBuf>,
    script_name: String,
    batch_size: u32,
    timeout: Option<Duration>,
}

impl Default for MeshGenConfig {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            engine_dir: PathBuf::from("physique_engine/4D-Humans"),
            base_dir: None,
            script_name: "demo.py".to_string(),
            batch_size: 48,
            timeout: None,
        }
    }
}

impl MeshGenConfig {
    /// Set the interpreter used to run the entry script.
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    /// Set the directory holding the pipeline checkout.
    pub fn with_engine_dir(mut self, engine_dir: impl Into<PathBuf>) -> Self {
        self.engine_dir = engine_dir.into();
        self
    }

    /// Anchor for a relative engine directory. `None` uses the directory
    /// holding the running executable.
    pub fn with_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    /// Set the entry script name inside the engine directory.
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Bound the run time of a single generation. `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    // Getters
    pub fn python(&self) -> &str {
        &self.python
    }

    pub fn engine_dir(&self) -> &Path {
        &self.engine_dir
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Entry script location. A relative engine directory resolves against
    /// the base directory, never the current directory.
    pub fn script_path(&self) -> io::Result<PathBuf> {
        let script = self.engine_dir.join(&self.script_name);
        if script.is_absolute() {
            return Ok(script);
        }
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        std::path::absolute(base.join(script))
    }
}

fn executable_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })
}
