use std::{fmt, path::PathBuf, process::ExitStatus, time::Duration};

#[derive(Debug)]
pub enum GenerateError {
    ScriptNotFound(PathBuf),
    InputNotFound(PathBuf),
    Io(std::io::Error),
    Spawn {
        program: String,
        source: std::io::Error,
    },
    Failed {
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    Timeout {
        command: String,
        limit: Duration,
    },
}

impl GenerateError {
    /// Text handed back to clients: captured stderr when the program wrote
    /// any, otherwise the error description.
    pub fn detail(&self) -> String {
        match self {
            GenerateError::Failed { stderr, .. } if !stderr.is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the caller supplied a bad request, as opposed to a server-side
    /// failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GenerateError::InputNotFound(_))
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ScriptNotFound(path) => {
                write!(f, "Script not found: {}", path.display())
            }
            GenerateError::InputNotFound(path) => {
                write!(f, "Input folder does not exist: {}", path.display())
            }
            GenerateError::Io(err) => write!(f, "io error: {err}"),
            GenerateError::Spawn { program, source } => {
                write!(f, "failed to start '{program}': {source}")
            }
            GenerateError::Failed {
                command, status, ..
            } => match status.code() {
                Some(code) => write!(
                    f,
                    "Command '{command}' returned non-zero exit status {code}."
                ),
                None => write!(f, "Command '{command}' terminated abnormally ({status})."),
            },
            GenerateError::Timeout { command, limit } => write!(
                f,
                "Command '{command}' timed out after {:.1} seconds",
                limit.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io(err) => Some(err),
            GenerateError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(err: std::io::Error) -> Self {
        GenerateError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
