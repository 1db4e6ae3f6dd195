use std::fmt;

use super::Stage;

/// A shader compilation or program link failure.
///
/// Both variants carry the compiler's rendered diagnostic text in `log`.
/// Neither is recoverable: callers propagate them to `main`, which reports
/// the diagnostic and exits with a failure status.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile {
        stage: Stage,
        label: String,
        log: String,
    },
    Link {
        label: String,
        log: String,
    },
}

impl ShaderError {
    /// The diagnostic text produced by the compiler or linker.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log, .. } => log,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, label, log } => {
                write!(f, "{stage} shader compilation failed ({label}):\n{log}")
            }
            ShaderError::Link { label, log } => {
                write!(f, "shader program linking failed ({label}):\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}
