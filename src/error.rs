use miette::Diagnostic;
use thiserror::Error;

/// Main error type for panotiles operations
#[derive(Error, Diagnostic, Debug)]
pub enum TilesError {
    #[error("IO error: {0}")]
    #[diagnostic(code(panotiles::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(panotiles::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(panotiles::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Environment error: {message}")]
    #[diagnostic(code(panotiles::environment))]
    Environment {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(panotiles::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Tool error: {message}")]
    #[diagnostic(code(panotiles::tool))]
    Tool {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl TilesError {
    /// Wrap an `io::Error` together with the path it happened on.
    pub fn io(path: impl Into<std::path::PathBuf>, action: &str, err: std::io::Error) -> Self {
        TilesError::Io {
            path: path.into(),
            message: format!("{}: {}", action, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, TilesError>;
