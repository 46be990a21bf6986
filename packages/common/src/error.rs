use thiserror::Error;

/// Common error type shared by the folio crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Command `{command}` failed: {message}")]
    Process { command: String, message: String },

    #[error("{0}")]
    Generic(String),
}

impl CommonError {
    pub fn process(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Process {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;
