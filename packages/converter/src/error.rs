use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not run `{command}`: {message}")]
    Launch { command: String, message: String },

    #[error("`{command}` exited with status {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Converter JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No converter output registered for input: {0}")]
    Unsupported(String),
}

impl ConvertError {
    pub fn launch(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Launch {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn failed(command: impl Into<String>, status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            command: command.into(),
            status: status
                .map(|code| code.to_string())
                .unwrap_or_else(|| "signal".to_string()),
            stderr: stderr.into().trim().to_string(),
        }
    }
}
