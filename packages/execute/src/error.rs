use folio_common::CommonError;
use thiserror::Error;

/// Why a code or diagram block could not be run.
///
/// Rendered into the error node that replaces the block.
#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("exec block has no language class")]
    NoLanguage,

    #[error("no interpreter configured for '{lang}'")]
    UnknownLanguage { lang: String },

    #[error(transparent)]
    Launch(#[from] CommonError),

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

impl ExecuteError {
    pub fn failed(command: impl Into<String>, status: Option<i32>, stderr: &str) -> Self {
        Self::Failed {
            command: command.into(),
            status: status.map_or_else(|| "signal".to_string(), |code| format!("status {}", code)),
            stderr: stderr.trim().to_string(),
        }
    }
}

pub type ExecuteResult<T> = Result<T, ExecuteError>;
