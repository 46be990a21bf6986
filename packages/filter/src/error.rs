use folio_common::CommonError;
use thiserror::Error;

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("{filter}: {message}")]
    Node { filter: String, message: String },

    #[error("Malformed node: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("{0}")]
    Other(String),
}

impl FilterError {
    pub fn node(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Node {
            filter: filter.into(),
            message: message.into(),
        }
    }
}

impl From<String> for FilterError {
    fn from(s: String) -> Self {
        FilterError::Other(s)
    }
}

impl From<&str> for FilterError {
    fn from(s: &str) -> Self {
        FilterError::Other(s.to_string())
    }
}
