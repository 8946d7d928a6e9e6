use thiserror::Error;

/// Errors surfaced by the analyzer library.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A count was zero or a range was malformed. The caller must fix its
    /// inputs and call again.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AnalyzerError::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
