//! Guess pipeline error types.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Media error: {0}")]
    Media(#[from] doodle_media::MediaError),

    #[error("Remote model call failed: {0}")]
    RemoteCall(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn remote_call(msg: impl Into<String>) -> Self {
        Self::RemoteCall(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        use doodle_media::MediaError;

        match self {
            AnalysisError::Media(MediaError::Format(_)) => "format",
            AnalysisError::Media(MediaError::TooSmall { .. }) => "too_small",
            AnalysisError::Media(_) => "preprocess",
            AnalysisError::RemoteCall(_) => "remote_call",
            AnalysisError::Config(_) => "config",
        }
    }
}
