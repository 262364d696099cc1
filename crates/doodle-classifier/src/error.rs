//! Error types for sketch classification.

use thiserror::Error;

/// Result type for classifier operations.
pub type ClassifyResult<T> = Result<T, ClassifierError>;

/// Errors raised while loading or running the classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Preprocessing failed: {0}")]
    Media(#[from] doodle_media::MediaError),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid labels: {0}")]
    InvalidLabels(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClassifierError {
    /// Create a model not found error.
    pub fn model_not_found(path: impl Into<String>) -> Self {
        Self::ModelNotFound(path.into())
    }

    pub fn invalid_labels(message: impl Into<String>) -> Self {
        Self::InvalidLabels(message.into())
    }

    /// Create an inference failure error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}
