use std::fmt;

/// Represents the different types of errors that can occur while running the
/// inference pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// Error occurred while transforming text into a feature vector
    VectorizerError(String),
    /// Error occurred while running the classification model
    ModelError(String),
    /// Error occurred while encoding or decoding a class label
    LabelError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorizerError(msg) => write!(f, "Vectorizer error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::LabelError(msg) => write!(f, "Label error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}
