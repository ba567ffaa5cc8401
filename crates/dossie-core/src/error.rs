//! Unified Error Model
use crate::generation::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DossieError {
    /// Task definition defect (bad template, undeclared key). Never retryable.
    #[error("CONFIG/{0}")]
    Configuration(String),

    #[error("GENERATION/{0}")]
    Generation(#[from] GenerationError),

    /// Structured input that failed to parse or validate.
    #[error("VALIDATION/{0}")]
    Validation(String),

    #[error("INPUT/{0}")]
    MissingInput(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),

    #[error("RENDER/{0}")]
    Render(String),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),
}

impl DossieError {
    /// Whether this error comes from task configuration rather than runtime data
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
