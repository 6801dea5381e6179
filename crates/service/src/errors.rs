use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Broken store invariant; never shown to callers.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Caller-facing text without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Internal(msg) => msg,
        }
    }
}
