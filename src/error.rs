use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HaarSegError {
    #[error("Invalid scale: {scale} exceeds signal length {len}")]
    InvalidScale { scale: usize, len: usize },

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HaarSegError>;

/// Fail with `PreconditionViolation` unless `len` is positive.
pub(crate) fn require_non_empty(len: usize, what: &str) -> Result<()> {
    if len == 0 {
        return Err(HaarSegError::PreconditionViolation(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}

/// Fail with `PreconditionViolation` unless a buffer matches the signal length.
pub(crate) fn require_len(actual: usize, expected: usize, what: &str) -> Result<()> {
    if actual != expected {
        return Err(HaarSegError::PreconditionViolation(format!(
            "{what} has length {actual}, expected {expected}"
        )));
    }
    Ok(())
}
