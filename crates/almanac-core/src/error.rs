use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// An event violates one of its structural invariants.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
