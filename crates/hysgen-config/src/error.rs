//! Pipeline error taxonomy
//!
//! Validation errors are recoverable: they never leave their owning
//! component and only drive the re-prompt loop. Prompt errors are about the
//! interaction channel itself and do propagate.

use std::path::PathBuf;

/// Rejection of a single raw input value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("port must be an integer value")]
    NotANumber,

    #[error("port can't be below 0")]
    BelowRange,

    #[error("port can't be more than {max}")]
    AboveRange { max: u16 },

    #[error("password must be at least {min} characters, please re-enter")]
    TooShort { min: usize },

    #[error("invalid path: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("please pick one of the listed options")]
    InvalidChoice,
}

/// Failure of the interaction channel, not of the entered value
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input stream closed")]
    Closed,

    #[error("too many invalid attempts")]
    AttemptsExhausted,
}
