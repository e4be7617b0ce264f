use thiserror::Error;

use crate::types::BasketId;

/// Errors raised by basket bookkeeping, mining and input parsing.
#[derive(Debug, Error)]
pub enum AprioriError {
    /// Thresholds are missing or out of range, or there is nothing to mine.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The basket identifier is not tracked by the collection.
    #[error("basket {0} is not in the collection")]
    NotFound(BasketId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AprioriError>;
