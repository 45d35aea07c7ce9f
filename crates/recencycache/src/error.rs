//! Error types for recencycache

use std::fmt;

/// Result type alias for recencycache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity was zero or negative
    InvalidCapacity(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(got) => {
                write!(f, "Invalid configuration: capacity must be greater than 0 (got {})", got)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        let err = Error::InvalidCapacity(-3);
        let msg = err.to_string();

        assert!(msg.contains("capacity must be greater than 0"));
        assert!(msg.ends_with("(got -3)"));
    }
}
