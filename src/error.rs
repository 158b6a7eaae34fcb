//! Error types.
//!
//! Only two kinds of failure reach a caller: a request that names an
//! unsupported format, and a knockout computation that cannot proceed.
//! The packer's fallback is not an error; it always produces a schedule.

use thiserror::Error;

/// Errors raised by fixture generation and knockout computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The format tag is not `round_robin`, `league`, or `knockout`.
    #[error("Unsupported tournament format")]
    UnsupportedFormat(String),

    /// A bracket or round schedule needs at least one venue to rotate through.
    #[error("no venues configured")]
    NoVenues,

    /// A request body could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias for scheduler operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SchedulerError::UnsupportedFormat("swiss".into()).to_string(),
            "Unsupported tournament format"
        );
        assert_eq!(SchedulerError::NoVenues.to_string(), "no venues configured");
        assert_eq!(
            SchedulerError::InvalidRequest("missing field `teams`".into()).to_string(),
            "invalid request: missing field `teams`"
        );
    }
}
