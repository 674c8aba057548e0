//! Error types surfaced by the estimator.

use thiserror::Error;

/// Rejected configuration input.
///
/// Raised synchronously at configuration time, before any items are
/// processed. The caller may reconfigure and retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Accuracy parameter outside the open interval (0, 1).
    #[error("accuracy parameter epsilon must be in (0, 1), got {0}")]
    InvalidEpsilon(f64),
    /// Confidence parameter outside the open interval (0, 1).
    #[error("confidence parameter delta must be in (0, 1), got {0}")]
    InvalidDelta(f64),
    /// Stream length bound of zero.
    #[error("stream length bound must be a positive integer")]
    InvalidStreamLengthBound,
    /// The derived sample threshold is not a positive representable integer.
    #[error("derived sample threshold {0} is not a positive integer")]
    InvalidThreshold(f64),
}

/// Failure to produce an estimate.
///
/// Recoverable only by rebuilding the estimator with different parameters
/// or a tighter stream length bound.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// No threshold was ever configured via `set_threshold`.
    #[error("sample threshold was never set")]
    ThresholdNotSet,
    /// The retention probability was halved past the smallest positive `f64`.
    #[error("retention probability underflowed to zero")]
    ProbabilityUnderflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            ConfigurationError::InvalidEpsilon(1.5).to_string(),
            "accuracy parameter epsilon must be in (0, 1), got 1.5"
        );
        assert_eq!(
            ConfigurationError::InvalidDelta(0.0).to_string(),
            "confidence parameter delta must be in (0, 1), got 0"
        );
        assert_eq!(
            EstimationError::ThresholdNotSet.to_string(),
            "sample threshold was never set"
        );
    }
}
