//! Derivation of the retained-sample threshold from the accuracy parameters.

use std::num::NonZeroUsize;

use crate::error::ConfigurationError;

/// Compute the maximum retained-sample-set size for accuracy `epsilon`,
/// confidence `delta`, and an upper bound on the number of stream items.
///
/// The threshold follows `ceil(12 / ε² · ln(8·L / δ))`. A larger bound `L`
/// or tighter `epsilon`/`delta` yields a larger sample and therefore more
/// memory; the returned value is the hard cap the sample set is kept under.
///
/// `epsilon` and `delta` are assumed to be already validated into (0, 1),
/// which makes the result strictly positive for every valid bound; the
/// zero/overflow guards below exist so a threshold of zero can never reach
/// the estimator's repair loop, where it would never terminate.
pub(crate) fn sample_threshold(
    epsilon: f64,
    delta: f64,
    stream_length_bound: u64,
) -> Result<NonZeroUsize, ConfigurationError> {
    if stream_length_bound == 0 {
        return Err(ConfigurationError::InvalidStreamLengthBound);
    }

    let raw = 12.0 / (epsilon * epsilon) * (8.0 * stream_length_bound as f64 / delta).ln();
    if !raw.is_finite() || raw > usize::MAX as f64 {
        return Err(ConfigurationError::InvalidThreshold(raw));
    }

    NonZeroUsize::new(raw.ceil() as usize).ok_or(ConfigurationError::InvalidThreshold(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case(0.8, 0.1, 2_000_001 => 355)]
    #[test_case(0.5, 0.5, 10_000 => 576)]
    #[test_case(0.5, 0.5, 50 => 321)]
    #[test_case(0.1, 0.01, 1_000_000 => 24_601)]
    #[test_case(0.99, 0.99, 1 => 26)]
    fn matches_direct_computation(epsilon: f64, delta: f64, bound: u64) -> usize {
        sample_threshold(epsilon, delta, bound).unwrap().get()
    }

    #[test]
    fn grows_with_the_stream_length_bound() {
        let small = sample_threshold(0.5, 0.5, 1_000).unwrap();
        let large = sample_threshold(0.5, 0.5, 1_000_000).unwrap();
        assert!(small < large);
    }

    #[test]
    fn rejects_zero_bound() {
        assert_eq!(
            sample_threshold(0.5, 0.5, 0),
            Err(ConfigurationError::InvalidStreamLengthBound)
        );
    }

    #[test]
    fn rejects_non_finite_threshold() {
        // Degenerate epsilon overflows the formula to infinity; the
        // constructor normally rejects it long before this point.
        assert!(matches!(
            sample_threshold(f64::MIN_POSITIVE, 0.5, 1),
            Err(ConfigurationError::InvalidThreshold(_))
        ));
    }
}
