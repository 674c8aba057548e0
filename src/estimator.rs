//! F0 estimator maintains a bounded random sample of the distinct elements
//! seen so far and is configured with two parameters:
//! - `epsilon`: relative-error bound of the estimate, in (0, 1).
//! - `delta`: probability that the error bound fails to hold, in (0, 1).
//!
//! # Algorithm
//!
//! Every incoming item is first evicted from the sample (a repeated value is
//! re-sampled from scratch rather than kept for certain), then re-admitted
//! with the current retention probability `p`. Whenever the sample grows to
//! the configured threshold, a thinning round discards each survivor with an
//! independent fair coin and halves `p`, repeating until the sample is back
//! below the threshold. The distinct count is then estimated as `|X| / p`
//! where `X` is the sample set.
//!
//! The threshold `ceil(12 / ε² · ln(8·L / δ))` is derived from the accuracy
//! parameters and a caller-supplied bound `L` on the stream length, which
//! gives the estimate its (ε, δ) guarantee: with probability at least
//! `1 - δ` it lies within relative error `ε` of the true distinct count.
//!
//! # State
//!
//! - The sample set is a `HashSet` keyed by `wyhash`, never holding more
//!   than `threshold - 1` elements between calls.
//! - The retention probability is tracked as a halving counter `k` with
//!   `p = 2^-k`, so the probability schedule is exactly the power-of-two
//!   ladder `1, 1/2, 1/4, ...` with no accumulated rounding error. Past
//!   `k = 1074` the value `2^-k` is below the smallest positive `f64` and
//!   the probability is reported as zero, which ends this estimator's
//!   useful life.
//! - All randomness flows through an injected [`RandomSource`], one uniform
//!   draw per admission decision and one per survivor per thinning round.

use std::collections::HashSet;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasherDefault, Hash};
use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wyhash::WyHash;

use crate::error::{ConfigurationError, EstimationError};
use crate::random::RandomSource;
use crate::threshold::sample_threshold;

/// Halvings past this count round `2^-k` to zero in `f64`.
const MAX_HALVINGS: u32 = 1074;

/// Retained survivors of random sampling.
type SampleSet<T> = HashSet<T, BuildHasherDefault<WyHash>>;

/// Streaming estimator for the number of distinct elements (`F0`).
///
/// `T` is the stream element type; `S` supplies uniform random draws and
/// defaults to an entropy-seeded [`StdRng`].
pub struct F0Estimator<T, S: RandomSource = StdRng> {
    /// Relative-error bound of the estimate.
    epsilon: f64,
    /// Probability that the error bound fails to hold.
    delta: f64,
    /// Current sample of distinct elements.
    sample: SampleSet<T>,
    /// Number of times the retention probability has been halved.
    halvings: u32,
    /// Maximum sample size; `None` until `set_threshold` succeeds.
    threshold: Option<NonZeroUsize>,
    /// Injected source of uniform draws in `[0, 1)`.
    source: S,
}

impl<T> F0Estimator<T, StdRng> {
    /// Create an estimator with accuracy `epsilon` and confidence `delta`,
    /// drawing randomness from an entropy-seeded generator.
    ///
    /// Returns a [`ConfigurationError`] unless both parameters lie in the
    /// open interval (0, 1).
    pub fn new(epsilon: f64, delta: f64) -> Result<Self, ConfigurationError> {
        Self::with_random_source(epsilon, delta, StdRng::from_entropy())
    }
}

impl<T, S: RandomSource> F0Estimator<T, S> {
    /// Create an estimator drawing randomness from `source`.
    ///
    /// Every `rand` generator is a valid source; supplying a seeded or
    /// scripted one makes the estimator fully deterministic.
    pub fn with_random_source(
        epsilon: f64,
        delta: f64,
        source: S,
    ) -> Result<Self, ConfigurationError> {
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(ConfigurationError::InvalidEpsilon(epsilon));
        }
        if !(delta > 0.0 && delta < 1.0) {
            return Err(ConfigurationError::InvalidDelta(delta));
        }

        Ok(Self {
            epsilon,
            delta,
            sample: SampleSet::default(),
            halvings: 0,
            threshold: None,
            source,
        })
    }

    /// Derive and store the sample threshold for a stream of at most
    /// `stream_length_bound` items.
    ///
    /// Must be called before the first item is processed. Calling it again
    /// replaces the threshold without revalidating the current sample, so a
    /// mid-stream update only makes sense with a larger bound.
    pub fn set_threshold(&mut self, stream_length_bound: u64) -> Result<(), ConfigurationError> {
        self.threshold = Some(sample_threshold(self.epsilon, self.delta, stream_length_bound)?);
        Ok(())
    }

    /// Return the configured sample threshold, or `None` if it was never set.
    #[inline]
    pub fn threshold(&self) -> Option<usize> {
        self.threshold.map(NonZeroUsize::get)
    }

    /// Return the number of elements currently retained in the sample.
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample.len()
    }

    /// Return the current retention probability, exactly `2^-k` after `k`
    /// halvings, or zero once `2^-k` is no longer representable.
    #[inline]
    pub fn retention_probability(&self) -> f64 {
        if self.halvings > MAX_HALVINGS {
            0.0
        } else {
            f64::exp2(-f64::from(self.halvings))
        }
    }

    /// Return the current estimate of the number of distinct elements
    /// processed so far, `|X| / p`.
    ///
    /// Fails if the threshold was never configured or the retention
    /// probability has underflowed to zero. A successful estimate is always
    /// non-negative; no upper bound is enforced.
    pub fn estimate(&self) -> Result<f64, EstimationError> {
        if self.threshold.is_none() {
            return Err(EstimationError::ThresholdNotSet);
        }
        let probability = self.retention_probability();
        if probability == 0.0 {
            return Err(EstimationError::ProbabilityUnderflow);
        }
        Ok(self.sample.len() as f64 / probability)
    }
}

impl<T: Hash + Eq, S: RandomSource> F0Estimator<T, S> {
    /// Process one stream item.
    ///
    /// The item's previous retention decision, if any, is discarded and the
    /// item is re-admitted with the current retention probability; thinning
    /// rounds then run until the sample is below the threshold again.
    ///
    /// Returns `false` when the estimator cannot continue: the threshold was
    /// never configured, the retention probability has underflowed to zero,
    /// or thinning failed to shrink the sample within the round cap. The
    /// caller should treat `false` as fatal for this instance.
    pub fn process_item(&mut self, item: T) -> bool {
        let Some(threshold) = self.threshold else {
            return false;
        };
        let probability = self.retention_probability();
        if probability == 0.0 {
            return false;
        }

        self.sample.remove(&item);
        if self.source.draw() < probability {
            self.sample.insert(item);
        }

        let max_rounds = max_thinning_rounds(threshold);
        let mut rounds = 0;
        while self.sample.len() == threshold.get() {
            if rounds == max_rounds {
                return false;
            }
            let source = &mut self.source;
            self.sample.retain(|_| source.draw() >= 0.5);
            self.halvings += 1;
            rounds += 1;
        }

        true
    }
}

impl<T, S: RandomSource> Debug for F0Estimator<T, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("F0Estimator")
            .field("sample_size", &self.sample.len())
            .field("retention_probability", &self.retention_probability())
            .field("threshold", &self.threshold())
            .finish()
    }
}

/// Cap on consecutive thinning rounds for one processed item.
///
/// Each round discards about half of the survivors, so a healthy random
/// source empties a full sample within roughly `log2(threshold)` rounds;
/// running an order of magnitude past that means the source is not behaving
/// like one and the update is reported as failed instead of looping.
#[inline]
fn max_thinning_rounds(threshold: NonZeroUsize) -> u32 {
    8 * (threshold.ilog2() + 1) + 8
}
