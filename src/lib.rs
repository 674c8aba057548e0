//! `f0-estimator` is a Rust crate for estimating the number of distinct elements (`F0`)
//! observed in a data stream using memory sublinear in both the stream length and the
//! universe of possible elements.
//!
//! The estimator keeps a bounded random sample of the distinct values seen so far and
//! self-adjusts its retention probability as the sample fills up, yielding an
//! (ε, δ)-approximation: with probability at least `1 - δ` the estimate lies within a
//! relative error of `ε` of the true distinct count.
//!
//! ```
//! use f0_estimator::F0Estimator;
//!
//! let mut estimator = F0Estimator::<u64>::new(0.5, 0.05).unwrap();
//! estimator.set_threshold(1_000).unwrap();
//!
//! for i in 0..1_000u64 {
//!     assert!(estimator.process_item(i % 100));
//! }
//!
//! // 100 distinct values fit below the sample threshold, so the
//! // retention probability never dropped and the estimate is exact.
//! assert_eq!(estimator.estimate().unwrap(), 100.0);
//! ```
mod error;
pub mod estimator;
mod random;
mod threshold;

pub use crate::error::{ConfigurationError, EstimationError};
pub use crate::estimator::F0Estimator;
pub use crate::random::{RandomSource, ScriptedSource};
