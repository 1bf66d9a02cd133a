//! Hard-example replay wrappers.
//!
//! A replay wrapper sits in front of an incremental model and biases its
//! training stream toward the observations the model currently predicts
//! worst. Every hard observation seen so far is ranked by a loss score in
//! a bounded buffer; each training call then either replays a buffered
//! observation (probability `p`) or consumes the fresh one (probability
//! `1 - p`), and re-scores whatever the model was just trained on.
//!
//! # Quick Start
//!
//! ```
//! use repaso::linear_model::OnlineLinearRegression;
//! use repaso::sampling::HardSamplingRegressor;
//!
//! let model = OnlineLinearRegression::new(1);
//! let mut sampler = HardSamplingRegressor::new(model, 30, 0.2)
//!     .unwrap()
//!     .with_seed(42);
//!
//! // y = 2*x + 1
//! for (x, y) in [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)] {
//!     sampler.learn_one(&[x], y).unwrap();
//! }
//! assert!(sampler.buffer_len() <= 30);
//! ```

mod classifier;
mod regressor;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{RepasoError, Result};

pub use classifier::HardSamplingClassifier;
pub use regressor::HardSamplingRegressor;

/// An observation paired with the loss the model incurred predicting it.
///
/// Records are ordered by `loss` alone (see [`by_loss`]); the observation
/// fields play no part in the ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triplet<X, Y> {
    /// Feature vector of the observation.
    pub x: X,
    /// Supervised target of the observation.
    pub y: Y,
    /// Loss score at the time the record was (re-)scored.
    pub loss: f64,
}

/// Comparator ordering records ascending by loss score.
///
/// Uses `total_cmp`, so NaN losses (which the wrappers never admit) would
/// still order consistently.
pub fn by_loss<X, Y>(a: &Triplet<X, Y>, b: &Triplet<X, Y>) -> Ordering {
    a.loss.total_cmp(&b.loss)
}

/// Validate replay hyperparameters at construction time.
pub(crate) fn validate_params(capacity: usize, p: f64) -> Result<()> {
    if capacity == 0 {
        return Err(RepasoError::invalid_hyperparameter(
            "capacity",
            capacity,
            "capacity >= 1",
        ));
    }
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(RepasoError::invalid_hyperparameter(
            "p",
            p,
            "0 <= p <= 1",
        ));
    }
    Ok(())
}
