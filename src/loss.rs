//! Loss functions used to score how hard an observation is to predict.
//!
//! A higher loss means the current model predicts the observation worse.
//! All losses here are pure, stateless, and non-negative.
//!
//! # Usage
//!
//! ```
//! use repaso::loss::{Absolute, RegressionLoss, Squared};
//!
//! let abs = Absolute;
//! assert_eq!(abs.eval(3.0, 1.0), 2.0);
//!
//! let sq = Squared;
//! assert_eq!(sq.eval(3.0, 1.0), 4.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Probability clamp bound for log-based losses, matching the clamp used
/// by the bundled logistic model.
const EPS: f64 = 1e-15;

/// Criterion scoring a regression prediction against its target.
pub trait RegressionLoss {
    /// Evaluate the loss for one observation. Non-negative; larger = worse.
    fn eval(&self, y_true: f64, y_pred: f64) -> f64;
}

/// Absolute error: `|y_true - y_pred|`.
///
/// Robust to outliers; the default criterion for regression replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absolute;

impl RegressionLoss for Absolute {
    fn eval(&self, y_true: f64, y_pred: f64) -> f64 {
        (y_true - y_pred).abs()
    }
}

/// Squared error: `(y_true - y_pred)^2`.
///
/// Heavily penalizes large errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squared;

impl RegressionLoss for Squared {
    fn eval(&self, y_true: f64, y_pred: f64) -> f64 {
        let diff = y_true - y_pred;
        diff * diff
    }
}

/// Huber loss: quadratic within `delta` of the target, linear beyond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Huber {
    /// Transition point between the quadratic and linear regions.
    pub delta: f64,
}

impl Default for Huber {
    fn default() -> Self {
        Self { delta: 1.0 }
    }
}

impl RegressionLoss for Huber {
    fn eval(&self, y_true: f64, y_pred: f64) -> f64 {
        let diff = (y_true - y_pred).abs();
        if diff <= self.delta {
            0.5 * diff * diff
        } else {
            self.delta * (diff - 0.5 * self.delta)
        }
    }
}

/// Criterion scoring a classification prediction against its target class.
///
/// The variant also fixes which prediction form the score consumes, chosen
/// once at construction of a replay classifier from the wrapped model's
/// declared capability:
///
/// - [`ClassificationLoss::Log`] reads the scalar probability of the
///   positive class (class `1`) — the binary form.
/// - [`ClassificationLoss::CrossEntropy`] reads the full class-probability
///   map — the multiclass form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationLoss {
    /// Binary log loss on the positive-class probability.
    Log,
    /// Multiclass cross-entropy on the full probability map.
    CrossEntropy,
}

impl ClassificationLoss {
    /// Evaluate the loss for one observation given the predicted
    /// class-probability map. A class absent from the map counts as
    /// probability zero (clamped).
    #[must_use]
    pub fn eval(&self, y_true: usize, proba: &BTreeMap<usize, f64>) -> f64 {
        match self {
            ClassificationLoss::Log => {
                let p = proba.get(&1).copied().unwrap_or(0.0);
                let p = p.clamp(EPS, 1.0 - EPS);
                if y_true == 1 {
                    -p.ln()
                } else {
                    -(1.0 - p).ln()
                }
            }
            ClassificationLoss::CrossEntropy => {
                let p = proba.get(&y_true).copied().unwrap_or(0.0);
                let p = p.clamp(EPS, 1.0 - EPS);
                -p.ln()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_loss() {
        let loss = Absolute;
        assert_eq!(loss.eval(2.0, 2.0), 0.0);
        assert_eq!(loss.eval(2.0, -1.0), 3.0);
        assert_eq!(loss.eval(-1.0, 2.0), 3.0);
    }

    #[test]
    fn test_squared_loss() {
        let loss = Squared;
        assert_eq!(loss.eval(2.0, 2.0), 0.0);
        assert_eq!(loss.eval(1.0, 4.0), 9.0);
    }

    #[test]
    fn test_huber_quadratic_region() {
        let loss = Huber { delta: 1.0 };
        assert!((loss.eval(0.0, 0.5) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_huber_linear_region() {
        let loss = Huber { delta: 1.0 };
        // |diff| = 3 > delta: delta * (diff - delta/2) = 2.5
        assert!((loss.eval(0.0, 3.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_huber_default_delta() {
        assert_eq!(Huber::default().delta, 1.0);
    }

    #[test]
    fn test_log_loss_confident_correct_is_small() {
        let mut proba = BTreeMap::new();
        proba.insert(0usize, 0.05);
        proba.insert(1usize, 0.95);
        let loss = ClassificationLoss::Log.eval(1, &proba);
        assert!(loss < 0.1, "loss={loss}");
    }

    #[test]
    fn test_log_loss_confident_wrong_is_large() {
        let mut proba = BTreeMap::new();
        proba.insert(0usize, 0.05);
        proba.insert(1usize, 0.95);
        let loss = ClassificationLoss::Log.eval(0, &proba);
        assert!(loss > 1.0, "loss={loss}");
    }

    #[test]
    fn test_log_loss_missing_positive_class_clamped() {
        let proba = BTreeMap::new();
        let loss = ClassificationLoss::Log.eval(1, &proba);
        assert!(loss.is_finite());
        assert!(loss > 10.0);
    }

    #[test]
    fn test_cross_entropy_reads_true_class() {
        let mut proba = BTreeMap::new();
        proba.insert(0usize, 0.1);
        proba.insert(1usize, 0.2);
        proba.insert(2usize, 0.7);
        let good = ClassificationLoss::CrossEntropy.eval(2, &proba);
        let bad = ClassificationLoss::CrossEntropy.eval(0, &proba);
        assert!(good < bad);
    }

    #[test]
    fn test_cross_entropy_missing_class_clamped() {
        let proba = BTreeMap::new();
        let loss = ClassificationLoss::CrossEntropy.eval(7, &proba);
        assert!(loss.is_finite());
    }

    #[test]
    fn test_losses_non_negative() {
        for (t, p) in [(0.0, 0.0), (1.0, -5.0), (-3.0, 3.0)] {
            assert!(Absolute.eval(t, p) >= 0.0);
            assert!(Squared.eval(t, p) >= 0.0);
            assert!(Huber::default().eval(t, p) >= 0.0);
        }
    }
}
