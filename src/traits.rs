//! Contracts for the incremental models a replay wrapper can own.
//!
//! The wrappers in [`crate::sampling`] are generic over these traits: any
//! model that can predict one observation and learn from one observation
//! can sit behind a replay buffer.

use std::collections::BTreeMap;

use crate::error::{RepasoError, Result};

/// Incremental regression model trained one observation at a time.
pub trait OnlineRegressor {
    /// Predict the target for one feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error when the feature vector is structurally invalid for
    /// the model (e.g. wrong length). Replay wrappers treat such an error
    /// during scoring as a silent skip, not a failure.
    fn predict_one(&self, x: &[f64]) -> Result<f64>;

    /// Update the model in place from one observation.
    ///
    /// # Errors
    ///
    /// Returns an error when the observation cannot be consumed.
    fn learn_one(&mut self, x: &[f64], y: f64) -> Result<()>;
}

/// Incremental classification model trained one observation at a time.
///
/// Classes are identified by `usize`; binary models use `{0, 1}` with `1`
/// as the positive class.
pub trait OnlineClassifier {
    /// Predict the class-probability map for one feature vector.
    ///
    /// # Errors
    ///
    /// Returns an error when the feature vector is structurally invalid for
    /// the model.
    fn predict_proba_one(&self, x: &[f64]) -> Result<BTreeMap<usize, f64>>;

    /// Update the model in place from one observation.
    ///
    /// # Errors
    ///
    /// Returns an error when the observation cannot be consumed.
    fn learn_one(&mut self, x: &[f64], y: usize) -> Result<()>;

    /// Whether the model predicts over more than two classes.
    ///
    /// Decides the prediction form used for scoring: binary models are
    /// scored on the positive-class probability, multiclass models on the
    /// full probability map.
    fn is_multiclass(&self) -> bool {
        false
    }

    /// Predict the most probable class.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or no class has a probability.
    fn predict_one(&self, x: &[f64]) -> Result<usize> {
        let proba = self.predict_proba_one(x)?;
        proba
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(class, _)| *class)
            .ok_or_else(|| RepasoError::Other("empty class-probability map".to_string()))
    }
}
