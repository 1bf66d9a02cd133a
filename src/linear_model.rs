//! Bundled incremental linear models.
//!
//! Small SGD-based models implementing the collaborator traits so the
//! replay wrappers can be exercised end to end without an external model
//! crate. Both update from exactly one observation per call.
//!
//! # References
//!
//! - [Bottou 2010] "Large-Scale Machine Learning with Stochastic Gradient Descent"
//! - [Duchi et al. 2011] "Adaptive Subgradient Methods"

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RepasoError, Result};
use crate::traits::{OnlineClassifier, OnlineRegressor};

/// Configuration shared by the bundled online models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineLearnerConfig {
    /// Base learning rate
    pub learning_rate: f64,
    /// Learning rate decay schedule
    pub decay: LearningRateDecay,
    /// L2 regularization strength
    pub l2_reg: f64,
    /// Clip gradients to this magnitude
    pub gradient_clip: Option<f64>,
}

impl Default for OnlineLearnerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            decay: LearningRateDecay::InverseSqrt,
            l2_reg: 0.0,
            gradient_clip: None,
        }
    }
}

/// Learning rate decay schedules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LearningRateDecay {
    /// No decay (constant learning rate)
    Constant,
    /// lr = `lr_0` / sqrt(t)
    #[default]
    InverseSqrt,
    /// lr = `lr_0` / t
    Inverse,
    /// lr = `lr_0` / (1 + `decay_rate` * t)
    Step {
        /// Multiplicative decay applied per sample seen
        decay_rate: f64,
    },
}

fn effective_lr(config: &OnlineLearnerConfig, n_samples: u64) -> f64 {
    let base = config.learning_rate;
    let t = n_samples.max(1) as f64;

    match config.decay {
        LearningRateDecay::Constant => base,
        LearningRateDecay::InverseSqrt => base / t.sqrt(),
        LearningRateDecay::Inverse => base / t,
        LearningRateDecay::Step { decay_rate } => base / (1.0 + decay_rate * t),
    }
}

fn clip(grad: f64, bound: Option<f64>) -> f64 {
    match bound {
        Some(c) => grad.clamp(-c, c),
        None => grad,
    }
}

/// Online linear regression trained by SGD, one observation at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineLinearRegression {
    weights: Vec<f64>,
    bias: f64,
    n_samples: u64,
    config: OnlineLearnerConfig,
}

impl OnlineLinearRegression {
    /// Create a model for `n_features` inputs with the default configuration.
    #[must_use]
    pub fn new(n_features: usize) -> Self {
        Self::with_config(n_features, OnlineLearnerConfig::default())
    }

    /// Create a model with a custom configuration.
    #[must_use]
    pub fn with_config(n_features: usize, config: OnlineLearnerConfig) -> Self {
        Self {
            weights: vec![0.0; n_features],
            bias: 0.0,
            n_samples: 0,
            config,
        }
    }

    /// Model weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Bias term.
    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of observations consumed so far.
    #[must_use]
    pub fn n_samples_seen(&self) -> u64 {
        self.n_samples
    }

    fn dot(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(RepasoError::dimension_mismatch(
                "input features",
                self.weights.len(),
                x.len(),
            ));
        }
        Ok(x.iter().zip(&self.weights).map(|(xi, wi)| xi * wi).sum())
    }
}

impl OnlineRegressor for OnlineLinearRegression {
    fn predict_one(&self, x: &[f64]) -> Result<f64> {
        Ok(self.dot(x)? + self.bias)
    }

    fn learn_one(&mut self, x: &[f64], y: f64) -> Result<()> {
        let pred = self.predict_one(x)?;
        let error = pred - y;
        let lr = effective_lr(&self.config, self.n_samples);

        for (wj, &xj) in self.weights.iter_mut().zip(x) {
            let grad = clip(error * xj + self.config.l2_reg * *wj, self.config.gradient_clip);
            *wj -= lr * grad;
        }
        self.bias -= lr * clip(error, self.config.gradient_clip);
        self.n_samples += 1;
        Ok(())
    }
}

/// Online binary logistic regression trained by SGD, one observation at a
/// time. Classes are `{0, 1}` with `1` as the positive class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineLogisticRegression {
    weights: Vec<f64>,
    bias: f64,
    n_samples: u64,
    config: OnlineLearnerConfig,
}

impl OnlineLogisticRegression {
    /// Create a model for `n_features` inputs with the default configuration.
    #[must_use]
    pub fn new(n_features: usize) -> Self {
        Self::with_config(n_features, OnlineLearnerConfig::default())
    }

    /// Create a model with a custom configuration.
    #[must_use]
    pub fn with_config(n_features: usize, config: OnlineLearnerConfig) -> Self {
        Self {
            weights: vec![0.0; n_features],
            bias: 0.0,
            n_samples: 0,
            config,
        }
    }

    /// Model weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Bias term.
    #[must_use]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of observations consumed so far.
    #[must_use]
    pub fn n_samples_seen(&self) -> u64 {
        self.n_samples
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Probability of the positive class for one feature vector.
    ///
    /// # Errors
    ///
    /// Returns a dimension mismatch when `x` has the wrong length.
    pub fn positive_proba_one(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.weights.len() {
            return Err(RepasoError::dimension_mismatch(
                "input features",
                self.weights.len(),
                x.len(),
            ));
        }
        let logit: f64 = x.iter().zip(&self.weights).map(|(xi, wi)| xi * wi).sum();
        Ok(Self::sigmoid(logit + self.bias))
    }
}

impl OnlineClassifier for OnlineLogisticRegression {
    fn predict_proba_one(&self, x: &[f64]) -> Result<BTreeMap<usize, f64>> {
        let p = self.positive_proba_one(x)?;
        let mut proba = BTreeMap::new();
        proba.insert(0, 1.0 - p);
        proba.insert(1, p);
        Ok(proba)
    }

    fn learn_one(&mut self, x: &[f64], y: usize) -> Result<()> {
        let p = self.positive_proba_one(x)?;
        let target = if y == 1 { 1.0 } else { 0.0 };
        let error = p - target;
        let lr = effective_lr(&self.config, self.n_samples);

        for (wj, &xj) in self.weights.iter_mut().zip(x) {
            let grad = clip(error * xj + self.config.l2_reg * *wj, self.config.gradient_clip);
            *wj -= lr * grad;
        }
        self.bias -= lr * clip(error, self.config.gradient_clip);
        self.n_samples += 1;
        Ok(())
    }

    fn is_multiclass(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_regression_convergence() {
        // y = 3*x + 1
        let config = OnlineLearnerConfig {
            learning_rate: 0.1,
            decay: LearningRateDecay::Constant,
            ..Default::default()
        };
        let mut model = OnlineLinearRegression::with_config(1, config);

        for _ in 0..100 {
            model.learn_one(&[1.0], 4.0).unwrap();
            model.learn_one(&[2.0], 7.0).unwrap();
            model.learn_one(&[3.0], 10.0).unwrap();
        }

        let pred = model.predict_one(&[4.0]).unwrap();
        assert!((pred - 13.0).abs() < 1.0, "pred={pred}");
    }

    #[test]
    fn test_linear_regression_dimension_mismatch() {
        let mut model = OnlineLinearRegression::new(2);
        assert!(model.predict_one(&[1.0]).is_err());
        assert!(model.learn_one(&[1.0, 2.0, 3.0], 1.0).is_err());
    }

    #[test]
    fn test_linear_regression_counts_samples() {
        let mut model = OnlineLinearRegression::new(1);
        model.learn_one(&[1.0], 2.0).unwrap();
        model.learn_one(&[2.0], 4.0).unwrap();
        assert_eq!(model.n_samples_seen(), 2);
    }

    #[test]
    fn test_gradient_clipping_bounds_update() {
        let config = OnlineLearnerConfig {
            learning_rate: 1.0,
            decay: LearningRateDecay::Constant,
            gradient_clip: Some(0.1),
            ..Default::default()
        };
        let mut model = OnlineLinearRegression::with_config(1, config);
        model.learn_one(&[1.0], 1000.0).unwrap();
        assert!(model.weights()[0].abs() < 1.0);
    }

    #[test]
    fn test_learning_rate_decay_schedules() {
        let base = OnlineLearnerConfig {
            learning_rate: 1.0,
            decay: LearningRateDecay::InverseSqrt,
            ..Default::default()
        };
        assert!((effective_lr(&base, 100) - 0.1).abs() < 1e-12);

        let inverse = OnlineLearnerConfig {
            decay: LearningRateDecay::Inverse,
            learning_rate: 1.0,
            ..Default::default()
        };
        assert!((effective_lr(&inverse, 100) - 0.01).abs() < 1e-12);

        let step = OnlineLearnerConfig {
            decay: LearningRateDecay::Step { decay_rate: 1.0 },
            learning_rate: 1.0,
            ..Default::default()
        };
        assert!((effective_lr(&step, 99) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_regression_learns_separation() {
        let config = OnlineLearnerConfig {
            learning_rate: 1.0,
            decay: LearningRateDecay::Constant,
            ..Default::default()
        };
        let mut model = OnlineLogisticRegression::with_config(2, config);

        for _ in 0..200 {
            model.learn_one(&[0.0, 0.0], 0).unwrap();
            model.learn_one(&[1.0, 1.0], 1).unwrap();
        }

        let p00 = model.positive_proba_one(&[0.0, 0.0]).unwrap();
        let p11 = model.positive_proba_one(&[1.0, 1.0]).unwrap();
        assert!(p00 < 0.5, "p00={p00}");
        assert!(p11 > 0.5, "p11={p11}");
    }

    #[test]
    fn test_logistic_proba_map_sums_to_one() {
        let model = OnlineLogisticRegression::new(1);
        let proba = model.predict_proba_one(&[0.5]).unwrap();
        let total: f64 = proba.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(proba.len(), 2);
    }

    #[test]
    fn test_logistic_predict_one_argmax() {
        let model = OnlineLogisticRegression::new(1);
        // Untrained model: p = 0.5 both ways; argmax picks a class, any
        // consistent one, without erroring.
        assert!(model.predict_one(&[1.0]).is_ok());
    }

    #[test]
    fn test_logistic_not_multiclass() {
        let model = OnlineLogisticRegression::new(1);
        assert!(!model.is_multiclass());
    }

    #[test]
    fn test_default_config() {
        let config = OnlineLearnerConfig::default();
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.decay, LearningRateDecay::InverseSqrt);
        assert_eq!(config.l2_reg, 0.0);
        assert!(config.gradient_clip.is_none());
    }
}
