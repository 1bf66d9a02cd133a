//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use repaso::prelude::*;
//! ```

pub use crate::buffer::SortedBuffer;
pub use crate::error::{RepasoError, Result};
pub use crate::linear_model::{
    LearningRateDecay, OnlineLearnerConfig, OnlineLinearRegression, OnlineLogisticRegression,
};
pub use crate::loss::{Absolute, ClassificationLoss, Huber, RegressionLoss, Squared};
pub use crate::sampling::{HardSamplingClassifier, HardSamplingRegressor, Triplet};
pub use crate::traits::{OnlineClassifier, OnlineRegressor};
