//! Repaso: hard-example replay for incremental machine learning models.
//!
//! Repaso wraps any incremental model with a bounded buffer of the
//! observations it currently predicts worst, and biases the training
//! stream toward them: each call either replays a hard buffered
//! observation (probability `p`) or trains on the fresh one
//! (probability `1 - p`), re-scoring replayed records so the ranking
//! tracks the model as it learns.
//!
//! # Quick Start
//!
//! ```
//! use repaso::prelude::*;
//!
//! let model = OnlineLinearRegression::new(1);
//! let mut sampler = HardSamplingRegressor::new(model, 30, 0.2)
//!     .unwrap()
//!     .with_seed(42);
//!
//! // Stream observations of y = 2*x + 1.
//! for i in 0..100 {
//!     let x = [(i % 10) as f64];
//!     sampler.learn_one(&x, 2.0 * x[0] + 1.0).unwrap();
//! }
//!
//! assert!(sampler.buffer_len() <= 30);
//! let pred = sampler.predict_one(&[4.0]).unwrap();
//! assert!(pred.is_finite());
//! ```
//!
//! # Modules
//!
//! - [`sampling`]: the replay wrappers ([`HardSamplingRegressor`],
//!   [`HardSamplingClassifier`])
//! - [`buffer`]: ranked retention storage ([`buffer::SortedBuffer`])
//! - [`loss`]: difficulty criteria (absolute, squared, Huber, log,
//!   cross-entropy)
//! - [`traits`]: contracts for wrappable incremental models
//! - [`linear_model`]: bundled SGD models implementing those contracts
//! - [`error`]: error types

pub mod buffer;
pub mod error;
pub mod linear_model;
pub mod loss;
pub mod prelude;
pub mod sampling;
pub mod traits;

pub use error::{RepasoError, Result};
pub use sampling::{HardSamplingClassifier, HardSamplingRegressor, Triplet};
pub use traits::{OnlineClassifier, OnlineRegressor};
