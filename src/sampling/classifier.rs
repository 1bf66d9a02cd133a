//! Replay wrapper for incremental classifiers.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::SortedBuffer;
use crate::error::Result;
use crate::loss::ClassificationLoss;
use crate::traits::OnlineClassifier;

use super::{by_loss, validate_params, Triplet};

/// Hard-example replay wrapper around an incremental classifier.
///
/// Same replay algorithm as [`super::HardSamplingRegressor`], scored with
/// a classification loss. The prediction form is fixed once at
/// construction from the wrapped model's declared capability: binary
/// models are scored with log loss on the positive-class probability,
/// multiclass models with cross-entropy on the full probability map.
///
/// # Example
///
/// ```
/// use repaso::linear_model::OnlineLogisticRegression;
/// use repaso::sampling::HardSamplingClassifier;
///
/// let model = OnlineLogisticRegression::new(2);
/// let mut sampler = HardSamplingClassifier::new(model, 40, 0.1)
///     .unwrap()
///     .with_seed(42);
/// sampler.learn_one(&[1.0, 0.5], 1).unwrap();
/// assert_eq!(sampler.buffer_len(), 1);
/// ```
#[derive(Debug)]
pub struct HardSamplingClassifier<M> {
    model: M,
    loss: ClassificationLoss,
    p: f64,
    capacity: usize,
    buffer: SortedBuffer<Triplet<Vec<f64>, usize>>,
    rng: StdRng,
}

impl<M: OnlineClassifier> HardSamplingClassifier<M> {
    /// Wrap `model`, picking the loss from its declared capability:
    /// cross-entropy for multiclass models, log loss otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepasoError::InvalidHyperparameter`] when
    /// `capacity == 0` or `p` is outside `[0, 1]`.
    pub fn new(model: M, capacity: usize, p: f64) -> Result<Self> {
        validate_params(capacity, p)?;
        let loss = if model.is_multiclass() {
            ClassificationLoss::CrossEntropy
        } else {
            ClassificationLoss::Log
        };
        Ok(Self {
            model,
            loss,
            p,
            capacity,
            buffer: SortedBuffer::with_capacity(capacity, by_loss),
            rng: StdRng::from_entropy(),
        })
    }

    /// Override the loss criterion.
    #[must_use]
    pub fn with_loss(mut self, loss: ClassificationLoss) -> Self {
        self.loss = loss;
        self
    }

    /// Seed the internal generator for reproducible replay decisions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Buffer bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replay probability.
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }

    /// The loss criterion in use.
    #[must_use]
    pub fn loss(&self) -> ClassificationLoss {
        self.loss
    }

    /// Number of records currently retained.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Retained records in ascending loss order.
    pub fn buffer(&self) -> impl Iterator<Item = &Triplet<Vec<f64>, usize>> {
        self.buffer.iter()
    }

    /// The wrapped model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Consume the wrapper, returning the wrapped model.
    #[must_use]
    pub fn into_model(self) -> M {
        self.model
    }

    fn score_one(&self, x: &[f64], y: usize) -> Option<f64> {
        let proba = self.model.predict_proba_one(x).ok()?;
        let loss = self.loss.eval(y, &proba);
        loss.is_finite().then_some(loss)
    }

    /// Predict the most probable class. Pure delegation.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped model's prediction error.
    pub fn predict_one(&self, x: &[f64]) -> Result<usize> {
        self.model.predict_one(x)
    }

    /// Predict the class-probability map. Pure delegation.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped model's prediction error.
    pub fn predict_proba_one(&self, x: &[f64]) -> Result<BTreeMap<usize, f64>> {
        self.model.predict_proba_one(x)
    }

    /// Score, conditionally admit, then train on either a buffered or the
    /// fresh observation. See
    /// [`HardSamplingRegressor::learn_one`](super::HardSamplingRegressor::learn_one)
    /// for the admission and selection rules, which are identical.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped model's training error. Buffer errors are
    /// unreachable under the guards here.
    pub fn learn_one(&mut self, x: &[f64], y: usize) -> Result<&mut Self> {
        let Some(loss) = self.score_one(x, y) else {
            return Ok(self);
        };

        if self.buffer.len() < self.capacity {
            self.buffer.insert_sorted(Triplet {
                x: x.to_vec(),
                y,
                loss,
            });
        } else if loss > self.buffer.get(0)?.loss {
            self.buffer.pop_min()?;
            self.buffer.insert_sorted(Triplet {
                x: x.to_vec(),
                y,
                loss,
            });
        }

        // Drawn unconditionally so the draw order is reproducible.
        let u: f64 = self.rng.gen();
        if u <= self.p {
            if !self.buffer.is_empty() {
                let i = self.rng.gen_range(0..self.buffer.len());
                let triplet = self.buffer.pop_at(i)?;
                self.model.learn_one(&triplet.x, triplet.y)?;
                let rescored = self
                    .score_one(&triplet.x, triplet.y)
                    .unwrap_or(triplet.loss);
                self.buffer.insert_sorted(Triplet {
                    loss: rescored,
                    ..triplet
                });
            }
        } else {
            self.model.learn_one(x, y)?;
        }

        Ok(self)
    }
}
