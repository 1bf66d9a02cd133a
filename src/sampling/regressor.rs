//! Replay wrapper for incremental regressors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::SortedBuffer;
use crate::error::Result;
use crate::loss::{Absolute, RegressionLoss};
use crate::traits::OnlineRegressor;

use super::{by_loss, validate_params, Triplet};

/// Hard-example replay wrapper around an incremental regressor.
///
/// Keeps the `capacity` hardest observations seen so far, ranked by a
/// regression loss. On each [`learn_one`](Self::learn_one) call the
/// wrapped model is trained on a uniformly drawn buffered observation
/// with probability `p`, or on the fresh observation with probability
/// `1 - p`. Whatever was replayed is re-scored against the updated model
/// and re-inserted, so the buffer ranking tracks the model as it learns.
///
/// # Example
///
/// ```
/// use repaso::linear_model::OnlineLinearRegression;
/// use repaso::loss::Squared;
/// use repaso::sampling::HardSamplingRegressor;
///
/// let model = OnlineLinearRegression::new(2);
/// let mut sampler = HardSamplingRegressor::with_loss(model, 10, 0.3, Squared)
///     .unwrap()
///     .with_seed(7);
/// sampler.learn_one(&[1.0, 0.0], 2.0).unwrap();
/// assert_eq!(sampler.buffer_len(), 1);
/// ```
#[derive(Debug)]
pub struct HardSamplingRegressor<M, L = Absolute> {
    model: M,
    loss: L,
    p: f64,
    capacity: usize,
    buffer: SortedBuffer<Triplet<Vec<f64>, f64>>,
    rng: StdRng,
}

impl<M: OnlineRegressor> HardSamplingRegressor<M, Absolute> {
    /// Wrap `model` with the default absolute-error criterion.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepasoError::InvalidHyperparameter`] when
    /// `capacity == 0` or `p` is outside `[0, 1]`.
    pub fn new(model: M, capacity: usize, p: f64) -> Result<Self> {
        Self::with_loss(model, capacity, p, Absolute)
    }
}

impl<M: OnlineRegressor, L: RegressionLoss> HardSamplingRegressor<M, L> {
    /// Wrap `model` with an explicit loss criterion.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RepasoError::InvalidHyperparameter`] when
    /// `capacity == 0` or `p` is outside `[0, 1]`.
    pub fn with_loss(model: M, capacity: usize, p: f64, loss: L) -> Result<Self> {
        validate_params(capacity, p)?;
        Ok(Self {
            model,
            loss,
            p,
            capacity,
            buffer: SortedBuffer::with_capacity(capacity, by_loss),
            rng: StdRng::from_entropy(),
        })
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

    /// Number of records currently retained.
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Retained records in ascending loss order.
    pub fn buffer(&self) -> impl Iterator<Item = &Triplet<Vec<f64>, f64>> {
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

    /// Score one observation, or `None` when it cannot be scored
    /// (prediction failure or non-finite loss). Unscorable observations
    /// are skipped without touching the buffer or the model.
    fn score_one(&self, x: &[f64], y: f64) -> Option<f64> {
        let pred = self.model.predict_one(x).ok()?;
        let loss = self.loss.eval(y, pred);
        loss.is_finite().then_some(loss)
    }

    /// Predict the target for one feature vector. Pure delegation.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped model's prediction error.
    pub fn predict_one(&self, x: &[f64]) -> Result<f64> {
        self.model.predict_one(x)
    }

    /// Score, conditionally admit, then train on either a buffered or the
    /// fresh observation.
    ///
    /// Admission: below capacity the record is always retained; at
    /// capacity it replaces the current minimum only when its loss is
    /// strictly greater. Admission and training-source selection are
    /// independent: a discarded record can still be trained on as the
    /// fresh sample.
    ///
    /// # Errors
    ///
    /// Propagates the wrapped model's training error. Buffer errors are
    /// unreachable under the guards here.
    pub fn learn_one(&mut self, x: &[f64], y: f64) -> Result<&mut Self> {
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
