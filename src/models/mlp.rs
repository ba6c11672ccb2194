//! Feed-forward network regressor.
//!
//! Topology: `4 → h1 (ReLU) → h2 (ReLU) → 1 (linear)`, trained on mean squared
//! error with Adam over shuffled mini-batches. Inputs and targets are
//! standardized; the scalers travel with the weights so predictions come back
//! in rupees.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use crate::data::sample::quality_factor;
use crate::data::training_rng;
use crate::domain::{FEATURE_COUNT, Features, RegressorKind, TrainingConfig, TrainingExample};
use crate::error::AppError;
use crate::math::{Adam, AdamParam, Scaler};
use crate::models::regressor::{
    Regressor, TrainingReport, check_examples, check_features, design_matrices, training_rmse,
};

/// Log the epoch loss every this many epochs.
const LOG_EVERY: usize = 20;

/// Position of the quality index in the feature row.
const QUALITY_FEATURE: usize = 2;
const QUALITY_TIERS: u8 = 4;

#[derive(Debug, Clone)]
struct Dense {
    w: AdamParam,
    /// `1 × outputs` bias row.
    b: AdamParam,
}

impl Dense {
    /// He-normal weights, zero bias.
    fn new(inputs: usize, outputs: usize, rng: &mut StdRng) -> Result<Self, AppError> {
        let std = (2.0 / inputs as f64).sqrt();
        let normal = Normal::new(0.0, std)
            .map_err(|e| AppError::numeric(format!("weight init distribution: {e}")))?;
        let w = DMatrix::from_fn(inputs, outputs, |_, _| normal.sample(rng));
        Ok(Self {
            w: AdamParam::new(w),
            b: AdamParam::new(DMatrix::zeros(1, outputs)),
        })
    }

    fn forward(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        let mut z = x * &self.w.value;
        for j in 0..z.ncols() {
            z.column_mut(j).add_scalar_mut(self.b.value[(0, j)]);
        }
        z
    }

    /// Weight and bias gradients for upstream activations `input` and layer delta `delta`.
    fn gradients(input: &DMatrix<f64>, delta: &DMatrix<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
        let gw = input.transpose() * delta;
        let gb = DMatrix::from_fn(1, delta.ncols(), |_, j| delta.column(j).sum());
        (gw, gb)
    }
}

fn relu(z: &DMatrix<f64>) -> DMatrix<f64> {
    z.map(|v| v.max(0.0))
}

fn relu_backward(grad: &DMatrix<f64>, z: &DMatrix<f64>) -> DMatrix<f64> {
    grad.zip_map(z, |g, v| if v > 0.0 { g } else { 0.0 })
}

#[derive(Debug, Clone)]
struct Network {
    hidden1: Dense,
    hidden2: Dense,
    output: Dense,
}

impl Network {
    fn new(h1: usize, h2: usize, rng: &mut StdRng) -> Result<Self, AppError> {
        Ok(Self {
            hidden1: Dense::new(FEATURE_COUNT, h1, rng)?,
            hidden2: Dense::new(h1, h2, rng)?,
            output: Dense::new(h2, 1, rng)?,
        })
    }

    fn forward(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        let a1 = relu(&self.hidden1.forward(x));
        let a2 = relu(&self.hidden2.forward(&a1));
        self.output.forward(&a2)
    }

    /// One optimizer step on a mini-batch; returns the batch MSE before the update.
    fn train_batch(&mut self, x: &DMatrix<f64>, y: &DMatrix<f64>, adam: &mut Adam) -> f64 {
        let z1 = self.hidden1.forward(x);
        let a1 = relu(&z1);
        let z2 = self.hidden2.forward(&a1);
        let a2 = relu(&z2);
        let out = self.output.forward(&a2);

        let m = x.nrows() as f64;
        let diff = out - y;
        let loss = diff.norm_squared() / m;
        let d_out = diff * (2.0 / m);

        let (gw3, gb3) = Dense::gradients(&a2, &d_out);
        let d_z2 = relu_backward(&(&d_out * self.output.w.value.transpose()), &z2);
        let (gw2, gb2) = Dense::gradients(&a1, &d_z2);
        let d_z1 = relu_backward(&(&d_z2 * self.hidden2.w.value.transpose()), &z1);
        let (gw1, gb1) = Dense::gradients(x, &d_z1);

        adam.tick();
        adam.update(&mut self.output.w, &gw3);
        adam.update(&mut self.output.b, &gb3);
        adam.update(&mut self.hidden2.w, &gw2);
        adam.update(&mut self.hidden2.b, &gb2);
        adam.update(&mut self.hidden1.w, &gw1);
        adam.update(&mut self.hidden1.b, &gb1);

        loss
    }

    fn parameters(&self) -> Vec<f64> {
        [&self.hidden1, &self.hidden2, &self.output]
            .into_iter()
            .flat_map(|l| l.w.value.iter().chain(l.b.value.iter()).copied())
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    network: Network,
    x_scaler: Scaler,
    y_scaler: Scaler,
}

impl Fitted {
    fn raw_predict(&self, features: &Features) -> f64 {
        let x = self.x_scaler.transform_row(features);
        let z = self.network.forward(&x)[(0, 0)];
        self.y_scaler.inverse(0, z)
    }
}

/// Multi-layer perceptron behind the `Regressor` seam.
#[derive(Debug, Clone)]
pub struct MlpRegressor {
    hidden: (usize, usize),
    epochs: usize,
    batch_size: usize,
    learning_rate: f64,
    seed: Option<u64>,
    fitted: Option<Fitted>,
}

impl MlpRegressor {
    pub fn new(config: &TrainingConfig) -> Self {
        Self {
            hidden: (config.hidden.0.max(1), config.hidden.1.max(1)),
            epochs: config.epochs,
            batch_size: config.batch_size.max(1),
            learning_rate: config.learning_rate,
            seed: config.seed,
            fitted: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    /// Flattened weights and biases (empty before training).
    pub fn parameters(&self) -> Vec<f64> {
        self.fitted
            .as_ref()
            .map(|f| f.network.parameters())
            .unwrap_or_default()
    }
}

impl Regressor for MlpRegressor {
    fn kind(&self) -> RegressorKind {
        RegressorKind::Mlp
    }

    fn train(&mut self, examples: &[TrainingExample]) -> Result<TrainingReport, AppError> {
        self.fitted = None;
        check_examples(examples)?;
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(AppError::validation(format!(
                "Learning rate must be > 0 (got {}).",
                self.learning_rate
            )));
        }

        let (x_raw, y_raw) = design_matrices(examples);
        let x_scaler = Scaler::fit(&x_raw);
        let y_scaler = Scaler::fit(&y_raw);
        let x = x_scaler.transform(&x_raw);
        let y = y_scaler.transform(&y_raw);

        let mut rng = training_rng(self.seed);
        let mut network = Network::new(self.hidden.0, self.hidden.1, &mut rng)?;
        let mut adam = Adam::new(self.learning_rate);
        let mut order: Vec<usize> = (0..examples.len()).collect();

        info!(
            samples = examples.len(),
            epochs = self.epochs,
            batch_size = self.batch_size,
            "training mlp regressor"
        );

        for epoch in 0..self.epochs {
            order.shuffle(&mut rng);
            let mut epoch_loss = 0.0;
            for batch in order.chunks(self.batch_size) {
                let xb = x.select_rows(batch.iter());
                let yb = y.select_rows(batch.iter());
                epoch_loss += network.train_batch(&xb, &yb, &mut adam) * batch.len() as f64;
            }
            epoch_loss /= examples.len() as f64;

            if !epoch_loss.is_finite() {
                return Err(AppError::numeric(format!("training diverged at epoch {epoch}.")));
            }
            if epoch % LOG_EVERY == 0 {
                debug!(epoch, loss = epoch_loss, "epoch finished");
            }
        }

        self.fitted = Some(Fitted {
            network,
            x_scaler,
            y_scaler,
        });

        let rmse = training_rmse(&*self, examples)?;
        info!(rmse, "mlp regressor trained");
        Ok(TrainingReport {
            samples: examples.len(),
            rmse,
        })
    }

    /// Network output, floored by every lower quality tier's output scaled up
    /// by the synthetic rule's quality factor. A better finish therefore never
    /// predicts cheaper than a worse one for the same area, floors and count.
    fn predict(&self, features: &Features) -> Result<f64, AppError> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| AppError::insufficient_data("regressor has not been trained."))?;
        check_features(features)?;

        let quality = features[QUALITY_FEATURE];
        let target_factor = quality_factor(quality);
        let mut y = fitted.raw_predict(features);
        for tier in (0..QUALITY_TIERS).map(f64::from).take_while(|t| *t < quality) {
            let mut lower = *features;
            lower[QUALITY_FEATURE] = tier;
            y = y.max(fitted.raw_predict(&lower) * target_factor / quality_factor(tier));
        }
        if !y.is_finite() {
            return Err(AppError::numeric("non-finite regression output."));
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::synthetic_examples;

    fn config(seed: u64) -> TrainingConfig {
        TrainingConfig {
            seed: Some(seed),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn predict_before_train_is_insufficient_data() {
        let model = MlpRegressor::new(&config(1));
        let err = model.predict(&[1000.0, 1.0, 1.0, 5.0]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientData(_)));
    }

    #[test]
    fn empty_training_set_fails() {
        let mut model = MlpRegressor::new(&config(1));
        assert!(matches!(model.train(&[]), Err(AppError::InsufficientData(_))));
        assert!(!model.is_trained());
    }

    #[test]
    fn learns_the_synthetic_pricing_rule() {
        let examples = synthetic_examples(100, &mut training_rng(Some(3)));
        let mut model = MlpRegressor::new(&config(11));
        let report = model.train(&examples).unwrap();
        assert_eq!(report.samples, 100);

        // Targets span roughly 0.8M..25M; the fit should land well inside that spread.
        let mean = examples.iter().map(|e| e.target).sum::<f64>() / 100.0;
        assert!(report.rmse < 0.25 * mean, "rmse {} vs mean {}", report.rmse, mean);

        let y = model.predict(&[3000.0, 2.0, 1.0, 10.0]).unwrap();
        assert!(y.is_finite() && y > 0.0);
    }

    #[test]
    fn better_quality_never_predicts_cheaper() {
        let examples = synthetic_examples(100, &mut training_rng(Some(1)));
        for seed in [1, 3, 42] {
            let mut model = MlpRegressor::new(&config(seed));
            model.train(&examples).unwrap();
            for area in [5000.0, 9500.0] {
                let preds: Vec<f64> = (0..4)
                    .map(|q| model.predict(&[area, 1.0, f64::from(q), 1.0]).unwrap())
                    .collect();
                for w in preds.windows(2) {
                    assert!(w[1] >= w[0], "seed {seed} area {area}: {preds:?}");
                    if w[0] > 0.0 {
                        assert!(w[1] >= w[0] * 1.1, "seed {seed} area {area}: {preds:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_gives_same_weights() {
        let examples = synthetic_examples(40, &mut training_rng(Some(5)));
        let mut a = MlpRegressor::new(&config(9));
        let mut b = MlpRegressor::new(&config(9));
        a.train(&examples).unwrap();
        b.train(&examples).unwrap();
        assert_eq!(a.parameters(), b.parameters());
    }

    #[test]
    fn retraining_discards_previous_weights() {
        let examples = synthetic_examples(40, &mut training_rng(Some(5)));
        let mut model = MlpRegressor::new(&config(9));
        model.train(&examples).unwrap();
        let first = model.parameters();
        assert!(model.train(&[]).is_err());
        assert!(model.parameters().is_empty());
        model.train(&examples).unwrap();
        assert_eq!(model.parameters().len(), first.len());
    }
}
