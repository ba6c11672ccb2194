//! Adam optimizer over dense parameter matrices.

use nalgebra::DMatrix;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const EPSILON: f64 = 1e-7;

/// A trainable matrix with its first/second moment estimates.
#[derive(Debug, Clone)]
pub struct AdamParam {
    pub value: DMatrix<f64>,
    m: DMatrix<f64>,
    v: DMatrix<f64>,
}

impl AdamParam {
    pub fn new(value: DMatrix<f64>) -> Self {
        let (r, c) = value.shape();
        Self {
            value,
            m: DMatrix::zeros(r, c),
            v: DMatrix::zeros(r, c),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    step: i32,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            step: 0,
        }
    }

    /// Advance the step counter; call once per mini-batch before `update`.
    pub fn tick(&mut self) {
        self.step = self.step.saturating_add(1);
    }

    pub fn update(&self, param: &mut AdamParam, grad: &DMatrix<f64>) {
        debug_assert_eq!(param.value.shape(), grad.shape());
        let t = self.step.max(1);
        let bias1 = 1.0 - BETA1.powi(t);
        let bias2 = 1.0 - BETA2.powi(t);
        let lr = self.learning_rate * bias2.sqrt() / bias1;

        for i in 0..grad.len() {
            let g = grad[i];
            param.m[i] = BETA1 * param.m[i] + (1.0 - BETA1) * g;
            param.v[i] = BETA2 * param.v[i] + (1.0 - BETA2) * g * g;
            param.value[i] -= lr * param.m[i] / (param.v[i].sqrt() + EPSILON);
        }
    }
}
