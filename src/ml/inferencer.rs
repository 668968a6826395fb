// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Adapts burn tabular networks to the Classifier / Regressor
// traits of Layer 3. One scaled row in, one prediction out.
use anyhow::{bail, Result};
use burn::prelude::*;

use crate::domain::traits::{Classifier, Regressor};
use crate::ml::model::TabularNet;

/// CPU backend used for all inference; the rows are tiny.
pub type InferBackend = burn::backend::NdArray;
pub type InferDevice  = burn::backend::ndarray::NdArrayDevice;

/// Shape-check `row` and lift it into a [1, width] tensor.
fn row_tensor<B: Backend>(
    model:  &TabularNet<B>,
    row:    &[f64],
    device: &B::Device,
) -> Result<Tensor<B, 2>> {
    if row.len() != model.input_dim {
        bail!(
            "model expects {} features, got {}",
            model.input_dim,
            row.len()
        );
    }
    let floats: Vec<f32> = row.iter().map(|&x| x as f32).collect();
    Ok(Tensor::<B, 1>::from_floats(floats.as_slice(), device).reshape([1, model.input_dim]))
}

// ─── TabularClassifier ────────────────────────────────────────────────────────
pub struct TabularClassifier<B: Backend = InferBackend> {
    model:  TabularNet<B>,
    device: B::Device,
}

impl<B: Backend> TabularClassifier<B> {
    pub fn new(model: TabularNet<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    pub fn num_classes(&self) -> usize {
        self.model.output_dim
    }
}

impl<B: Backend> Classifier for TabularClassifier<B> {
    fn predict_class(&self, row: &[f64]) -> Result<usize> {
        let input  = row_tensor(&self.model, row, &self.device)?;
        let logits = self.model.forward(input);

        let ids = logits
            .argmax(1)
            .into_data()
            .convert::<i64>()
            .to_vec::<i64>()
            .map_err(|e| anyhow::anyhow!("reading class id: {e:?}"))?;

        match ids.first() {
            Some(&id) if id >= 0 => Ok(id as usize),
            other => bail!("classifier produced no usable class id: {other:?}"),
        }
    }
}

// ─── TabularRegressor ─────────────────────────────────────────────────────────
pub struct TabularRegressor<B: Backend = InferBackend> {
    model:  TabularNet<B>,
    device: B::Device,
}

impl<B: Backend> TabularRegressor<B> {
    pub fn new(model: TabularNet<B>, device: B::Device) -> Self {
        Self { model, device }
    }
}

impl<B: Backend> Regressor for TabularRegressor<B> {
    fn predict_value(&self, row: &[f64]) -> Result<f64> {
        let input  = row_tensor(&self.model, row, &self.device)?;
        let output = self.model.forward(input);

        let values = output
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("reading regressor output: {e:?}"))?;

        match values.as_slice() {
            [v] if v.is_finite() => Ok(f64::from(*v)),
            other => bail!("regressor produced {} values, expected one finite value", other.len()),
        }
    }
}
