// ============================================================
// Layer 5 — Standard Scaler
// ============================================================
// Per-column standardisation fitted offline:
//
//   scaled[i] = (row[i] - mean[i]) / scale[i]
//
// Stored in scaler.json as two equal-length arrays in feature
// schema order. A zero scale (constant column at fit time) is
// treated as 1.0 so the column passes through centred.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::traits::FeatureScaler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean:  Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Fails when the two arrays differ in length, are empty, or hold
    /// non-finite numbers.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            bail!("scaler has no columns");
        }
        if mean.len() != scale.len() {
            bail!(
                "scaler mean has {} columns but scale has {}",
                mean.len(),
                scale.len()
            );
        }
        if mean.iter().chain(&scale).any(|v| !v.is_finite()) {
            bail!("scaler contains non-finite parameters");
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self { mean, scale })
    }

    /// Re-run the constructor checks on a deserialised scaler.
    pub fn checked(self) -> Result<Self> {
        Self::new(self.mean, self.scale)
    }
}

impl FeatureScaler for StandardScaler {
    fn width(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.width() {
            bail!("scaler expects {} features, got {}", self.width(), row.len());
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
