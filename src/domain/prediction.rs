// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// What the three models say about one feature vector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit the yield regressor was trained in.
pub const YIELD_UNIT: &str = "quintals/hectare";

/// Recommended crop, predicted yield and recommended fertilizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub crop:       String,
    /// Raw regressor output, not rounded
    pub yield_:     f64,
    pub fertilizer: String,
}

impl PredictionResult {
    pub fn new(crop: impl Into<String>, yield_: f64, fertilizer: impl Into<String>) -> Self {
        Self { crop: crop.into(), yield_, fertilizer: fertilizer.into() }
    }

    /// Yield as shown to the user: two decimals plus unit.
    pub fn yield_display(&self) -> String {
        format!("{:.2} {}", self.yield_, YIELD_UNIT)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "crop={}, yield={}, fertilizer={}",
            self.crop,
            self.yield_display(),
            self.fertilizer
        )
    }
}
