// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The four capabilities the dispatcher needs from the model
// store. The application layer only ever sees these traits;
// the burn-backed implementations live in Layer 5 and tests
// plug in hand-written fakes.
//
//   FeatureScaler  → StandardScaler
//   Classifier     → TabularClassifier (crop, fertilizer)
//   Regressor      → TabularRegressor  (yield)
//   LabelDecoder   → LabelEncoder      (crop, fertilizer)
//
// Rows are plain f64 slices in feature-schema order.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

// ─── FeatureScaler ────────────────────────────────────────────────────────────
/// Normalises a raw row before any model sees it.
pub trait FeatureScaler {
    /// Number of columns this scaler was fitted on.
    fn width(&self) -> usize;

    /// Return the scaled copy of `row`. Errors on a width mismatch.
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>>;
}

// ─── Classifier ───────────────────────────────────────────────────────────────
/// Maps a scaled row to a class id.
pub trait Classifier {
    fn predict_class(&self, row: &[f64]) -> Result<usize>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// Maps a scaled row to a single numeric value.
pub trait Regressor {
    fn predict_value(&self, row: &[f64]) -> Result<f64>;
}

// ─── LabelDecoder ─────────────────────────────────────────────────────────────
/// Turns a class id back into its human-readable name.
pub trait LabelDecoder {
    /// Number of known classes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Errors when `id` is not a known class.
    fn decode(&self, id: usize) -> Result<String>;
}
