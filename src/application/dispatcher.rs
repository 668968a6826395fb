// ============================================================
// Layer 2 — Prediction Dispatcher
// ============================================================
// Routes one validated feature vector through the model suite:
//
//   Step 1: take the row in schema order
//   Step 2: scale it once with the shared scaler
//   Step 3: crop classifier       → id → crop decoder
//   Step 4: yield regressor       → value, used as-is
//   Step 5: fertilizer classifier → id → fertilizer decoder
//
// All three models read the same scaled row. No model ever
// sees the unscaled row.
//
// The dispatcher holds no mutable state, so two calls with the
// same vector give the same result.

use anyhow::{Context, Result};

use crate::domain::{
    input::FeatureVector,
    prediction::PredictionResult,
    traits::{Classifier, FeatureScaler, LabelDecoder, Regressor},
};

// ─── ModelSuite ───────────────────────────────────────────────────────────────
/// Everything the model store hands over at start-up.
/// Read-only once built.
pub struct ModelSuite {
    pub scaler:            Box<dyn FeatureScaler>,
    pub crop_model:        Box<dyn Classifier>,
    pub yield_model:       Box<dyn Regressor>,
    pub fertilizer_model:  Box<dyn Classifier>,
    pub crop_labels:       Box<dyn LabelDecoder>,
    pub fertilizer_labels: Box<dyn LabelDecoder>,
}

// ─── PredictionDispatcher ─────────────────────────────────────────────────────
pub struct PredictionDispatcher {
    suite: ModelSuite,
}

impl PredictionDispatcher {
    pub fn new(suite: ModelSuite) -> Self {
        Self { suite }
    }

    /// Number of columns the shared scaler expects.
    pub fn width(&self) -> usize {
        self.suite.scaler.width()
    }

    /// Produce the crop / yield / fertilizer triple for `vector`.
    ///
    /// Any scaler, model or decoder error fails the whole request;
    /// there is no partial result.
    pub fn dispatch(&self, vector: &FeatureVector) -> Result<PredictionResult> {
        let s = &self.suite;

        let scaled = s.scaler
            .transform(vector.values())
            .context("scaling the feature row")?;

        let crop_id = s.crop_model
            .predict_class(&scaled)
            .context("crop classifier")?;
        let crop = s.crop_labels
            .decode(crop_id)
            .context("crop label decoder")?;

        let yield_ = s.yield_model
            .predict_value(&scaled)
            .context("yield regressor")?;

        let fert_id = s.fertilizer_model
            .predict_class(&scaled)
            .context("fertilizer classifier")?;
        let fertilizer = s.fertilizer_labels
            .decode(fert_id)
            .context("fertilizer label decoder")?;

        tracing::debug!(crop_id, fert_id, yield_, "dispatched feature row");

        Ok(PredictionResult { crop, yield_, fertilizer })
    }
}


// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::fakes::{self, FailingRegressor, Labels};
    use super::*;

    fn vector(values: &[f64]) -> FeatureVector {
        let names = (0..values.len()).map(|i| format!("f{i}")).collect();
        FeatureVector::from_parts(names, values.to_vec())
    }

    #[test]
    fn test_scales_once_and_feeds_scaled_row_to_every_model() {
        let (suite, probes) = fakes::suite(3);
        let dispatcher = PredictionDispatcher::new(suite);

        let result = dispatcher.dispatch(&vector(&[5.0, 9.0, 2.0])).unwrap();

        assert_eq!(probes.scaler_calls.get(), 1);
        let scaled = vec![4.0, 8.0, 1.0];
        assert_eq!(probes.crop_rows.borrow().as_slice(), &[scaled.clone()]);
        assert_eq!(probes.fert_rows.borrow().as_slice(), &[scaled]);

        // argmax is column 1; yield is the sum of the scaled row
        assert_eq!(result.crop, "maize");
        assert_eq!(result.fertilizer, "DAP");
        assert_eq!(result.yield_, 13.0);
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let (suite, _) = fakes::suite(4);
        let dispatcher = PredictionDispatcher::new(suite);
        let v = vector(&[3.0, 1.0, 7.5, 2.0]);

        let first  = dispatcher.dispatch(&v).unwrap();
        let second = dispatcher.dispatch(&v).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_model_failure_fails_whole_request() {
        let (mut suite, _) = fakes::suite(2);
        suite.yield_model = Box::new(FailingRegressor);
        let dispatcher = PredictionDispatcher::new(suite);

        let err = dispatcher.dispatch(&vector(&[1.0, 2.0])).unwrap_err();
        assert!(format!("{err:#}").contains("regressor exploded"));
    }

    #[test]
    fn test_unknown_class_id_is_a_failure() {
        let (mut suite, _) = fakes::suite(3);
        suite.crop_labels = Box::new(Labels(vec!["rice"]));
        let dispatcher = PredictionDispatcher::new(suite);

        // argmax picks column 2, which the one-label decoder does not know
        assert!(dispatcher.dispatch(&vector(&[0.0, 0.0, 9.0])).is_err());
    }

    #[test]
    fn test_width_mismatch_is_a_failure() {
        let (suite, _) = fakes::suite(3);
        let dispatcher = PredictionDispatcher::new(suite);
        assert_eq!(dispatcher.width(), 3);
        assert!(dispatcher.dispatch(&vector(&[1.0, 2.0])).is_err());
    }
}
