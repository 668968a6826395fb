// ============================================================
// Layer 2 — Advise Use Case
// ============================================================
// Start-up wiring for one advisory session:
//
//   Step 1: load + cross-check the artifact bundle   (Layer 6)
//   Step 2: wrap the model suite in a dispatcher     (Layer 2)
//   Step 3: hand both to a fresh session controller  (Layer 2)
//
// The presentation layer then drives the controller with
// keystrokes, submit and reset.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::{
    dispatcher::{ModelSuite, PredictionDispatcher},
    session::SessionController,
};
use crate::domain::schema::FeatureSchema;
use crate::infra::artifact_store::ArtifactStore;

// ─── Advisor Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Directory holding schema.json, scaler.json, labels and models
    pub artifacts_dir: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self { artifacts_dir: "artifacts".to_string() }
    }
}

// ─── AdviseUseCase ────────────────────────────────────────────────────────────
pub struct AdviseUseCase {
    controller: SessionController,
}

impl AdviseUseCase {
    /// Load every artifact and open a session. Fails fast on any
    /// missing or inconsistent artifact.
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let store = ArtifactStore::new(&config.artifacts_dir);
        let (schema, suite) = store.load_suite()?;
        Ok(Self::from_parts(schema, suite))
    }

    pub fn from_parts(schema: FeatureSchema, suite: ModelSuite) -> Self {
        let dispatcher = PredictionDispatcher::new(suite);
        Self { controller: SessionController::new(schema, dispatcher) }
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.controller.schema()
    }

    pub fn controller(&mut self) -> &mut SessionController {
        &mut self.controller
    }
}
