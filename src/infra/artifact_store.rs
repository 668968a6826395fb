// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Loads every model-store file once at start-up and checks
// that they agree with each other before anything runs.
//
// Directory layout:
//   artifacts/
//     schema.json               ← ordered features + bound table
//     scaler.json               ← {"mean": [...], "scale": [...]}
//     crop_labels.json          ← ["rice", "maize", ...]
//     fertilizer_labels.json    ← ["Urea", "DAP", ...]
//     crop_model.json           ← TabularNetConfig
//     crop_model.mpk.gz         ← weights (CompactRecorder)
//     yield_model.json / .mpk.gz
//     fertilizer_model.json / .mpk.gz
//
// A model's config is saved next to its weights because the
// network has to be rebuilt with the same shape before the
// weights can be loaded into it.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::application::dispatcher::ModelSuite;
use crate::domain::{
    schema::{BoundEntry, FeatureSchema},
    traits::FeatureScaler,
};
use crate::ml::{
    inferencer::{InferBackend, InferDevice, TabularClassifier, TabularRegressor},
    label_encoder::LabelEncoder,
    model::{TabularNet, TabularNetConfig, TabularTask},
    scaler::StandardScaler,
};

pub const SCHEMA_FILE:       &str = "schema.json";
pub const SCALER_FILE:       &str = "scaler.json";
pub const CROP_LABELS:       &str = "crop_labels";
pub const FERTILIZER_LABELS: &str = "fertilizer_labels";
pub const CROP_MODEL:        &str = "crop_model";
pub const YIELD_MODEL:       &str = "yield_model";
pub const FERTILIZER_MODEL:  &str = "fertilizer_model";

/// `schema.json` as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Feature names in column order
    pub features: Vec<String>,
    /// Optional per-feature bounds; absent features use the default
    #[serde(default)]
    pub bounds:   BTreeMap<String, BoundEntry>,
}

/// Reads (and, for tooling and tests, writes) the artifact bundle.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Load the schema and the full model suite, cross-checked.
    pub fn load_suite(&self) -> Result<(FeatureSchema, ModelSuite)> {
        tracing::info!("Loading artifacts from '{}'", self.dir.display());

        let schema = self.load_schema()?;
        let width  = schema.len();

        let scaler = self.load_scaler()?;
        if scaler.width() != width {
            bail!(
                "scaler was fitted on {} features but the schema lists {}",
                scaler.width(),
                width
            );
        }

        let crop_labels       = self.load_labels(CROP_LABELS)?;
        let fertilizer_labels = self.load_labels(FERTILIZER_LABELS)?;

        let device = InferDevice::default();
        let crop_model = self.load_model::<InferBackend>(CROP_MODEL, &device)?;
        check_model(CROP_MODEL, &crop_model, TabularTask::Classification, width, crop_labels.classes().len())?;

        let yield_model = self.load_model::<InferBackend>(YIELD_MODEL, &device)?;
        check_model(YIELD_MODEL, &yield_model, TabularTask::Regression, width, 1)?;

        let fertilizer_model = self.load_model::<InferBackend>(FERTILIZER_MODEL, &device)?;
        check_model(
            FERTILIZER_MODEL,
            &fertilizer_model,
            TabularTask::Classification,
            width,
            fertilizer_labels.classes().len(),
        )?;

        tracing::info!(
            features    = width,
            crops       = crop_labels.classes().len(),
            fertilizers = fertilizer_labels.classes().len(),
            "Artifacts loaded"
        );

        let suite = ModelSuite {
            scaler:            Box::new(scaler),
            crop_model:        Box::new(TabularClassifier::new(crop_model.net, device.clone())),
            yield_model:       Box::new(TabularRegressor::new(yield_model.net, device.clone())),
            fertilizer_model:  Box::new(TabularClassifier::new(fertilizer_model.net, device)),
            crop_labels:       Box::new(crop_labels),
            fertilizer_labels: Box::new(fertilizer_labels),
        };
        Ok((schema, suite))
    }

    /// Read `schema.json` and fold it into a validated schema.
    /// Features left out of the bound table are logged as warnings.
    pub fn load_schema(&self) -> Result<FeatureSchema> {
        let file: SchemaFile = self.read_json(SCHEMA_FILE)?;
        let schema = FeatureSchema::new(file.features, file.bounds)
            .with_context(|| format!("Invalid feature schema in '{}'", self.path(SCHEMA_FILE).display()))?;

        for spec in schema.defaulted() {
            tracing::warn!(
                "No bound configured for '{}'; defaulting to [{}, {}]",
                spec.name,
                spec.bound.min,
                spec.bound.max
            );
        }
        Ok(schema)
    }

    pub fn load_scaler(&self) -> Result<StandardScaler> {
        let scaler: StandardScaler = self.read_json(SCALER_FILE)?;
        scaler
            .checked()
            .with_context(|| format!("Invalid scaler in '{}'", self.path(SCALER_FILE).display()))
    }

    /// Load `<name>.json` as a label encoder.
    pub fn load_labels(&self, name: &str) -> Result<LabelEncoder> {
        let file    = format!("{name}.json");
        let classes = self.read_json::<Vec<String>>(&file)?;
        LabelEncoder::new(classes)
            .with_context(|| format!("Invalid labels in '{}'", self.path(&file).display()))
    }

    /// Rebuild `<name>` from its config and load its weights.
    pub fn load_model<B: Backend>(&self, name: &str, device: &B::Device) -> Result<LoadedModel<B>> {
        let config: TabularNetConfig = self.read_json(&format!("{name}.json"))?;
        let model: TabularNet<B>     = config.init(device);

        // The recorder appends its own extension
        let path   = self.dir.join(name);
        let record = Recorder::<B>::load(&CompactRecorder::new(), path.clone(), device)
            .with_context(|| format!("Cannot load weights for '{}' from '{}'", name, path.display()))?;

        tracing::debug!("Loaded model '{}'", name);
        Ok(LoadedModel { config, net: model.load_record(record) })
    }

    // ── Saving ───────────────────────────────────────────────────────────────

    /// Write a model's config and weights under `<name>`.
    pub fn save_model<B: Backend>(
        &self,
        name:   &str,
        config: &TabularNetConfig,
        model:  &TabularNet<B>,
    ) -> Result<()> {
        self.write_json(&format!("{name}.json"), config)?;

        let path = self.dir.join(name);
        Recorder::<B>::record(&CompactRecorder::new(), model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::debug!("Saved model '{}'", name);
        Ok(())
    }

    pub fn save_schema(&self, schema: &SchemaFile) -> Result<()> {
        self.write_json(SCHEMA_FILE, schema)
    }

    pub fn save_scaler(&self, scaler: &StandardScaler) -> Result<()> {
        self.write_json(SCALER_FILE, scaler)
    }

    pub fn save_labels(&self, name: &str, labels: &LabelEncoder) -> Result<()> {
        self.write_json(&format!("{name}.json"), labels)
    }

    // ── JSON helpers ─────────────────────────────────────────────────────────

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse '{}'", path.display()))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))
    }
}

/// A network together with the config it was rebuilt from.
pub struct LoadedModel<B: Backend> {
    pub config: TabularNetConfig,
    pub net:    TabularNet<B>,
}

fn check_model<B: Backend>(
    name:    &str,
    model:   &LoadedModel<B>,
    task:    TabularTask,
    inputs:  usize,
    outputs: usize,
) -> Result<()> {
    let cfg = &model.config;
    if cfg.task != task {
        bail!("'{name}' is a {:?} model, expected {:?}", cfg.task, task);
    }
    if cfg.input_dim != inputs {
        bail!("'{name}' takes {} features but the schema lists {}", cfg.input_dim, inputs);
    }
    if cfg.output_dim != outputs {
        bail!("'{name}' has {} outputs, expected {}", cfg.output_dim, outputs);
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::{Classifier, LabelDecoder, Regressor};

    const FEATURES: [&str; 3] = ["N", "ph", "rainfall"];

    /// Write a complete, consistent bundle with random weights.
    fn write_bundle(store: &ArtifactStore) {
        let device = InferDevice::default();

        let mut bounds = BTreeMap::new();
        bounds.insert("N".to_string(), BoundEntry::new(0.0, 140.0));
        bounds.insert("ph".to_string(), BoundEntry::new(3.5, 9.9));
        store
            .save_schema(&SchemaFile {
                features: FEATURES.iter().map(|s| s.to_string()).collect(),
                bounds,
            })
            .unwrap();

        store
            .save_scaler(&StandardScaler::new(vec![50.0, 6.5, 100.0], vec![30.0, 0.8, 55.0]).unwrap())
            .unwrap();

        let crops = LabelEncoder::new(vec!["rice".into(), "maize".into()]).unwrap();
        let ferts = LabelEncoder::new(vec!["Urea".into(), "DAP".into(), "28-28".into()]).unwrap();
        store.save_labels(CROP_LABELS, &crops).unwrap();
        store.save_labels(FERTILIZER_LABELS, &ferts).unwrap();

        for (name, task, out) in [
            (CROP_MODEL, TabularTask::Classification, 2),
            (YIELD_MODEL, TabularTask::Regression, 1),
            (FERTILIZER_MODEL, TabularTask::Classification, 3),
        ] {
            let cfg = TabularNetConfig::new(task, FEATURES.len(), 8, out);
            let net: TabularNet<InferBackend> = cfg.init(&device);
            store.save_model(name, &cfg, &net).unwrap();
        }
    }

    #[test]
    fn test_loads_consistent_bundle() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        write_bundle(&store);

        let (schema, suite) = store.load_suite().unwrap();

        assert_eq!(schema.names().collect::<Vec<_>>(), FEATURES);
        assert_eq!(schema.defaulted().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["rainfall"]);
        assert_eq!(suite.scaler.width(), 3);
        assert_eq!(suite.crop_labels.len(), 2);

        let scaled = suite.scaler.transform(&[90.0, 6.5, 202.0]).unwrap();
        let crop   = suite.crop_model.predict_class(&scaled).unwrap();
        assert!(crop < 2);
        assert!(suite.yield_model.predict_value(&scaled).unwrap().is_finite());
        let fert = suite.fertilizer_model.predict_class(&scaled).unwrap();
        assert!(suite.fertilizer_labels.decode(fert).is_ok());
    }

    #[test]
    fn test_reloaded_models_agree() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        write_bundle(&store);

        let (_, a) = store.load_suite().unwrap();
        let (_, b) = store.load_suite().unwrap();
        let row = [0.4, -1.0, 2.0];

        assert_eq!(
            a.yield_model.predict_value(&row).unwrap(),
            b.yield_model.predict_value(&row).unwrap()
        );
        assert_eq!(
            a.crop_model.predict_class(&row).unwrap(),
            b.crop_model.predict_class(&row).unwrap()
        );
    }

    #[test]
    fn test_scaler_width_mismatch_fails_fast() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        write_bundle(&store);
        store
            .save_scaler(&StandardScaler::new(vec![0.0; 2], vec![1.0; 2]).unwrap())
            .unwrap();

        let err = store.load_suite().err().unwrap();
        assert!(err.to_string().contains("scaler"));
    }

    #[test]
    fn test_label_count_must_match_classifier_outputs() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        write_bundle(&store);
        let crops = LabelEncoder::new(vec!["rice".into()]).unwrap();
        store.save_labels(CROP_LABELS, &crops).unwrap();

        let err = store.load_suite().err().unwrap();
        assert!(err.to_string().contains(CROP_MODEL));
    }

    #[test]
    fn test_bound_for_unknown_feature_is_rejected() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let mut bounds = BTreeMap::new();
        bounds.insert("Zn".to_string(), BoundEntry::new(0.0, 1.0));
        store
            .save_schema(&SchemaFile { features: vec!["N".into()], bounds })
            .unwrap();

        assert!(store.load_schema().is_err());
    }

    #[test]
    fn test_missing_directory_names_the_file() {
        let store = ArtifactStore::new("does/not/exist");
        let err   = store.load_schema().unwrap_err();
        assert!(err.to_string().contains(SCHEMA_FILE));
    }
}
