// ============================================================
// Layer 3 — Feature Schema and Bound Table
// ============================================================
// The ordered list of required input features, each paired with
// its inclusive [min, max] bound.
//
// Order matters: it is the column layout of every row handed to
// the scaler and the three models.
//
// A feature without a bound entry falls back to
// [0.0, DEFAULT_MAX_BOUND]. That fallback is kept so older
// artifact bundles still load, but every defaulted feature is
// reported so an incomplete bound table is visible at start-up.
//
// Reference: Rust Book §8 (Collections)

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::error::SchemaError;

/// Lower bound used when the bound table is silent.
pub const DEFAULT_MIN_BOUND: f64 = 0.0;

/// Upper bound used when the bound table is silent.
pub const DEFAULT_MAX_BOUND: f64 = 1e9;

/// Inclusive numeric range a single feature must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both ends are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for Bound {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_BOUND, max: DEFAULT_MAX_BOUND }
    }
}

/// One bound-table row as written in `schema.json`.
/// Either side may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl BoundEntry {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max) }
    }

    fn resolve(&self) -> Bound {
        Bound {
            min: self.min.unwrap_or(DEFAULT_MIN_BOUND),
            max: self.max.unwrap_or(DEFAULT_MAX_BOUND),
        }
    }
}

/// A required feature: its name and the range it must fall in.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpec {
    pub name:  String,
    pub bound: Bound,
    /// True when the bound came from the fallback rather than the table
    pub defaulted: bool,
}

/// The ordered, validated feature schema with its bound table folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    /// Build a schema from an ordered name list and a bound table.
    ///
    /// Fails when the name list is empty, contains duplicates, when the
    /// table mentions a feature the list does not, or when a bound is
    /// inverted or not finite. Features missing from the table get the
    /// default bound and are flagged as `defaulted`.
    pub fn new(
        names:  Vec<String>,
        bounds: BTreeMap<String, BoundEntry>,
    ) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateFeature(name.clone()));
            }
        }

        if let Some(stray) = bounds.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(SchemaError::UnknownBound(stray.clone()));
        }

        let mut features = Vec::with_capacity(names.len());
        for name in names {
            let (bound, defaulted) = match bounds.get(&name) {
                Some(entry) => (entry.resolve(), false),
                None        => (Bound::default(), true),
            };

            if !bound.min.is_finite() || !bound.max.is_finite() {
                return Err(SchemaError::NonFiniteBound(name));
            }
            if bound.min > bound.max {
                return Err(SchemaError::InvertedBound {
                    feature: name,
                    min:     bound.min,
                    max:     bound.max,
                });
            }

            features.push(FeatureSpec { name, bound, defaulted });
        }

        Ok(Self { features })
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }

    pub fn bound(&self, name: &str) -> Option<Bound> {
        self.features.iter().find(|f| f.name == name).map(|f| f.bound)
    }

    /// Features whose bound came from the fallback instead of the table.
    pub fn defaulted(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.features.iter().filter(|f| f.defaulted)
    }
}
