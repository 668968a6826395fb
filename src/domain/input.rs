// ============================================================
// Layer 3 — Raw Input Record and Feature Vector
// ============================================================
// The two shapes user input takes:
//
//   RawInputRecord  — whatever the user last typed, per field,
//                     as text. Lives only while collecting.
//   FeatureVector   — the validated numeric row, one value per
//                     schema feature, in schema order. Only the
//                     validator builds one, so holding a
//                     FeatureVector means every value passed.
//
// Reference: Rust Book §5 (Structs), §8 (Collections)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw text per feature name. Missing keys read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputRecord {
    values: BTreeMap<String, String>,
}

impl RawInputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the text for one field.
    pub fn set(&mut self, field: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(field.into(), raw.into());
    }

    /// The last text typed for `field`, or "" if nothing was typed.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// True when no field holds any non-blank text.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawInputRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A complete, in-bounds numeric row in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names:  Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Only the validator assembles vectors; `names` and `values` are
    /// the same length and in schema order.
    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    /// The row as the scaler sees it.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_all_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}
