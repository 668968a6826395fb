use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::traits::LabelDecoder;

/// Class names in id order, as fitted offline.
/// Stored as a plain JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("label encoder has no classes");
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl LabelDecoder for LabelEncoder {
    fn len(&self) -> usize {
        self.classes.len()
    }

    fn decode(&self, id: usize) -> Result<String> {
        match self.classes.get(id) {
            Some(name) => Ok(name.clone()),
            None => bail!(
                "class id {id} is out of range for {} known labels",
                self.classes.len()
            ),
        }
    }
}
