// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for everything the user or the artifact bundle
// can get wrong. Field errors are collected, never fail-fast,
// so every mistake is shown in one pass.
//
// Glue code in the other layers uses anyhow; these enums are
// what the session and the CLI match on.

use thiserror::Error;

use crate::domain::schema::Bound;

/// A problem with a single field, or with the vector as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field left empty after the user pressed submit
    #[error("Please enter a value for {field}.")]
    MissingField { field: String },

    /// Field text is not a finite number
    #[error("{field} must be a number.")]
    NotANumber { field: String, raw: String },

    /// Parsed value outside the inclusive bound
    #[error("{field} must be {}", bound_violation(.value, .bound))]
    OutOfBounds { field: String, value: f64, bound: Bound },

    /// Every feature is exactly zero
    #[error("Please fill in all fields. The inputs cannot all be zero.")]
    DegenerateInput,
}

impl ValidationError {
    /// The field this error belongs to; `None` for collective errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::NotANumber { field, .. }
            | Self::OutOfBounds { field, .. } => Some(field),
            Self::DegenerateInput => None,
        }
    }
}

fn bound_violation(value: &f64, bound: &Bound) -> String {
    if *value < bound.min {
        format!("≥ {}", bound.min)
    } else {
        format!("≤ {}", bound.max)
    }
}

/// Why a submit did not commit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// One or more fields failed validation
    #[error("Please correct the invalid input(s) before proceeding.")]
    Invalid(Vec<ValidationError>),

    /// The vector was complete but all zero
    #[error("{}", ValidationError::DegenerateInput)]
    Degenerate,

    /// Scaler, model or decoder rejected the request
    #[error("Prediction failed: {0}")]
    ModelFailure(String),

    /// Submit pressed while results are on screen
    #[error("Results are already shown; reset to enter new values.")]
    NotCollecting,
}

/// A keystroke that could not be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown field '{0}'.")]
    UnknownField(String),

    #[error("Results are already shown; reset to enter new values.")]
    NotCollecting,
}

/// Inconsistency between the feature list and the bound table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("feature schema is empty")]
    Empty,

    #[error("feature schema contains a blank name")]
    BlankName,

    #[error("feature '{0}' is listed more than once")]
    DuplicateFeature(String),

    #[error("bound table names '{0}', which is not in the feature schema")]
    UnknownBound(String),

    #[error("bound for '{0}' is not a finite number")]
    NonFiniteBound(String),

    #[error("bound for '{feature}' is inverted: min {min} > max {max}")]
    InvertedBound { feature: String, min: f64, max: f64 },
}
