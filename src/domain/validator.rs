// ============================================================
// Layer 3 — Input Validator
// ============================================================
// Turns the raw text the user typed into a FeatureVector, or
// explains every field that is wrong.
//
// Per field, in schema order (all fields, never stopping early):
//   1. blank      → MissingField   (only once submit was pressed;
//                                   before that it is just pending)
//   2. not finite → NotANumber
//   3. outside    → OutOfBounds    (bounds are inclusive)
//   4. otherwise the value is accepted
//
// A vector is produced only when every field is accepted.
// The all-zero check is a separate guard, `reject_degenerate`,
// run on a complete vector right before dispatch.
//
// Nothing here mutates the raw record or the session.

use crate::domain::{
    error::ValidationError,
    input::{FeatureVector, RawInputRecord},
    schema::{FeatureSchema, FeatureSpec},
};

/// Result of validating one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every field accepted
    Complete(FeatureVector),

    /// At least one field is erroneous or still pending.
    /// `errors` is empty when the only problem is untouched fields
    /// before the first submit.
    Incomplete { errors: Vec<ValidationError> },
}

impl Validation {
    pub fn is_complete(&self) -> bool {
        matches!(self, Validation::Complete(_))
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Validation::Complete(_)           => &[],
            Validation::Incomplete { errors } => errors,
        }
    }
}

/// Outcome for a single field.
enum FieldCheck {
    Accepted(f64),
    Pending,
    Rejected(ValidationError),
}

/// Validate `raw` against `schema`.
///
/// `attempted` says whether the user has pressed submit at least once;
/// it decides whether blank fields count as errors or as pending.
pub fn validate(schema: &FeatureSchema, raw: &RawInputRecord, attempted: bool) -> Validation {
    let mut values  = Vec::with_capacity(schema.len());
    let mut errors  = Vec::new();
    let mut pending = false;

    for spec in schema.features() {
        match check_field(spec, raw.get(&spec.name), attempted) {
            FieldCheck::Accepted(v)  => values.push(v),
            FieldCheck::Pending      => pending = true,
            FieldCheck::Rejected(e)  => errors.push(e),
        }
    }

    if errors.is_empty() && !pending {
        let names = schema.names().map(str::to_string).collect();
        Validation::Complete(FeatureVector::from_parts(names, values))
    } else {
        Validation::Incomplete { errors }
    }
}

fn check_field(spec: &FeatureSpec, raw: &str, attempted: bool) -> FieldCheck {
    let text = raw.trim();

    if text.is_empty() {
        return if attempted {
            FieldCheck::Rejected(ValidationError::MissingField { field: spec.name.clone() })
        } else {
            FieldCheck::Pending
        };
    }

    // "NaN" and "inf" parse as f64 but are not measurements
    let value = match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return FieldCheck::Rejected(ValidationError::NotANumber {
                field: spec.name.clone(),
                raw:   raw.to_string(),
            })
        }
    };

    if !spec.bound.contains(value) {
        return FieldCheck::Rejected(ValidationError::OutOfBounds {
            field: spec.name.clone(),
            value,
            bound: spec.bound,
        });
    }

    FieldCheck::Accepted(value)
}

/// Reject a vector whose values are all exactly zero.
///
/// Zero is what an untouched numeric field shows, so an all-zero row
/// is treated as "not filled in" even though each zero may be in bounds.
pub fn reject_degenerate(vector: &FeatureVector) -> Result<(), ValidationError> {
    if vector.is_all_zero() {
        Err(ValidationError::DegenerateInput)
    } else {
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::schema::BoundEntry;

    const FEATURES: [(&str, f64, f64); 7] = [
        ("N",           0.0, 140.0),
        ("P",           5.0, 145.0),
        ("K",           5.0, 205.0),
        ("temperature", 8.0,  44.0),
        ("humidity",   14.0, 100.0),
        ("ph",          3.5,   9.9),
        ("rainfall",   20.0, 300.0),
    ];

    fn schema() -> FeatureSchema {
        let names = FEATURES.iter().map(|(n, _, _)| n.to_string()).collect();
        let bounds: BTreeMap<String, BoundEntry> = FEATURES
            .iter()
            .map(|(n, lo, hi)| (n.to_string(), BoundEntry::new(*lo, *hi)))
            .collect();
        FeatureSchema::new(names, bounds).unwrap()
    }

    fn valid_raw() -> RawInputRecord {
        [
            ("N", "90"), ("P", "42"), ("K", "43"), ("temperature", "20.8"),
            ("humidity", "82"), ("ph", "6.5"), ("rainfall", "202.9"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_valid_input_yields_vector_in_schema_order() {
        let v = validate(&schema(), &valid_raw(), true);
        match v {
            Validation::Complete(vector) => {
                assert_eq!(vector.values(), &[90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
                assert_eq!(vector.get("N"), Some(90.0));
                assert_eq!(vector.names()[6], "rainfall");
            }
            other => panic!("expected complete vector, got {other:?}"),
        }
    }

    #[test]
    fn test_above_maximum_is_rejected_with_message() {
        let mut raw = valid_raw();
        raw.set("N", "150");

        let v = validate(&schema(), &raw, true);

        assert!(!v.is_complete());
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()[0].to_string(), "N must be ≤ 140");
        // Validation never touches the record
        assert_eq!(raw.get("N"), "150");
    }

    #[test]
    fn test_bounds_are_inclusive_at_both_ends() {
        let mut raw = valid_raw();
        raw.set("P", "5");
        raw.set("K", "205");
        assert!(validate(&schema(), &raw, true).is_complete());

        raw.set("P", "4");
        raw.set("K", "206");
        let v = validate(&schema(), &raw, true);
        let fields: Vec<_> = v.errors().iter().filter_map(|e| e.field()).collect();
        assert_eq!(fields, vec!["P", "K"]);
    }

    #[test]
    fn test_collects_every_error_not_just_first() {
        let mut raw = valid_raw();
        raw.set("N", "abc");
        raw.set("ph", "15");
        raw.set("rainfall", "");

        let v = validate(&schema(), &raw, true);

        assert!(matches!(v.errors()[0], ValidationError::NotANumber { .. }));
        assert!(matches!(v.errors()[1], ValidationError::OutOfBounds { .. }));
        assert!(matches!(v.errors()[2], ValidationError::MissingField { .. }));
        assert_eq!(v.errors().len(), 3);
    }

    #[test]
    fn test_blank_fields_are_pending_before_first_submit() {
        let mut raw = RawInputRecord::new();
        raw.set("N", "90");

        let before = validate(&schema(), &raw, false);
        assert!(!before.is_complete());
        assert!(before.errors().is_empty());

        let after = validate(&schema(), &raw, true);
        assert_eq!(after.errors().len(), 6);
        assert!(after
            .errors()
            .iter()
            .all(|e| matches!(e, ValidationError::MissingField { .. })));
    }

    #[test]
    fn test_only_blank_field_reports_missing() {
        let mut raw = valid_raw();
        raw.set("humidity", "   ");

        let v = validate(&schema(), &raw, true);

        assert_eq!(
            v.errors(),
            &[ValidationError::MissingField { field: "humidity".into() }]
        );
    }

    #[test]
    fn test_out_of_bounds_shown_before_first_submit() {
        let mut raw = RawInputRecord::new();
        raw.set("N", "500");

        let v = validate(&schema(), &raw, false);
        assert_eq!(v.errors().len(), 1);
        assert_eq!(v.errors()[0].field(), Some("N"));
    }

    #[test]
    fn test_non_finite_text_is_not_a_number() {
        for text in ["NaN", "inf", "-infinity", "1e999"] {
            let mut raw = valid_raw();
            raw.set("humidity", text);
            let v = validate(&schema(), &raw, true);
            assert!(
                matches!(v.errors()[0], ValidationError::NotANumber { .. }),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut raw = valid_raw();
        raw.set("N", "  90 ");
        assert!(validate(&schema(), &raw, true).is_complete());
    }

    #[test]
    fn test_all_zero_vector_is_degenerate() {
        let names = FEATURES.iter().map(|(n, _, _)| n.to_string()).collect();
        let bounds = FEATURES
            .iter()
            .map(|(n, _, hi)| (n.to_string(), BoundEntry::new(0.0, *hi)))
            .collect();
        let zero_ok = FeatureSchema::new(names, bounds).unwrap();
        let raw: RawInputRecord = FEATURES.iter().map(|(n, _, _)| (*n, "0")).collect();

        let vector = match validate(&zero_ok, &raw, true) {
            Validation::Complete(v) => v,
            other => panic!("zeros are in bounds, got {other:?}"),
        };
        assert_eq!(reject_degenerate(&vector), Err(ValidationError::DegenerateInput));
    }

    #[test]
    fn test_some_zeros_are_not_degenerate() {
        let mut raw = valid_raw();
        raw.set("N", "0");
        let vector = match validate(&schema(), &raw, true) {
            Validation::Complete(v) => v,
            other => panic!("expected complete vector, got {other:?}"),
        };
        assert_eq!(reject_degenerate(&vector), Ok(()));
    }
}
