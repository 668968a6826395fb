// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// advisor works with: the feature schema and its bounds, the
// raw and validated input, the prediction result, the error
// taxonomy, and the validator that connects raw to validated.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain Rust and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Ordered feature list with its inclusive bound table
pub mod schema;

/// Raw text per field, and the validated numeric row
pub mod input;

/// Crop / yield / fertilizer triple
pub mod prediction;

/// Field, submit, input and schema errors
pub mod error;

/// Raw record → feature vector, plus the all-zero guard
pub mod validator;

/// Scaler, classifier, regressor and label-decoder seams
pub mod traits;
