// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All burn-specific code lives here. The other layers only see
// the Layer 3 traits these types implement.
//
//   model.rs         — the tabular network (one hidden ReLU
//                      layer) shared by all three models
//
//   inferencer.rs    — Classifier / Regressor adapters that run
//                      a single scaled row through a network
//
//   scaler.rs        — the standard scaler every row passes
//                      through before any model sees it
//
//   label_encoder.rs — class id → class name
//
// Reference: Burn Book §3 (Building Blocks)

/// Tabular network architecture
pub mod model;

/// Inference adapters over burn models
pub mod inferencer;

/// Shared feature scaler
pub mod scaler;

/// Class-id decoder
pub mod label_encoder;
