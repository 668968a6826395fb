// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File access for the model store:
//
//   artifact_store.rs — reads schema.json, scaler.json, the two
//                       label files and the three burn models
//                       from the artifacts directory, and checks
//                       that widths and class counts line up
//                       before anything is served.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model store: load and cross-check every artifact
pub mod artifact_store;
