// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No burn code here (Layer 5)
//   - No printing here (Layer 1)
//   - No file access here (Layer 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Validated vector → scaled once → crop / yield / fertilizer
pub mod dispatcher;

/// COLLECTING / REVIEWING phase machine
pub mod session;

/// Start-up wiring: artifacts → dispatcher → session
pub mod advise_use_case;
