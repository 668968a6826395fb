// ============================================================
// Layer 2 — Session / Phase Controller
// ============================================================
// Drives one user through the two-phase interaction:
//
//   COLLECTING ──submit (valid, non-zero, models ok)──▶ REVIEWING
//       ▲                                                  │
//       └──────────────────── reset ───────────────────────┘
//
// In COLLECTING, keystrokes overwrite the raw record. Submit
// marks the session as "attempted" (so blank fields start
// showing errors), validates, runs the all-zero guard, then
// dispatches. Only when all three succeed is the vector and
// its result committed, in one step, together with the phase
// change. On any failure the raw record is left exactly as the
// user typed it.
//
// In REVIEWING the vector and result are fixed. Reset clears
// the record and the attempted flag and goes back.
//
// Anything else (typing or submitting while reviewing, reset
// while collecting) is ignored and reported to the caller.

use crate::application::dispatcher::PredictionDispatcher;
use crate::domain::{
    error::{InputError, SubmitError, ValidationError},
    input::{FeatureVector, RawInputRecord},
    prediction::PredictionResult,
    schema::FeatureSchema,
    validator::{self, Validation},
};

// ─── Session State ────────────────────────────────────────────────────────────
/// Which half of the interaction the user is in.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Collecting,
    /// The committed vector and the prediction computed for it
    Reviewing {
        vector: FeatureVector,
        result: PredictionResult,
    },
}

/// All mutable state of one interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub raw:       RawInputRecord,
    pub phase:     Phase,
    /// Set by the first submit; makes blank fields count as errors
    pub attempted: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            raw:       RawInputRecord::new(),
            phase:     Phase::Collecting,
            attempted: false,
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.phase, Phase::Collecting)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ─── View Model ───────────────────────────────────────────────────────────────
/// How loudly a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub severity: Severity,
    pub text:     String,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self { severity, text: text.into() }
    }
}

/// One input field as the presentation layer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPrompt {
    pub name:  String,
    pub min:   f64,
    pub max:   f64,
    pub raw:   String,
    pub error: Option<String>,
}

impl FieldPrompt {
    /// e.g. "N (Min: 0, Max: 140)"
    pub fn label(&self) -> String {
        format!("{} (Min: {}, Max: {})", self.name, self.min, self.max)
    }
}

/// Everything the presentation layer needs to draw the current phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Collecting {
        fields:  Vec<FieldPrompt>,
        /// Global warning when any field currently errors
        warning: Option<Message>,
    },
    Reviewing {
        results: Vec<Message>,
    },
}

/// What a reset did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset,
    /// Already collecting; nothing changed
    Ignored,
}

// ─── SessionController ────────────────────────────────────────────────────────
pub struct SessionController {
    schema:     FeatureSchema,
    dispatcher: PredictionDispatcher,
    session:    Session,
}

impl SessionController {
    pub fn new(schema: FeatureSchema, dispatcher: PredictionDispatcher) -> Self {
        Self { schema, dispatcher, session: Session::new() }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The committed prediction, if reviewing.
    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.session.phase {
            Phase::Reviewing { result, .. } => Some(result),
            Phase::Collecting               => None,
        }
    }

    /// Record one keystroke: overwrite the raw text of `field`.
    pub fn input(&mut self, field: &str, raw: impl Into<String>) -> Result<(), InputError> {
        if !self.session.is_collecting() {
            return Err(InputError::NotCollecting);
        }
        if !self.schema.contains(field) {
            return Err(InputError::UnknownField(field.to_string()));
        }
        self.session.raw.set(field, raw);
        Ok(())
    }

    /// Current field errors, gated by the attempted flag.
    pub fn field_errors(&self) -> Vec<ValidationError> {
        if !self.session.is_collecting() {
            return Vec::new();
        }
        validator::validate(&self.schema, &self.session.raw, self.session.attempted)
            .errors()
            .to_vec()
    }

    /// Try to move from COLLECTING to REVIEWING.
    pub fn submit(&mut self) -> Result<PredictionResult, SubmitError> {
        if !self.session.is_collecting() {
            return Err(SubmitError::NotCollecting);
        }
        self.session.attempted = true;

        let vector = match validator::validate(&self.schema, &self.session.raw, true) {
            Validation::Complete(v) => v,
            Validation::Incomplete { errors } => {
                tracing::warn!(errors = errors.len(), "submission rejected");
                return Err(SubmitError::Invalid(errors));
            }
        };

        if validator::reject_degenerate(&vector).is_err() {
            tracing::warn!("submission rejected: every feature is zero");
            return Err(SubmitError::Degenerate);
        }

        let result = self.dispatcher.dispatch(&vector).map_err(|e| {
            tracing::error!("prediction failed: {e:#}");
            SubmitError::ModelFailure(format!("{e:#}"))
        })?;

        tracing::info!(%result, "committed feature vector");
        self.session.phase = Phase::Reviewing { vector, result: result.clone() };
        Ok(result)
    }

    /// Leave REVIEWING and start over with an empty form.
    pub fn reset(&mut self) -> ResetOutcome {
        if self.session.is_collecting() {
            return ResetOutcome::Ignored;
        }
        self.session = Session::new();
        tracing::info!("session reset for new values");
        ResetOutcome::Reset
    }

    /// Build the view for the current phase.
    pub fn view(&self) -> SessionView {
        match &self.session.phase {
            Phase::Collecting => {
                let errors = self.field_errors();
                let fields = self
                    .schema
                    .features()
                    .iter()
                    .map(|spec| FieldPrompt {
                        name:  spec.name.clone(),
                        min:   spec.bound.min,
                        max:   spec.bound.max,
                        raw:   self.session.raw.get(&spec.name).to_string(),
                        error: errors
                            .iter()
                            .find(|e| e.field() == Some(spec.name.as_str()))
                            .map(ToString::to_string),
                    })
                    .collect();
                let warning = (!errors.is_empty()).then(|| {
                    Message::new(Severity::Warning, SubmitError::Invalid(errors).to_string())
                });
                SessionView::Collecting { fields, warning }
            }
            Phase::Reviewing { result, .. } => SessionView::Reviewing {
                results: vec![
                    Message::new(Severity::Success, format!("Recommended Crop: {}", result.crop)),
                    Message::new(Severity::Info, format!("Predicted Yield: {}", result.yield_display())),
                    Message::new(
                        Severity::Warning,
                        format!("Recommended Fertilizer: {}", result.fertilizer),
                    ),
                ],
            },
        }
    }
}
