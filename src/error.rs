//! Error taxonomy for the recommendation pipeline
//!
//! Each stage reports its own error type so every failure mode can be
//! triggered and asserted on in isolation. None of these escape
//! [`crate::engine::recommend`]: the engine logs them and degrades to the
//! fallback list.

use thiserror::Error;

/// Historical corpus could not be turned into records at startup.
///
/// Handling: the context starts with an empty insight table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CorpusLoadError {
    #[error("failed to read historical corpus at {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("historical corpus is missing column '{0}'")]
    MissingColumn(String),

    #[error("historical corpus column '{column}' could not be read: {reason}")]
    InvalidColumn { column: String, reason: String },
}

/// A model or encoder artifact is missing or corrupt.
///
/// Handling: the context runs fallback-only for its whole lifetime.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelLoadError {
    #[error("model artifact not found: {0}")]
    Missing(String),

    #[error("model artifact {path} could not be parsed: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("model artifact '{artifact}' is invalid: {reason}")]
    Invalid { artifact: String, reason: String },
}

/// Model invocation failed for one request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    #[error("feature '{name}' is not finite ({value})")]
    NonFiniteFeature { name: &'static str, value: f64 },

    #[error("classifier returned {got} probabilities for {expected} classes")]
    ClassWidthMismatch { expected: usize, got: usize },

    #[error("{model} produced a non-finite output")]
    NonFiniteOutput { model: &'static str },

    #[error("{model} failed: {reason}")]
    Inference { model: &'static str, reason: String },
}

/// Building an explained record failed.
///
/// Per-candidate variants cause that candidate to be skipped;
/// `NothingComposed` means every candidate was skipped.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompositionError {
    #[error("predicted {quantity} for '{crop}' is not finite")]
    NonFinitePrediction { crop: String, quantity: &'static str },

    #[error("harvest date {days} days from today is out of range for '{crop}'")]
    HarvestDateOutOfRange { crop: String, days: i64 },

    #[error("all {rejected} candidates failed composition")]
    NothingComposed { rejected: usize },
}

/// Why a request ended on the fallback list.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("model artifacts unavailable; running fallback-only")]
    FallbackOnly,

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("no crop reached the confidence threshold")]
    NoCandidates,

    #[error(transparent)]
    Composition(#[from] CompositionError),
}
