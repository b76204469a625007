//! Library error type
//!
//! Degenerate business inputs (zero revenue, non-converging IRR, a payback
//! that never happens) are resolved with sentinel values inside the engine.
//! Only malformed inputs that would silently produce misleading output are
//! surfaced as hard errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration or snapshot field that makes the whole calculation meaningless
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Projection horizon of zero months
    #[error("projection horizon must be at least 1 month")]
    EmptyHorizon,

    /// Hourly curve with fewer entries than a full year
    #[error("energy curve too short: expected at least {expected} hourly prices, got {actual}")]
    CurveTooShort { expected: usize, actual: usize },

    /// Curve with no entries at all
    #[error("energy curve is empty")]
    EmptyCurve,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
