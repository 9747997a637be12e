//! Error taxonomy for the survival core.
use thiserror::Error;

/// Errors raised when an operation receives illegal input or a record
/// cannot be turned back into game state.
///
/// Clamping of vitals and skill ceilings is defined behavior and never
/// surfaces here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    #[error("range minimum {min} must not exceed maximum {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("missing required keys: {}", .0.join(", "))]
    MissingField(Vec<String>),
    #[error("corrupt record: {0}")]
    CorruptRecord(String),
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

impl GameError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Reject negative or non-finite magnitudes.
    pub(crate) fn check_magnitude(field: &'static str, value: f64) -> Result<(), Self> {
        if !value.is_finite() {
            return Err(Self::invalid(field, format!("must be finite (got {value})")));
        }
        if value < 0.0 {
            return Err(Self::invalid(
                field,
                format!("must be non-negative (got {value})"),
            ));
        }
        Ok(())
    }
}
