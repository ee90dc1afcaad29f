//! Evaluation errors

use octofhir_logic_diagnostics::{ErrorCode, LogicError, LOGIC0200, LOGIC0201};
use octofhir_logic_model::DataAccessError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while evaluating criteria
///
/// Type incompatibilities are not among them: those are rejected when the
/// criteria are built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Failure of the observation source, passed through unchanged
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// Criteria nested deeper than the configured limit
    #[error("Criteria depth {depth} exceeds the maximum of {max}")]
    RecursionLimit { depth: usize, max: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EvalError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DataAccess(err) => err.code(),
            Self::RecursionLimit { .. } => LOGIC0201,
            Self::Internal(_) => LOGIC0200,
        }
    }
}

impl From<EvalError> for LogicError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::DataAccess(err) => err.into(),
            other => LogicError::evaluation(other.code(), other.to_string()),
        }
    }
}
