//! Errors raised while building criteria

use crate::SemanticType;
use chrono::{DateTime, Utc};
use octofhir_logic_ast::{ComparisonOperator, LogicalOperator, UnknownOperator};
use octofhir_logic_diagnostics::{
    ErrorCode, LogicError, LOGIC0100, LOGIC0101, LOGIC0102, LOGIC0103, LOGIC0104, LOGIC0105,
    LOGIC0106,
};
use thiserror::Error;

/// Operator, operand and reference incompatibilities
///
/// These are raised while criteria are constructed, before any data access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown data reference: '{name}'")]
    UnknownReference { name: String },

    #[error("Type mismatch for '{reference}': expected {expected}, found {found}")]
    TypeMismatch {
        reference: String,
        expected: SemanticType,
        found: SemanticType,
    },

    #[error("Operator {operator} cannot be applied to coded reference '{reference}'")]
    OrderingOnCoded {
        reference: String,
        operator: ComparisonOperator,
    },

    #[error("{operator} criteria requires at least one child")]
    EmptyComposite { operator: LogicalOperator },

    #[error("Invalid {expected} operand: {message}")]
    InvalidOperand {
        expected: SemanticType,
        message: String,
    },

    #[error("Invalid time window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Unknown comparison operator: '{0}'")]
    UnknownOperator(String),
}

impl ValidationError {
    pub fn invalid_operand(expected: SemanticType, message: impl Into<String>) -> Self {
        Self::InvalidOperand {
            expected,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownReference { .. } => LOGIC0100,
            Self::TypeMismatch { .. } => LOGIC0101,
            Self::OrderingOnCoded { .. } => LOGIC0102,
            Self::EmptyComposite { .. } => LOGIC0103,
            Self::InvalidOperand { .. } => LOGIC0104,
            Self::InvalidWindow { .. } => LOGIC0105,
            Self::UnknownOperator(_) => LOGIC0106,
        }
    }
}

impl From<UnknownOperator> for ValidationError {
    fn from(err: UnknownOperator) -> Self {
        Self::UnknownOperator(err.0)
    }
}

impl From<ValidationError> for LogicError {
    fn from(err: ValidationError) -> Self {
        LogicError::validation(err.code(), err.to_string())
    }
}
