//! Data access errors

use octofhir_logic_diagnostics::{
    ErrorCode, LogicError, LOGIC0300, LOGIC0301, LOGIC0302, LOGIC0401, LOGIC0403,
};
use thiserror::Error;

/// Failure reported by an observation source or while loading data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataAccessError {
    #[error("Fetch of '{reference}' failed: {message}")]
    FetchFailed { reference: String, message: String },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid observation record '{id}': {message}")]
    InvalidRecord { id: String, message: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DataAccessError {
    pub fn fetch_failed(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            reference: reference.into(),
            message: message.into(),
        }
    }

    pub fn invalid_record(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::FetchFailed { .. } => LOGIC0300,
            Self::Unavailable(_) => LOGIC0301,
            Self::InvalidRecord { .. } => LOGIC0302,
            Self::Io(_) => LOGIC0401,
            Self::Parse(_) => LOGIC0403,
        }
    }
}

impl From<std::io::Error> for DataAccessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DataAccessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<DataAccessError> for LogicError {
    fn from(err: DataAccessError) -> Self {
        let code = err.code();
        if code.is_system_error() {
            LogicError::system(code, err.to_string())
        } else {
            LogicError::data_access(code, err.to_string())
        }
    }
}
