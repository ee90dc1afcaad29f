//! Logic error types

use crate::{ErrorCode, SourceLocation, Span, LOGIC0400};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A diagnostic message with location and help text, ready for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Source location (criteria text only)
    pub location: Option<SourceLocation>,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            help: code.info().help.map(str::to_string),
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic with terminal colors
    #[cfg(feature = "colored")]
    pub fn to_colored_string(&self) -> String {
        use colored::Colorize;

        let mut out = format!("{} {}", format!("error[{}]:", self.code).red().bold(), self.message);
        if let Some(loc) = &self.location {
            out.push_str(&format!(" at {}", loc.to_string().cyan()));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n  {} {}", "help:".green().bold(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} - {}", self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Umbrella error for parsing, validating and evaluating criteria
#[derive(Debug, Clone, Error)]
pub enum LogicError {
    /// Criteria text could not be parsed
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        source_text: String,
        location: Option<SourceLocation>,
    },

    /// Criteria construction rejected an operator/operand/reference combination
    #[error("{code}: {message}")]
    Validation { code: ErrorCode, message: String },

    /// Evaluation aborted
    #[error("{code}: {message}")]
    Evaluation { code: ErrorCode, message: String },

    /// The observation source failed
    #[error("{code}: {message}")]
    DataAccess { code: ErrorCode, message: String },

    /// System error (I/O, configuration)
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },
}

impl LogicError {
    pub fn parse(code: ErrorCode, message: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            source_text: source_text.into(),
            location: None,
        }
    }

    /// Create a parse error pointing at a byte offset of the source
    pub fn parse_at(code: ErrorCode, message: impl Into<String>, source_text: &str, offset: usize) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            source_text: source_text.to_string(),
            location: Some(SourceLocation::from_span(Span::point(offset), source_text)),
        }
    }

    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn evaluation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Evaluation {
            code,
            message: message.into(),
        }
    }

    pub fn data_access(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::DataAccess {
            code,
            message: message.into(),
        }
    }

    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::system(LOGIC0400, message)
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. }
            | Self::Validation { code, .. }
            | Self::Evaluation { code, .. }
            | Self::DataAccess { code, .. }
            | Self::System { code, .. } => *code,
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Parse { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            Self::Parse { message, .. }
            | Self::Validation { message, .. }
            | Self::Evaluation { message, .. }
            | Self::DataAccess { message, .. }
            | Self::System { message, .. } => message.clone(),
        };
        let diag = Diagnostic::new(self.code(), message);
        match self.location() {
            Some(loc) => diag.with_location(loc.clone()),
            None => diag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LOGIC0001, LOGIC0102};

    #[test]
    fn test_parse_error_location() {
        let err = LogicError::parse_at(LOGIC0001, "Unexpected '}'", "WEIGHT >\n }", 10);

        assert!(matches!(err, LogicError::Parse { .. }));
        assert_eq!(err.code(), LOGIC0001);
        let loc = err.location().unwrap();
        assert_eq!((loc.line, loc.column), (2, 2));
    }

    #[test]
    fn test_diagnostic_carries_help() {
        let diag = LogicError::validation(LOGIC0102, "GREATER THAN not allowed").to_diagnostic();

        assert!(diag.help.is_some());
        assert!(diag.to_string().contains("LOGIC0102"));
        assert!(diag.location.is_none());
    }
}
