//! Logic error codes following a structured numbering system
//!
//! Error code ranges:
//! - LOGIC0001-LOGIC0099: Parse errors (criteria text syntax)
//! - LOGIC0100-LOGIC0199: Validation errors (criteria construction)
//! - LOGIC0200-LOGIC0299: Evaluation errors
//! - LOGIC0300-LOGIC0399: Data access errors (observation sources)
//! - LOGIC0400-LOGIC0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a parse error (0001-0099)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a validation error (0100-0199)
    pub const fn is_validation_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an evaluation error (0200-0299)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a data access error (0300-0399)
    pub const fn is_data_access_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LOGIC{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Parse errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unexpected token"));
    map.insert(2, ErrorInfo::new("Unexpected end of input"));
    map.insert(3, ErrorInfo::new("Invalid literal"));
    map.insert(4, ErrorInfo::new("Unterminated string literal"));
    map.insert(5, ErrorInfo::new("Invalid number format"));
    map.insert(6, ErrorInfo::new("Invalid date/time format"));
    map.insert(7, ErrorInfo::new("Invalid operator"));
    map.insert(8, ErrorInfo::new("Missing closing delimiter"));
    map.insert(9, ErrorInfo::new("Criteria nested too deeply")
        .with_help("Flatten the parenthesized groups"));

    // Validation errors (0100-0199)
    map.insert(100, ErrorInfo::new("Unknown data reference")
        .with_help("Declare the concept in the concept dictionary before using it"));
    map.insert(101, ErrorInfo::new("Type mismatch"));
    map.insert(102, ErrorInfo::new("Ordering operator on coded value")
        .with_help("Coded references only support EQUALS and NOT EQUALS"));
    map.insert(103, ErrorInfo::new("Empty composite criteria"));
    map.insert(104, ErrorInfo::new("Invalid operand"));
    map.insert(105, ErrorInfo::new("Invalid time window")
        .with_help("The window start must not be after its end"));
    map.insert(106, ErrorInfo::new("Unknown operator"));

    // Evaluation errors (0200-0299)
    map.insert(200, ErrorInfo::new("Evaluation failed"));
    map.insert(201, ErrorInfo::new("Maximum criteria depth exceeded"));

    // Data access errors (0300-0399)
    map.insert(300, ErrorInfo::new("Observation fetch failed"));
    map.insert(301, ErrorInfo::new("Data source unavailable"));
    map.insert(302, ErrorInfo::new("Invalid observation record"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));
    map.insert(403, ErrorInfo::new("Invalid format"));

    map
});

// Parse errors
pub const LOGIC0001: ErrorCode = ErrorCode::new(1);
pub const LOGIC0002: ErrorCode = ErrorCode::new(2);
pub const LOGIC0003: ErrorCode = ErrorCode::new(3);
pub const LOGIC0004: ErrorCode = ErrorCode::new(4);
pub const LOGIC0005: ErrorCode = ErrorCode::new(5);
pub const LOGIC0006: ErrorCode = ErrorCode::new(6);
pub const LOGIC0007: ErrorCode = ErrorCode::new(7);
pub const LOGIC0008: ErrorCode = ErrorCode::new(8);
pub const LOGIC0009: ErrorCode = ErrorCode::new(9);

// Validation errors
pub const LOGIC0100: ErrorCode = ErrorCode::new(100);
pub const LOGIC0101: ErrorCode = ErrorCode::new(101);
pub const LOGIC0102: ErrorCode = ErrorCode::new(102);
pub const LOGIC0103: ErrorCode = ErrorCode::new(103);
pub const LOGIC0104: ErrorCode = ErrorCode::new(104);
pub const LOGIC0105: ErrorCode = ErrorCode::new(105);
pub const LOGIC0106: ErrorCode = ErrorCode::new(106);

// Evaluation errors
pub const LOGIC0200: ErrorCode = ErrorCode::new(200);
pub const LOGIC0201: ErrorCode = ErrorCode::new(201);

// Data access errors
pub const LOGIC0300: ErrorCode = ErrorCode::new(300);
pub const LOGIC0301: ErrorCode = ErrorCode::new(301);
pub const LOGIC0302: ErrorCode = ErrorCode::new(302);

// System errors
pub const LOGIC0400: ErrorCode = ErrorCode::new(400);
pub const LOGIC0401: ErrorCode = ErrorCode::new(401);
pub const LOGIC0402: ErrorCode = ErrorCode::new(402);
pub const LOGIC0403: ErrorCode = ErrorCode::new(403);
