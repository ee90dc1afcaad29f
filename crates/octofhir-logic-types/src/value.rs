//! Runtime values carried by observations and operands

use crate::SemanticType;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed observation or operand value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Numeric(Decimal),
    Text(String),
    Temporal(DateTime<Utc>),
    Coded(Code),
}

impl Value {
    /// Semantic type of this value
    pub const fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Numeric(_) => SemanticType::Numeric,
            Self::Text(_) => SemanticType::Text,
            Self::Temporal(_) => SemanticType::Temporal,
            Self::Coded(_) => SemanticType::Coded,
        }
    }

    pub fn as_numeric(&self) -> Option<Decimal> {
        match self {
            Self::Numeric(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Temporal(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<&Code> {
        match self {
            Self::Coded(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Temporal(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Coded(c) => write!(f, "{c}"),
        }
    }
}

/// A coded concept: code within an optional code system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Code {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            system: None,
            display: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Same concept: code and system agree, display is ignored
    pub fn equivalent(&self, other: &Code) -> bool {
        self.code == other.code && self.system == other.system
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.system {
            Some(system) => write!(f, "{system}|{}", self.code)?,
            None => write!(f, "{}", self.code)?,
        }
        if let Some(display) = &self.display {
            write!(f, " ({display})")?;
        }
        Ok(())
    }
}
