//! Comparison operands

use crate::{
    numeric_from_f64, parse_code, parse_temporal, parse_value, value_from_json, Code, SemanticType,
    ValidationError, Value,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal right-hand side of a comparison
///
/// An operand always holds a present value; a missing threshold is not
/// expressible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Operand(Value);

impl Operand {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn numeric(value: impl Into<Decimal>) -> Self {
        Self(Value::Numeric(value.into()))
    }

    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        numeric_from_f64(value).map(|d| Self(Value::Numeric(d)))
    }

    /// Text operand; surrounding whitespace is dropped
    pub fn text(value: impl AsRef<str>) -> Self {
        Self(Value::Text(value.as_ref().trim().to_string()))
    }

    pub const fn temporal(value: DateTime<Utc>) -> Self {
        Self(Value::Temporal(value))
    }

    /// Date operand at midnight UTC
    pub fn date(value: NaiveDate) -> Self {
        Self(Value::Temporal(value.and_time(NaiveTime::MIN).and_utc()))
    }

    pub const fn coded(code: Code) -> Self {
        Self(Value::Coded(code))
    }

    /// Parse text as an operand of the given type
    pub fn parse(ty: SemanticType, text: &str) -> Result<Self, ValidationError> {
        parse_value(ty, text).map(Self)
    }

    /// Read a JSON value as an operand of the given type
    pub fn from_json(ty: SemanticType, json: &serde_json::Value) -> Result<Self, ValidationError> {
        value_from_json(ty, json)?
            .map(Self)
            .ok_or_else(|| ValidationError::invalid_operand(ty, "operand must not be null"))
    }

    /// Reinterpret a text operand as the type a reference declares
    ///
    /// Only text is coerced (to coded or temporal); any other combination is
    /// returned as is and left for the type check.
    pub fn normalize_to(self, ty: SemanticType) -> Result<Self, ValidationError> {
        match (&self.0, ty) {
            (Value::Text(s), SemanticType::Coded) => Ok(Self(Value::Coded(parse_code(s)?))),
            (Value::Text(s), SemanticType::Temporal) => Ok(Self(Value::Temporal(parse_temporal(s)?))),
            _ => Ok(self),
        }
    }

    pub const fn semantic_type(&self) -> SemanticType {
        self.0.semantic_type()
    }

    pub const fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::numeric(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::numeric(value)
    }
}

impl From<Decimal> for Operand {
    fn from(value: Decimal) -> Self {
        Self::numeric(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<Code> for Operand {
    fn from(value: Code) -> Self {
        Self::coded(value)
    }
}

impl From<DateTime<Utc>> for Operand {
    fn from(value: DateTime<Utc>) -> Self {
        Self::temporal(value)
    }
}

impl From<NaiveDate> for Operand {
    fn from(value: NaiveDate) -> Self {
        Self::date(value)
    }
}

impl From<Operand> for Value {
    fn from(operand: Operand) -> Self {
        operand.0
    }
}
