//! Normalization of raw text and JSON into typed values
//!
//! Accepted shapes per semantic type:
//! - numeric: decimal strings (scientific notation allowed), JSON numbers
//! - text: any string, trimmed
//! - temporal: RFC 3339, `YYYY-MM-DDThh:mm[:ss[.f]]` (UTC) or `YYYY-MM-DD`
//!   (midnight UTC)
//! - coded: `system|code`, a bare code, or `{"code", "system", "display"}`

use crate::{Code, SemanticType, ValidationError, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::str::FromStr;

/// Parse a decimal number
pub fn parse_numeric(text: &str) -> Result<Decimal, ValidationError> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| ValidationError::invalid_operand(SemanticType::Numeric, format!("'{text}': {e}")))
}

/// Convert a float, rejecting NaN and infinities
pub fn numeric_from_f64(value: f64) -> Result<Decimal, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid_operand(
            SemanticType::Numeric,
            format!("{value} is not a finite number"),
        ));
    }
    Decimal::try_from(value)
        .map(|d| d.normalize())
        .map_err(|e| ValidationError::invalid_operand(SemanticType::Numeric, e.to_string()))
}

/// Parse a date or date-time; values without an offset are taken as UTC
pub fn parse_temporal(text: &str) -> Result<DateTime<Utc>, ValidationError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ValidationError::invalid_operand(
        SemanticType::Temporal,
        format!("'{text}' is not a date or date-time"),
    ))
}

/// Parse `system|code` or a bare code
pub fn parse_code(text: &str) -> Result<Code, ValidationError> {
    let text = text.trim();
    let code = match text.rsplit_once('|') {
        Some((system, code)) if !system.trim().is_empty() => {
            Code::new(code.trim()).with_system(system.trim())
        }
        Some((_, code)) => Code::new(code.trim()),
        None => Code::new(text),
    };

    if code.code.is_empty() {
        return Err(ValidationError::invalid_operand(
            SemanticType::Coded,
            format!("'{text}' has no code"),
        ));
    }
    Ok(code)
}

/// Parse text as a value of the given type
pub fn parse_value(ty: SemanticType, text: &str) -> Result<Value, ValidationError> {
    match ty {
        SemanticType::Numeric => parse_numeric(text).map(Value::Numeric),
        SemanticType::Text => Ok(Value::Text(text.trim().to_string())),
        SemanticType::Temporal => parse_temporal(text).map(Value::Temporal),
        SemanticType::Coded => parse_code(text).map(Value::Coded),
    }
}

/// Convert a raw JSON value into a value of the given type
///
/// `null` maps to `None`: a missing value, which never matches.
pub fn value_from_json(ty: SemanticType, json: &JsonValue) -> Result<Option<Value>, ValidationError> {
    let value = match (ty, json) {
        (_, JsonValue::Null) => return Ok(None),
        (_, JsonValue::String(s)) => parse_value(ty, s)?,
        (SemanticType::Numeric, JsonValue::Number(n)) => Value::Numeric(parse_numeric(&n.to_string())?),
        (SemanticType::Text, JsonValue::Number(n)) => Value::Text(n.to_string()),
        (SemanticType::Text, JsonValue::Bool(b)) => Value::Text(b.to_string()),
        (SemanticType::Coded, JsonValue::Object(obj)) => {
            let field = |name: &str| obj.get(name).and_then(JsonValue::as_str).map(str::trim);
            let code = field("code").filter(|c| !c.is_empty()).ok_or_else(|| {
                ValidationError::invalid_operand(SemanticType::Coded, "object has no 'code' field")
            })?;
            let mut code = Code::new(code);
            code.system = field("system").map(str::to_string);
            code.display = field("display").map(str::to_string);
            Value::Coded(code)
        }
        (ty, other) => {
            return Err(ValidationError::invalid_operand(
                ty,
                format!("cannot read {ty} value from {other}"),
            ));
        }
    };
    Ok(Some(value))
}
