//! Criteria text parser using Winnow
//!
//! Parses the criteria syntax into the untyped [`CriteriaExpr`] tree, e.g.
//!
//! ```text
//! "CD4 COUNT" > 200 and ("HIV STATUS" = Code 'POS' from 'LOCAL' or WEIGHT <= 70.5 within [@2024-01-01, @2024-06-30])
//! ```
//!
//! Keywords are case-insensitive and groups nest at most [`MAX_NESTING`]
//! deep. Errors carry a `LOGIC00xx` code and the line/column of the
//! offending input.

mod combinators;
mod expression;

use combinators::{CLOSING, LITERAL, NESTING, NUMBER, OPERATOR, TEMPORAL, UNTERMINATED};
use octofhir_logic_ast::CriteriaExpr;
use octofhir_logic_diagnostics::{
    ErrorCode, LogicError, Result, LOGIC0001, LOGIC0002, LOGIC0003, LOGIC0004, LOGIC0005,
    LOGIC0006, LOGIC0007, LOGIC0008, LOGIC0009,
};

pub use expression::MAX_NESTING;
use winnow::error::{ContextError, StrContext};
use winnow::Parser;

/// Parse criteria text
pub fn parse(source: &str) -> Result<CriteriaExpr> {
    expression::document
        .parse(source)
        .map_err(|e| to_logic_error(source, e.offset(), e.inner()))
}

fn to_logic_error(source: &str, offset: usize, error: &ContextError) -> LogicError {
    let code = error_code(source, offset, error);
    let found = source[offset..]
        .chars()
        .next()
        .map(|c| format!("'{c}'"))
        .unwrap_or_else(|| "end of input".to_string());

    LogicError::parse_at(
        code,
        format!("{} near {found}", code.info().description),
        source,
        offset,
    )
}

fn error_code(source: &str, offset: usize, error: &ContextError) -> ErrorCode {
    let has = |label: &str| {
        error
            .context()
            .any(|c| matches!(c, StrContext::Label(l) if *l == label))
    };

    if has(NESTING) {
        LOGIC0009
    } else if has(UNTERMINATED) {
        LOGIC0004
    } else if has(TEMPORAL) {
        LOGIC0006
    } else if has(NUMBER) {
        LOGIC0005
    } else if has(CLOSING) {
        LOGIC0008
    } else if source[offset..].trim().is_empty() {
        LOGIC0002
    } else if has(OPERATOR) {
        LOGIC0007
    } else if has(LITERAL) {
        LOGIC0003
    } else {
        LOGIC0001
    }
}
