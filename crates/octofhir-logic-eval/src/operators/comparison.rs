//! Comparison operators on observation values
//!
//! Numeric, temporal and text values are ordered; coded values only support
//! EQUALS / NOT EQUALS, compared by code and system. A missing value or a
//! value of another type never matches.

use octofhir_logic_ast::ComparisonOperator;
use octofhir_logic_types::{compare_values, values_equal, Operand, Value};

/// Apply `left OP right`
///
/// Returns `None` when the values cannot be related by the operator: the
/// types differ, or an ordering operator meets a coded value.
pub fn compare(operator: ComparisonOperator, left: &Value, right: &Value) -> Option<bool> {
    if operator.is_ordering() {
        return compare_values(left, right).map(|ordering| operator.holds(ordering));
    }
    let equal = values_equal(left, right)?;
    Some(match operator {
        ComparisonOperator::NotEquals => !equal,
        _ => equal,
    })
}

/// Check if an observation value satisfies `value OP operand`
///
/// A missing value is a non-match for every operator, NOT EQUALS included.
pub fn matches(operator: ComparisonOperator, value: Option<&Value>, operand: &Operand) -> bool {
    value
        .and_then(|v| compare(operator, v, operand.value()))
        .unwrap_or(false)
}
