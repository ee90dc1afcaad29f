//! Tests for parsing criteria text into the parse tree

use chrono::{TimeZone, Utc};
use octofhir_logic_ast::{
    CodeLiteral, ComparisonOperator, CriteriaExpr, LeafExpr, Literal, LogicalOperator, WindowExpr,
};
use octofhir_logic_parser::parse;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;

fn parse_leaf(input: &str) -> LeafExpr {
    match parse(input).unwrap_or_else(|e| panic!("Failed to parse '{input}': {e}")) {
        CriteriaExpr::Leaf(leaf) => leaf,
        other => panic!("Expected leaf, got: {other:?}"),
    }
}

// ============================================================================
// Operators
// ============================================================================

#[rstest]
#[case("=", ComparisonOperator::Equals)]
#[case("==", ComparisonOperator::Equals)]
#[case("!=", ComparisonOperator::NotEquals)]
#[case("<>", ComparisonOperator::NotEquals)]
#[case("<", ComparisonOperator::LessThan)]
#[case("<=", ComparisonOperator::LessThanEquals)]
#[case(">", ComparisonOperator::GreaterThan)]
#[case(">=", ComparisonOperator::GreaterThanEquals)]
fn test_operator_symbols(#[case] symbol: &str, #[case] expected: ComparisonOperator) {
    let leaf = parse_leaf(&format!("WEIGHT {symbol} 70"));
    assert_eq!(leaf.operator, expected);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_number_literal() {
    let leaf = parse_leaf("\"CD4 COUNT\" > 200.50");
    assert_eq!(leaf.reference, "CD4 COUNT");
    assert_eq!(leaf.literal, Literal::Number(Decimal::new(20050, 2)));
}

#[test]
fn test_text_literal() {
    let leaf = parse_leaf("NOTE = 'smoker'");
    assert_eq!(leaf.literal, Literal::Text("smoker".into()));
}

#[test]
fn test_temporal_literal() {
    let leaf = parse_leaf("ADMISSION >= @2024-03-01");
    assert_eq!(
        leaf.literal,
        Literal::Temporal(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
    );
}

#[rstest]
#[case("\"HIV STATUS\" = Code 'POS' from 'LOCAL'", Some("LOCAL"))]
#[case("\"HIV STATUS\" = code 'POS'", None)]
#[case("\"HIV STATUS\" = CODE 'POS' FROM 'LOCAL'", Some("LOCAL"))]
fn test_code_literal(#[case] input: &str, #[case] system: Option<&str>) {
    let leaf = parse_leaf(input);
    assert_eq!(
        leaf.literal,
        Literal::Code(CodeLiteral {
            code: "POS".into(),
            system: system.map(str::to_string),
        })
    );
}

// ============================================================================
// Windows
// ============================================================================

#[test]
fn test_closed_window() {
    let leaf = parse_leaf("WEIGHT <= 70.5 within [@2024-01-01, @2024-06-30]");
    assert_eq!(
        leaf.window,
        Some(WindowExpr {
            start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()),
        })
    );
}

#[rstest]
#[case("WEIGHT > 1 within [@2024-01-01, ]", true, false)]
#[case("WEIGHT > 1 WITHIN [ , @2024-01-01]", false, true)]
#[case("WEIGHT > 1 within [,]", false, false)]
fn test_open_windows(#[case] input: &str, #[case] has_start: bool, #[case] has_end: bool) {
    let window = parse_leaf(input).window.unwrap();
    assert_eq!(window.start.is_some(), has_start);
    assert_eq!(window.end.is_some(), has_end);
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn test_full_example() {
    let expr = parse(
        "\"CD4 COUNT\" > 200 and (\"HIV STATUS\" = Code 'POS' from 'LOCAL' or WEIGHT <= 70.5 within [@2024-01-01, @2024-06-30])",
    )
    .unwrap();

    let CriteriaExpr::Logical(and) = &expr else {
        panic!("Expected AND, got: {expr:?}");
    };
    assert_eq!(and.operator, LogicalOperator::And);
    assert_eq!(and.operands.len(), 2);
    let CriteriaExpr::Logical(or) = &and.operands[1] else {
        panic!("Expected OR child");
    };
    assert_eq!(or.operator, LogicalOperator::Or);
    assert_eq!(expr.depth(), 3);
}

#[test]
fn test_case_insensitive_keywords() {
    let expr = parse("A > 1 AND B > 2 Or C > 3").unwrap();
    assert!(matches!(expr, CriteriaExpr::Logical(ref l) if l.operator == LogicalOperator::Or));
}

#[test]
fn test_parenthesized_groups_stay_nested() {
    let CriteriaExpr::Logical(and) = parse("(A > 1 and B > 2) and C > 3").unwrap() else {
        panic!("Expected AND");
    };
    assert_eq!(and.operands.len(), 2);
    assert!(matches!(and.operands[0], CriteriaExpr::Logical(_)));
}

#[test]
fn test_display_round_trip() {
    let source = "\"CD4 COUNT\" > 200 and (NOTE = 'O\\'Brien' or ADMISSION < @2024-01-01T08:00:00Z within [, @2024-02-01])";
    let expr = parse(source).unwrap();

    let rendered = expr.to_string();
    insta::assert_snapshot!(rendered, @r#"("CD4 COUNT" > 200) and (("NOTE" = 'O\'Brien') or ("ADMISSION" < @2024-01-01T08:00:00Z within [, @2024-02-01T00:00:00Z]))"#);
    assert_eq!(parse(&rendered).unwrap(), expr);
}
