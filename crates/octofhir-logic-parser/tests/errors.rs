//! Tests for parse error codes and locations

use octofhir_logic_diagnostics::{
    LogicError, LOGIC0001, LOGIC0002, LOGIC0004, LOGIC0006, LOGIC0007, LOGIC0008,
    LOGIC0009,
};
use octofhir_logic_parser::{parse, MAX_NESTING};
use rstest::rstest;

#[rstest]
#[case("", LOGIC0002)]
#[case("\"CD4 COUNT\" >", LOGIC0002)]
#[case("NOTE = 'never closed", LOGIC0004)]
#[case("ADMISSION > @2024-02-30", LOGIC0006)]
#[case("WEIGHT ~ 70", LOGIC0007)]
#[case("(WEIGHT > 70", LOGIC0008)]
#[case("WEIGHT > 70 within [@2024-01-01, @2024-02-01", LOGIC0008)]
#[case("WEIGHT > 70 70", LOGIC0001)]
fn test_error_codes(#[case] input: &str, #[case] expected: octofhir_logic_diagnostics::ErrorCode) {
    let err = parse(input).unwrap_err();
    assert!(matches!(err, LogicError::Parse { .. }), "{err:?}");
    assert_eq!(err.code(), expected, "input: {input:?}, error: {err}");
}

#[test]
fn test_error_location_is_line_and_column() {
    let err = parse("WEIGHT > 70\nand HEIGHT ? 1").unwrap_err();

    let loc = err.location().unwrap();
    assert_eq!((loc.line, loc.column), (2, 12));
    assert_eq!(err.code(), LOGIC0007);
}

#[test]
fn test_error_message_names_offending_input() {
    let err = parse("WEIGHT > 70 70").unwrap_err();
    assert!(err.to_string().contains("near '7'"), "{err}");
}

fn nested(depth: usize) -> String {
    format!("{}WEIGHT > 70{}", "(".repeat(depth), ")".repeat(depth))
}

#[rstest]
#[case(MAX_NESTING + 1)]
#[case(10_000)]
#[case(200_000)]
fn test_deep_nesting_is_a_located_error(#[case] depth: usize) {
    let err = parse(&nested(depth)).unwrap_err();

    assert_eq!(err.code(), LOGIC0009, "{err}");
    let loc = err.location().unwrap();
    assert_eq!((loc.line, loc.column), (1, MAX_NESTING + 2));
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    assert!(parse(&nested(MAX_NESTING)).is_ok());
    assert!(parse(&format!("{} or HEIGHT < 2", nested(100))).is_ok());
}
