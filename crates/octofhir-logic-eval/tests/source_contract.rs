//! Contract with the observation source: what is fetched, when, and how
//! failures surface

mod common;

use common::{cd4, day, hiv_status, ids, numeric, weight};
use mockall::{mock, predicate::function, Sequence};
use octofhir_logic_ast::ComparisonOperator;
use octofhir_logic_eval::{Criteria, EvalError, EvaluationOptions, LogicService};
use octofhir_logic_model::{DataAccessError, Observation, ObservationQuery, ObservationSource};
use octofhir_logic_types::TimeWindow;
use pretty_assertions::assert_eq;

mock! {
    pub Source {}

    impl ObservationSource for Source {
        fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError>;
    }
}

#[test]
fn test_leaf_fetches_its_reference_once() {
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .with(function(|q: &ObservationQuery| q.reference == "CD4 COUNT" && q.subject.is_none()))
        .times(1)
        .returning(|_| Ok(vec![numeric("obs1", "CD4 COUNT", 250, 1)]));

    let criteria = Criteria::leaf(cd4(), ComparisonOperator::GreaterThan, 200).unwrap();
    let matched = LogicService::new(source).evaluate(&criteria).unwrap();

    assert_eq!(ids(&matched), ["obs1"]);
}

#[test]
fn test_window_and_subject_are_passed_to_source() {
    let window = TimeWindow::new(Some(day(2)), Some(day(9))).unwrap();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .withf(move |q| q.window == window && q.subject.as_deref() == Some("p1"))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let criteria =
        Criteria::leaf_within(cd4(), ComparisonOperator::GreaterThan, 200, window).unwrap();
    let matched = LogicService::new(source).evaluate_for("p1", &criteria).unwrap();

    assert!(matched.is_empty());
}

#[test]
fn test_unenforced_window_trusts_source() {
    let window = TimeWindow::new(Some(day(2)), Some(day(3))).unwrap();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .returning(|_| Ok(vec![numeric("outside", "CD4 COUNT", 300, 20)]));

    let criteria =
        Criteria::leaf_within(cd4(), ComparisonOperator::GreaterThan, 200, window).unwrap();
    let service = LogicService::new(source)
        .with_options(EvaluationOptions::default().with_enforce_windows(false));

    assert_eq!(ids(&service.evaluate(&criteria).unwrap()), ["outside"]);
}

#[test]
fn test_and_stops_after_empty_child() {
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .with(function(|q: &ObservationQuery| q.reference == "CD4 COUNT"))
        .times(1)
        .returning(|_| Ok(Vec::new()));
    source
        .expect_fetch()
        .with(function(|q: &ObservationQuery| q.reference == "WEIGHT"))
        .never();

    let criteria = Criteria::and([
        Criteria::leaf(cd4(), ComparisonOperator::GreaterThan, 200).unwrap(),
        Criteria::leaf(weight(), ComparisonOperator::LessThan, 70).unwrap(),
    ])
    .unwrap();

    assert!(LogicService::new(source).evaluate(&criteria).unwrap().is_empty());
}

#[test]
fn test_or_fetches_children_in_order() {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .with(function(|q: &ObservationQuery| q.reference == "WEIGHT"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![numeric("w1", "WEIGHT", 60, 1)]));
    source
        .expect_fetch()
        .with(function(|q: &ObservationQuery| q.reference == "CD4 COUNT"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![numeric("c1", "CD4 COUNT", 300, 1)]));

    let criteria = Criteria::or([
        Criteria::leaf(weight(), ComparisonOperator::LessThan, 70).unwrap(),
        Criteria::leaf(cd4(), ComparisonOperator::GreaterThan, 200).unwrap(),
    ])
    .unwrap();

    assert_eq!(ids(&LogicService::new(source).evaluate(&criteria).unwrap()), ["w1", "c1"]);
}

#[test]
fn test_source_error_propagates_unchanged() {
    let failure = DataAccessError::fetch_failed("CD4 COUNT", "connection reset");
    let returned = failure.clone();
    let mut source = MockSource::new();
    source
        .expect_fetch()
        .times(1)
        .returning(move |_| Err(returned.clone()));

    let criteria = Criteria::or([
        Criteria::leaf(cd4(), ComparisonOperator::GreaterThan, 200).unwrap(),
        Criteria::leaf(weight(), ComparisonOperator::LessThan, 70).unwrap(),
    ])
    .unwrap();
    let err = LogicService::new(source).evaluate(&criteria).unwrap_err();

    assert_eq!(err, EvalError::DataAccess(failure));
    assert_eq!(err.code().to_string(), "LOGIC0300");
}

#[test]
fn test_invalid_criteria_never_reach_source() {
    let mut source = MockSource::new();
    source.expect_fetch().never();

    let invalid = Criteria::leaf(hiv_status(), ComparisonOperator::GreaterThan, "LOCAL|POS");
    assert!(invalid.is_err());

    let service = LogicService::new(source).with_options(EvaluationOptions::default().with_max_depth(1));
    let nested = Criteria::and([Criteria::leaf(cd4(), ComparisonOperator::Equals, 1).unwrap()]).unwrap();
    assert!(matches!(service.evaluate(&nested), Err(EvalError::RecursionLimit { .. })));
}
