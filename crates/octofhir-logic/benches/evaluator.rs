//! Evaluator benchmarks using divan
//!
//! Benchmarks for criteria parsing, compilation and evaluation.

use chrono::{Duration, TimeZone, Utc};
use octofhir_logic::{
    compile, parse, Code, ConceptDictionary, DataReference, InMemoryObservationSource, LogicService,
    Observation, SemanticType, Value,
};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

const LEAF: &str = r#""CD4 COUNT" > 200"#;
const NESTED: &str = r#""CD4 COUNT" > 200 within [@2024-01-01, @2024-12-31]
    and ("HIV STATUS" = Code 'POS' from 'LOCAL' or WEIGHT < 60)"#;

fn dictionary() -> ConceptDictionary {
    ConceptDictionary::new()
        .with(DataReference::new("CD4 COUNT", SemanticType::Numeric))
        .with(DataReference::new("WEIGHT", SemanticType::Numeric))
        .with(DataReference::new("HIV STATUS", SemanticType::Coded))
}

/// `n` observations per reference, spread over subjects and days
fn source(n: usize) -> InMemoryObservationSource {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut observations = Vec::with_capacity(n * 3);
    for i in 0..n {
        let subject = format!("p{}", i % 97);
        let at = start + Duration::hours(i as i64);
        observations.push(
            Observation::new(format!("cd4-{i}"), "CD4 COUNT", at)
                .with_subject(&subject)
                .with_value(Value::Numeric(Decimal::from(i % 500))),
        );
        observations.push(
            Observation::new(format!("w-{i}"), "WEIGHT", at)
                .with_subject(&subject)
                .with_value(Value::Numeric(Decimal::from(40 + i % 60))),
        );
        let status = if i % 3 == 0 { "POS" } else { "NEG" };
        observations.push(
            Observation::new(format!("hiv-{i}"), "HIV STATUS", at)
                .with_subject(&subject)
                .with_value(Value::Coded(Code::new(status).with_system("LOCAL"))),
        );
    }
    InMemoryObservationSource::with_observations(observations)
}

// === Text Benchmarks ===

mod text {
    use super::*;

    #[divan::bench(args = [LEAF, NESTED])]
    fn parse_criteria(bencher: divan::Bencher, input: &str) {
        bencher.bench_local(|| parse(divan::black_box(input)));
    }

    #[divan::bench(args = [LEAF, NESTED])]
    fn compile_criteria(bencher: divan::Bencher, input: &str) {
        let dictionary = dictionary();
        bencher.bench_local(|| compile(divan::black_box(input), &dictionary));
    }
}

// === Evaluation Benchmarks ===

mod evaluation {
    use super::*;

    #[divan::bench(args = [100, 1_000, 10_000])]
    fn leaf(bencher: divan::Bencher, n: usize) {
        let criteria = compile(LEAF, &dictionary()).unwrap();
        let service = LogicService::new(source(n));
        bencher.bench_local(|| service.evaluate(divan::black_box(&criteria)));
    }

    #[divan::bench(args = [100, 1_000, 10_000])]
    fn nested(bencher: divan::Bencher, n: usize) {
        let criteria = compile(NESTED, &dictionary()).unwrap();
        let service = LogicService::new(source(n));
        bencher.bench_local(|| service.evaluate(divan::black_box(&criteria)));
    }

    #[divan::bench(args = [100, 1_000, 10_000])]
    fn cohort(bencher: divan::Bencher, n: usize) {
        let criteria = compile(NESTED, &dictionary()).unwrap();
        let service = LogicService::new(source(n));
        bencher.bench_local(|| service.cohort(divan::black_box(&criteria)));
    }
}
