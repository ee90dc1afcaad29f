//! Shared fixtures for evaluation tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use octofhir_logic_model::{DataReference, InMemoryObservationSource, Observation};
use octofhir_logic_types::{Code, SemanticType, Value};
use rust_decimal::Decimal;

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

pub fn cd4() -> DataReference {
    DataReference::new("CD4 COUNT", SemanticType::Numeric)
}

pub fn weight() -> DataReference {
    DataReference::new("WEIGHT", SemanticType::Numeric)
}

pub fn hiv_status() -> DataReference {
    DataReference::new("HIV STATUS", SemanticType::Coded)
}

pub fn numeric(id: &str, reference: &str, value: i64, on: u32) -> Observation {
    Observation::new(id, reference, day(on)).with_value(Value::Numeric(Decimal::from(value)))
}

pub fn coded(id: &str, reference: &str, code: &str, on: u32) -> Observation {
    Observation::new(id, reference, day(on)).with_value(Value::Coded(Code::new(code).with_system("LOCAL")))
}

pub fn source(observations: Vec<Observation>) -> InMemoryObservationSource {
    InMemoryObservationSource::with_observations(observations)
}

pub fn ids(observations: &[Observation]) -> Vec<&str> {
    observations.iter().map(|o| o.id.as_str()).collect()
}
