//! Evaluation lifecycle hooks
//!
//! Every hook has an empty default body; implementers override only the ones
//! they need and register the listener with
//! [`LogicService::with_listener`](crate::LogicService::with_listener).

use crate::Criteria;
use octofhir_logic_model::ObservationQuery;
use std::sync::atomic::{AtomicUsize, Ordering};

pub trait EvaluationListener: Send + Sync {
    /// Called once before a tree is evaluated
    fn will_evaluate(&self, _criteria: &Criteria) {}

    /// Called after each fetch from the observation source
    fn did_fetch(&self, _query: &ObservationQuery, _fetched: usize) {}

    /// Called once with the number of matches
    fn did_evaluate(&self, _criteria: &Criteria, _matched: usize) {}
}

/// Counts fetches and fetched observations
#[derive(Debug, Default)]
pub struct FetchCounter {
    fetches: AtomicUsize,
    observations: AtomicUsize,
}

impl FetchCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn observations(&self) -> usize {
        self.observations.load(Ordering::Relaxed)
    }
}

impl EvaluationListener for FetchCounter {
    fn did_fetch(&self, _query: &ObservationQuery, fetched: usize) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.observations.fetch_add(fetched, Ordering::Relaxed);
    }
}
