//! Observation source traits
//!
//! Evaluation never reaches for ambient state: the source is handed to the
//! evaluator explicitly.

use crate::{DataAccessError, Observation, ObservationQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// Synchronous collaborator fetching observations for a query
///
/// Implementations return observations in their native order; the evaluator
/// never re-sorts them. Errors are surfaced to the caller unchanged.
pub trait ObservationSource: Send + Sync {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError>;
}

impl<T: ObservationSource + ?Sized> ObservationSource for &T {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        (**self).fetch(query)
    }
}

impl<T: ObservationSource + ?Sized> ObservationSource for Arc<T> {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        (**self).fetch(query)
    }
}

impl<T: ObservationSource + ?Sized> ObservationSource for Box<T> {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        (**self).fetch(query)
    }
}

/// Asynchronous collaborator, e.g. a remote repository
#[async_trait]
pub trait AsyncObservationSource: Send + Sync {
    async fn retrieve(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError>;
}

#[async_trait]
impl<T: AsyncObservationSource + ?Sized> AsyncObservationSource for Arc<T> {
    async fn retrieve(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        (**self).retrieve(query).await
    }
}
