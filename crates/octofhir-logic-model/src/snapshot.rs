//! Prefetched observation snapshot
//!
//! Bridges an [`AsyncObservationSource`] to the synchronous evaluator: all
//! queries are fetched concurrently up front, after which the snapshot
//! answers them from memory.

use crate::{AsyncObservationSource, DataAccessError, Observation, ObservationQuery, ObservationSource};
use futures::future::try_join_all;
use indexmap::{IndexMap, IndexSet};

/// Results of a fixed set of queries
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    results: IndexMap<ObservationQuery, Vec<Observation>>,
}

impl Snapshot {
    /// Fetch every distinct query concurrently; the first failure aborts the load
    pub async fn load<S>(
        source: &S,
        queries: impl IntoIterator<Item = ObservationQuery>,
    ) -> Result<Self, DataAccessError>
    where
        S: AsyncObservationSource + ?Sized,
    {
        let queries: IndexSet<ObservationQuery> = queries.into_iter().collect();
        log::debug!("prefetching {} query(ies)", queries.len());

        let fetched = try_join_all(queries.into_iter().map(|query| async move {
            let observations = source.retrieve(&query).await?;
            Ok::<_, DataAccessError>((query, observations))
        }))
        .await?;

        Ok(Self {
            results: fetched.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ObservationSource for Snapshot {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        self.results
            .get(query)
            .cloned()
            .ok_or_else(|| DataAccessError::Unavailable(format!("query '{query}' was not prefetched")))
    }
}
