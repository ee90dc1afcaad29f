//! In-memory observation source

use crate::{
    load_observations, AsyncObservationSource, ConceptDictionary, DataAccessError, Observation,
    ObservationQuery, ObservationSource,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::Path;

/// Observation store held in memory, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryObservationSource {
    observations: RwLock<Vec<Observation>>,
}

impl InMemoryObservationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observations(observations: Vec<Observation>) -> Self {
        Self {
            observations: RwLock::new(observations),
        }
    }

    /// Load from a JSON array of observation records
    pub fn from_json(json: &str, dictionary: &ConceptDictionary) -> Result<Self, DataAccessError> {
        load_observations(json, dictionary).map(Self::with_observations)
    }

    pub fn from_file(path: impl AsRef<Path>, dictionary: &ConceptDictionary) -> Result<Self, DataAccessError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, dictionary)
    }

    pub fn insert(&self, observation: Observation) {
        self.observations.write().push(observation);
    }

    pub fn extend(&self, observations: impl IntoIterator<Item = Observation>) {
        self.observations.write().extend(observations);
    }

    pub fn len(&self) -> usize {
        self.observations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.read().is_empty()
    }

    /// Distinct subjects, in first-seen order
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects = indexmap::IndexSet::new();
        for obs in self.observations.read().iter() {
            if let Some(subject) = &obs.subject {
                subjects.insert(subject.clone());
            }
        }
        subjects.into_iter().collect()
    }
}

impl ObservationSource for InMemoryObservationSource {
    fn fetch(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        let found: Vec<Observation> = self
            .observations
            .read()
            .iter()
            .filter(|obs| query.matches(obs))
            .cloned()
            .collect();
        log::trace!("in-memory fetch {query}: {} observation(s)", found.len());
        Ok(found)
    }
}

#[async_trait]
impl AsyncObservationSource for InMemoryObservationSource {
    async fn retrieve(&self, query: &ObservationQuery) -> Result<Vec<Observation>, DataAccessError> {
        self.fetch(query)
    }
}
