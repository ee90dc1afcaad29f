//! Observation data model for clinical criteria evaluation
//!
//! This crate defines what criteria are evaluated against:
//! - [`Observation`]: a timestamped, optionally subject-scoped value of a concept
//! - [`ConceptDictionary`]: the declared data references and their types
//! - [`ObservationSource`] / [`AsyncObservationSource`]: the injected
//!   collaborator that fetches observations for an [`ObservationQuery`]
//! - [`InMemoryObservationSource`] and [`Snapshot`] implementations

pub mod concept;
pub mod error;
pub mod memory;
pub mod observation;
pub mod provider;
pub mod query;
pub mod snapshot;

pub use concept::{ConceptDictionary, DataReference};
pub use error::DataAccessError;
pub use memory::InMemoryObservationSource;
pub use observation::{load_observations, Observation, ObservationRecord};
pub use provider::{AsyncObservationSource, ObservationSource};
pub use query::ObservationQuery;
pub use snapshot::Snapshot;
