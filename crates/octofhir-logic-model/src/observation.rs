//! Observations and their raw interchange records

use crate::{ConceptDictionary, DataAccessError};
use chrono::{DateTime, Utc};
use octofhir_logic_types::{parse_temporal, value_from_json, Value};
use serde::{Deserialize, Serialize};

/// A recorded clinical measurement or fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Identity used for AND/OR set semantics
    pub id: String,
    /// Concept the value belongs to
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// `None` when the value is missing; missing values never match
    #[serde(default)]
    pub value: Option<Value>,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    pub fn new(id: impl Into<String>, reference: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            reference: reference.into(),
            subject: None,
            value: None,
            observed_at,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Untyped observation as found in JSON data files
///
/// The value is read according to the type the dictionary declares for the
/// reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationRecord {
    pub id: String,
    #[serde(alias = "concept")]
    pub reference: String,
    #[serde(default, alias = "patient")]
    pub subject: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(alias = "date")]
    pub observed_at: String,
}

impl ObservationRecord {
    /// Type the record against the dictionary
    pub fn normalize(self, dictionary: &ConceptDictionary) -> Result<Observation, DataAccessError> {
        let reference = dictionary.get(&self.reference).ok_or_else(|| {
            DataAccessError::invalid_record(&self.id, format!("unknown reference '{}'", self.reference))
        })?;
        let value = value_from_json(reference.semantic_type, &self.value)
            .map_err(|e| DataAccessError::invalid_record(&self.id, e.to_string()))?;
        let observed_at = parse_temporal(&self.observed_at)
            .map_err(|e| DataAccessError::invalid_record(&self.id, e.to_string()))?;

        Ok(Observation {
            id: self.id,
            reference: reference.name.clone(),
            subject: self.subject,
            value,
            observed_at,
        })
    }
}

/// Load a JSON array of observation records
pub fn load_observations(json: &str, dictionary: &ConceptDictionary) -> Result<Vec<Observation>, DataAccessError> {
    let records: Vec<ObservationRecord> = serde_json::from_str(json)?;
    records.into_iter().map(|r| r.normalize(dictionary)).collect()
}
