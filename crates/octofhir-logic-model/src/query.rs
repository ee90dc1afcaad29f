//! Observation queries

use crate::concept::same_name;
use crate::Observation;
use octofhir_logic_types::TimeWindow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a criteria leaf asks the data source for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservationQuery {
    pub reference: String,
    #[serde(default)]
    pub window: TimeWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl ObservationQuery {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            window: TimeWindow::unbounded(),
            subject: None,
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn for_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Check if an observation answers this query
    pub fn matches(&self, observation: &Observation) -> bool {
        same_name(&observation.reference, &self.reference)
            && self
                .subject
                .as_deref()
                .is_none_or(|s| observation.subject.as_deref() == Some(s))
            && self.window.contains(&observation.observed_at)
    }
}

impl fmt::Display for ObservationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)?;
        if !self.window.is_unbounded() {
            write!(f, " within {}", self.window)?;
        }
        if let Some(subject) = &self.subject {
            write!(f, " for {subject}")?;
        }
        Ok(())
    }
}
