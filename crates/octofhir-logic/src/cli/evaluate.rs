//! Evaluate command implementation

use super::output::{self, OutputFormat};
use crate::{compile, evaluate_async, ConceptDictionary, EvaluationOptions, InMemoryObservationSource, LogicService};
use anyhow::{Context, Result};
use log::info;
use octofhir_logic_diagnostics::LogicError;
use octofhir_logic_model::Observation;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Configuration for evaluate command
pub struct EvaluateConfig {
    pub criteria: String,
    pub concepts: PathBuf,
    pub observations: PathBuf,
    pub subject: Option<String>,
    pub cohort: bool,
    pub options: EvaluationOptions,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// What an evaluation produced
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Observations {
        criteria: String,
        subject: Option<String>,
        observations: Vec<Observation>,
    },
    Cohort {
        criteria: String,
        subjects: Vec<String>,
    },
}

impl Report {
    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Self::Observations {
                criteria,
                subject,
                observations,
            } => json!({
                "criteria": criteria,
                "subject": subject,
                "matched": observations.len(),
                "observations": serde_json::to_value(observations)?,
            }),
            Self::Cohort { criteria, subjects } => json!({
                "criteria": criteria,
                "matched": subjects.len(),
                "subjects": subjects,
            }),
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => output::format_json(&self.to_json()?, false),
            OutputFormat::JsonPretty => output::format_json(&self.to_json()?, true),
            OutputFormat::Table => Ok(match self {
                Self::Observations { observations, .. } => output::observation_table(observations),
                Self::Cohort { subjects, .. } => output::subject_table(subjects),
            }),
        }
    }
}

/// Evaluate criteria and print the result
pub async fn evaluate(config: EvaluateConfig) -> Result<()> {
    let report = run(&config).await?;
    let content = report.render(config.output_format)?;
    output::write_output(&content, config.output_file.as_deref())
}

/// Load the data files, compile the criteria and evaluate them
pub async fn run(config: &EvaluateConfig) -> Result<Report> {
    let dictionary = ConceptDictionary::from_file(&config.concepts)
        .with_context(|| format!("Failed to load concept dictionary: {}", config.concepts.display()))?;
    let source = InMemoryObservationSource::from_file(&config.observations, &dictionary)
        .with_context(|| format!("Failed to load observations: {}", config.observations.display()))?;
    info!(
        "loaded {} reference(s) and {} observation(s)",
        dictionary.len(),
        source.len()
    );

    let criteria = compile(&config.criteria, &dictionary)?;
    let canonical = criteria.to_string();

    if config.cohort {
        let subjects = LogicService::new(source)
            .with_options(config.options)
            .cohort(&criteria)
            .map_err(LogicError::from)?;
        return Ok(Report::Cohort {
            criteria: canonical,
            subjects,
        });
    }

    let observations = evaluate_async(&source, &criteria, config.subject.as_deref(), config.options)
        .await
        .map_err(LogicError::from)?;
    Ok(Report::Observations {
        criteria: canonical,
        subject: config.subject.clone(),
        observations,
    })
}
