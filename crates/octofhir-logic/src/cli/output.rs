//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use octofhir_logic_diagnostics::{LogicError, SourceLocation};
use octofhir_logic_model::Observation;
use serde_json::Value;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[value(name = "pretty", alias = "json-pretty")]
    JsonPretty,
    Table,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(io::stdout().is_terminal()),
    }
}

/// Format an error for display
///
/// Logic errors render as diagnostics with their code and help text.
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<LogicError>() {
        Some(logic) => logic.to_diagnostic().to_colored_string(),
        None => format!("{} {:#}", "Error:".red().bold(), error),
    }
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Point at a location in a single- or multi-line source
pub fn format_caret(source: &str, location: &SourceLocation) -> String {
    let line = source.lines().nth(location.line.saturating_sub(1)).unwrap_or_default();
    let pad = " ".repeat(location.column.saturating_sub(1));
    format!("    {line}\n    {pad}{}", "^".red().bold())
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!("{}", format_success(&format!("Output written to {}", path.display())));
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

#[derive(Tabled)]
struct ObservationRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Observed")]
    observed_at: String,
}

impl From<&Observation> for ObservationRow {
    fn from(obs: &Observation) -> Self {
        Self {
            id: obs.id.clone(),
            subject: obs.subject.clone().unwrap_or_default(),
            reference: obs.reference.clone(),
            value: obs.value.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".into()),
            observed_at: obs.observed_at.to_rfc3339(),
        }
    }
}

#[derive(Tabled)]
struct SubjectRow {
    #[tabled(rename = "Subject")]
    subject: String,
}

/// Matched observations as a table
pub fn observation_table(observations: &[Observation]) -> String {
    if observations.is_empty() {
        return "(no matching observations)".to_string();
    }
    Table::new(observations.iter().map(ObservationRow::from))
        .with(Style::modern())
        .to_string()
}

/// Cohort subjects as a table
pub fn subject_table(subjects: &[String]) -> String {
    if subjects.is_empty() {
        return "(empty cohort)".to_string();
    }
    Table::new(subjects.iter().map(|s| SubjectRow { subject: s.clone() }))
        .with(Style::modern())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use octofhir_logic_diagnostics::{LOGIC0001, LOGIC0300};
    use octofhir_logic_types::Value as LogicValue;
    use rust_decimal::Decimal;

    #[test]
    fn test_observation_table_columns() {
        colored::control::set_override(false);
        let obs = Observation::new("obs1", "CD4 COUNT", Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap())
            .with_value(LogicValue::Numeric(Decimal::new(250, 0)))
            .with_subject("p1");

        let table = observation_table(&[obs]);
        for cell in ["Id", "Subject", "obs1", "p1", "CD4 COUNT", "250", "2024-01-05T00:00:00+00:00"] {
            assert!(table.contains(cell), "missing {cell} in\n{table}");
        }
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(observation_table(&[]), "(no matching observations)");
        assert_eq!(subject_table(&[]), "(empty cohort)");
    }

    #[test]
    fn test_format_error_uses_diagnostic_for_logic_errors() {
        colored::control::set_override(false);
        let logic = anyhow::Error::new(LogicError::data_access(LOGIC0300, "timeout"));
        assert!(format_error(&logic).starts_with("error[LOGIC0300]: timeout"));

        let other = anyhow::anyhow!("disk full");
        assert_eq!(format_error(&other), "Error: disk full");
    }

    #[test]
    fn test_caret_under_column() {
        colored::control::set_override(false);
        let source = "\"CD4 COUNT\" >\n  and";
        let err = LogicError::parse_at(LOGIC0001, "unexpected", source, 16);
        let caret = format_caret(source, err.location().unwrap());
        assert_eq!(caret, "      and\n      ^");
    }
}
