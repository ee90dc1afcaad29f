//! Validate command implementation

use super::output;
use crate::{compile, ConceptDictionary};
use anyhow::{Context, Result};
use colored::Colorize;
use octofhir_logic_diagnostics::LogicError;
use std::path::PathBuf;

/// Configuration for validate command
pub struct ValidateConfig {
    pub criteria: Vec<String>,
    pub concepts: PathBuf,
    pub verbose: bool,
}

/// Validation result for one criteria text
#[derive(Debug)]
pub struct ValidationOutcome {
    pub source: String,
    /// Canonical text on success
    pub result: std::result::Result<String, LogicError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Compile every criteria text, collecting all failures
pub fn check(criteria: &[String], dictionary: &ConceptDictionary) -> Vec<ValidationOutcome> {
    criteria
        .iter()
        .map(|source| ValidationOutcome {
            source: source.clone(),
            result: compile(source, dictionary).map(|c| c.to_string()),
        })
        .collect()
}

/// Validate criteria against a concept dictionary
pub async fn validate(config: ValidateConfig) -> Result<()> {
    if config.criteria.is_empty() {
        anyhow::bail!("No criteria specified for validation");
    }

    let dictionary = ConceptDictionary::from_file(&config.concepts)
        .with_context(|| format!("Failed to load concept dictionary: {}", config.concepts.display()))?;

    let outcomes = check(&config.criteria, &dictionary);
    for outcome in &outcomes {
        print_outcome(outcome, config.verbose);
    }

    println!();
    let failed = outcomes.iter().filter(|o| !o.is_valid()).count();
    if failed == 0 {
        println!(
            "{}",
            output::format_success(&format!("All {} criteria validated successfully", outcomes.len()))
        );
        Ok(())
    } else {
        anyhow::bail!("{failed} of {} criteria failed validation", outcomes.len())
    }
}

fn print_outcome(outcome: &ValidationOutcome, verbose: bool) {
    match &outcome.result {
        Ok(canonical) => {
            println!("{} {}", "✓".green().bold(), outcome.source.cyan());
            if verbose {
                println!("  {} {}", "canonical:".dimmed(), canonical);
            }
        }
        Err(err) => {
            println!("{} {}", "✗".red().bold(), outcome.source.cyan());
            println!("  {}", err.to_diagnostic().to_colored_string());
            if let Some(location) = err.location() {
                println!("{}", output::format_caret(&outcome.source, location));
            }
        }
    }
}
