//! Clinical criteria for Rust
//!
//! This crate ties the workspace together:
//! - Parsing the criteria text syntax (`"CD4 COUNT" > 200 and ...`)
//! - Resolving references against a concept dictionary
//! - Building validated criteria trees
//! - Evaluating them against an observation source
//!
//! # Example
//!
//! ```ignore
//! use octofhir_logic::{compile, ConceptDictionary, InMemoryObservationSource, LogicService};
//!
//! let dictionary = ConceptDictionary::from_file("concepts.json")?;
//! let source = InMemoryObservationSource::from_file("observations.json", &dictionary)?;
//!
//! let criteria = compile(r#""CD4 COUNT" > 200 within [@2024-01-01, ]"#, &dictionary)?;
//! let matches = LogicService::new(source).evaluate(&criteria)?;
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_logic_ast as ast;
pub use octofhir_logic_diagnostics as diagnostics;
pub use octofhir_logic_eval as eval;
pub use octofhir_logic_model as model;
pub use octofhir_logic_parser as parser;
pub use octofhir_logic_types as types;

// Convenience re-exports
pub use octofhir_logic_ast::{ComparisonOperator, CriteriaExpr, LogicalOperator};
pub use octofhir_logic_diagnostics::{LogicError, Result};
pub use octofhir_logic_eval::{evaluate_async, Criteria, EvaluationOptions, LogicService};
pub use octofhir_logic_model::{
    AsyncObservationSource, ConceptDictionary, DataReference, InMemoryObservationSource, Observation,
    ObservationSource,
};
pub use octofhir_logic_parser::parse;
pub use octofhir_logic_types::{Code, Operand, SemanticType, TimeWindow, Value};

use log::debug;

/// Parse criteria text and resolve it against a dictionary
///
/// Syntax errors come back as [`LogicError::Parse`] with a location;
/// unknown references and type conflicts as [`LogicError::Validation`].
pub fn compile(source: &str, dictionary: &ConceptDictionary) -> Result<Criteria> {
    let expr = parse(source)?;
    let criteria = octofhir_logic_eval::resolve(&expr, dictionary)?;
    debug!("compiled {} leaf criteria, depth {}", criteria.leaves().len(), criteria.depth());
    Ok(criteria)
}

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
