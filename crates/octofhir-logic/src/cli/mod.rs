//! CLI functionality for the logic tool
//!
//! - Criteria evaluation against JSON data files
//! - Criteria validation against a concept dictionary
//! - Output formatting

pub mod evaluate;
pub mod output;
pub mod validate;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Criteria text given inline or read from a file
pub fn read_criteria(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read criteria file: {}", path.display())),
        (None, None) => anyhow::bail!("No criteria given; pass the text or --input FILE"),
    }
}
