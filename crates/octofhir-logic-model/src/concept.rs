//! Concept dictionary: named data references and their declared types

use crate::DataAccessError;
use indexmap::IndexMap;
use octofhir_logic_types::SemanticType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A clinical variable that criteria can reference, e.g. `CD4 COUNT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataReference {
    pub name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl DataReference {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// Declared data references, in declaration order
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptDictionary {
    entries: IndexMap<String, DataReference>,
}

fn key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Check if two reference names are the same under dictionary lookup rules
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a == b || key(a) == key(b)
}

impl ConceptDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a reference, returning the one it replaced
    pub fn insert(&mut self, reference: DataReference) -> Option<DataReference> {
        self.entries.insert(key(&reference.name), reference)
    }

    pub fn with(mut self, reference: DataReference) -> Self {
        self.insert(reference);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DataReference> {
        self.entries.get(&key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataReference> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from a JSON array of `{"name", "type", "display"}` objects
    pub fn from_json(json: &str) -> Result<Self, DataAccessError> {
        let references: Vec<DataReference> = serde_json::from_str(json)?;
        Ok(references.into_iter().collect())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DataAccessError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl FromIterator<DataReference> for ConceptDictionary {
    fn from_iter<I: IntoIterator<Item = DataReference>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for reference in iter {
            dictionary.insert(reference);
        }
        dictionary
    }
}

impl Serialize for ConceptDictionary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    const CONCEPTS: &str = r#"[
        {"name": "CD4 COUNT", "type": "numeric", "display": "CD4 count (cells/uL)"},
        {"name": "HIV STATUS", "type": "coded"}
    ]"#;

    #[test]
    fn test_from_json() {
        let dictionary = ConceptDictionary::from_json(CONCEPTS).unwrap();

        assert_eq!(dictionary.len(), 2);
        let cd4 = dictionary.get("cd4 count").unwrap();
        assert_eq!(cd4.name, "CD4 COUNT");
        assert_eq!(cd4.semantic_type, SemanticType::Numeric);
        assert!(dictionary.contains("HIV STATUS"));
        assert!(!dictionary.contains("WEIGHT"));
    }

    #[rstest]
    #[case("CD4 COUNT", "cd4 count", true)]
    #[case(" WEIGHT ", "weight", true)]
    #[case("Größe", "GRÖSSE", true)]
    #[case("Éosinophiles", "ÉOSINOPHILES", true)]
    #[case("WEIGHT", "HEIGHT", false)]
    fn test_name_folding(#[case] declared: &str, #[case] used: &str, #[case] same: bool) {
        let dictionary = ConceptDictionary::new().with(DataReference::new(declared, SemanticType::Numeric));

        assert_eq!(same_name(declared, used), same);
        assert_eq!(dictionary.contains(used), same);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let dictionary = ConceptDictionary::new()
            .with(DataReference::new("WEIGHT", SemanticType::Numeric))
            .with(DataReference::new("ADMISSION", SemanticType::Temporal));

        let names: Vec<_> = dictionary.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["WEIGHT", "ADMISSION"]);
    }

    #[test]
    fn test_invalid_json() {
        let err = ConceptDictionary::from_json(r#"[{"name": "X", "type": "boolean"}]"#).unwrap_err();
        assert!(matches!(err, DataAccessError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONCEPTS.as_bytes()).unwrap();
        file.flush().unwrap();

        let dictionary = ConceptDictionary::from_file(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);

        let missing = ConceptDictionary::from_file("/nonexistent/concepts.json").unwrap_err();
        assert!(matches!(missing, DataAccessError::Io(_)));
    }
}
