//! Semantic type discriminator

use octofhir_logic_ast::ComparisonOperator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a data reference or operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Decimal quantities (lab values, vitals)
    Numeric,
    /// Free text
    Text,
    /// Dates and date-times
    Temporal,
    /// Coded concepts, compared by code and system
    Coded,
}

impl SemanticType {
    /// Check if values of this type support the given operator
    pub const fn supports(&self, operator: ComparisonOperator) -> bool {
        match self {
            Self::Coded => !operator.is_ordering(),
            Self::Numeric | Self::Text | Self::Temporal => true,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Temporal => "temporal",
            Self::Coded => "coded",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "number" | "decimal" => Ok(Self::Numeric),
            "text" | "string" => Ok(Self::Text),
            "temporal" | "date" | "datetime" => Ok(Self::Temporal),
            "coded" | "code" => Ok(Self::Coded),
            other => Err(format!("Unknown semantic type: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coded_supports_equality_only() {
        for op in ComparisonOperator::ALL {
            assert_eq!(SemanticType::Coded.supports(op), !op.is_ordering());
            assert!(SemanticType::Numeric.supports(op));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Date".parse::<SemanticType>(), Ok(SemanticType::Temporal));
        assert_eq!("code".parse::<SemanticType>(), Ok(SemanticType::Coded));
        assert!("boolean".parse::<SemanticType>().is_err());
    }
}
