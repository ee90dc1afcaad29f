//! Comparison and logical operators for criteria

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Relation between an observation value (left) and an operand (right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    /// Equality
    Equals,
    /// Inequality
    NotEquals,
    /// Strictly less than
    LessThan,
    /// Less than or equal
    LessThanEquals,
    /// Strictly greater than
    GreaterThan,
    /// Greater than or equal
    GreaterThanEquals,
}

impl ComparisonOperator {
    /// Every operator, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Equals,
        Self::NotEquals,
        Self::LessThan,
        Self::LessThanEquals,
        Self::GreaterThan,
        Self::GreaterThanEquals,
    ];

    /// Human-readable label, e.g. `GREATER THAN`
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT EQUALS",
            Self::LessThan => "LESS THAN",
            Self::LessThanEquals => "LESS THAN EQUALS",
            Self::GreaterThan => "GREATER THAN",
            Self::GreaterThanEquals => "GREATER THAN EQUALS",
        }
    }

    /// Operator symbol used by the criteria text syntax
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
        }
    }

    /// Check if the operator needs an ordering (as opposed to plain equality)
    pub const fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanEquals | Self::GreaterThan | Self::GreaterThanEquals
        )
    }

    /// The complementary relation (`<` becomes `>=`)
    pub const fn negate(&self) -> Self {
        match self {
            Self::Equals => Self::NotEquals,
            Self::NotEquals => Self::Equals,
            Self::LessThan => Self::GreaterThanEquals,
            Self::LessThanEquals => Self::GreaterThan,
            Self::GreaterThan => Self::LessThanEquals,
            Self::GreaterThanEquals => Self::LessThan,
        }
    }

    /// Decide the relation from the ordering of `left` against `right`
    pub const fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Equals => matches!(ordering, Ordering::Equal),
            Self::NotEquals => !matches!(ordering, Ordering::Equal),
            Self::LessThan => matches!(ordering, Ordering::Less),
            Self::LessThanEquals => !matches!(ordering, Ordering::Greater),
            Self::GreaterThan => matches!(ordering, Ordering::Greater),
            Self::GreaterThanEquals => !matches!(ordering, Ordering::Less),
        }
    }

    /// Parse a symbol (`>=`, `!=`, ...)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "=" | "==" => Some(Self::Equals),
            "!=" | "<>" => Some(Self::NotEquals),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanEquals),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanEquals),
            _ => None,
        }
    }

    /// Parse a label; case-insensitive, `_` accepted in place of spaces
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        match normalized.as_str() {
            "EQUALS" | "EQ" => Some(Self::Equals),
            "NOT EQUALS" | "NE" | "NEQ" => Some(Self::NotEquals),
            "LESS THAN" | "LT" => Some(Self::LessThan),
            "LESS THAN EQUALS" | "LTE" => Some(Self::LessThanEquals),
            "GREATER THAN" | "GT" => Some(Self::GreaterThan),
            "GREATER THAN EQUALS" | "GTE" => Some(Self::GreaterThanEquals),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when an operator label or symbol is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown comparison operator: '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for ComparisonOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Combinator for composite criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    /// Intersection of the children's matches
    And,
    /// Union of the children's matches
    Or,
}

impl LogicalOperator {
    /// Keyword used by the criteria text syntax
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

impl FromStr for LogicalOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" | "&&" => Ok(Self::And),
            "OR" | "||" => Ok(Self::Or),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}
