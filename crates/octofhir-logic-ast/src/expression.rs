//! Untyped criteria parse tree
//!
//! The tree mirrors the text syntax one-to-one and carries no type
//! information; references are plain names and literals keep the shape they
//! were written in. Resolution against a concept dictionary happens later.

use crate::{ComparisonOperator, LogicalOperator};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A criteria expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CriteriaExpr {
    /// `reference OP literal [within [start, end]]`
    Leaf(LeafExpr),
    /// `a and b and c` / `a or b`
    Logical(LogicalExpr),
}

impl CriteriaExpr {
    pub fn leaf(reference: impl Into<String>, operator: ComparisonOperator, literal: Literal) -> Self {
        Self::Leaf(LeafExpr {
            reference: reference.into(),
            operator,
            literal,
            window: None,
        })
    }

    pub fn logical(operator: LogicalOperator, operands: Vec<CriteriaExpr>) -> Self {
        Self::Logical(LogicalExpr { operator, operands })
    }

    /// Nesting depth, a leaf being 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Logical(l) => 1 + l.operands.iter().map(Self::depth).max().unwrap_or(0),
        }
    }
}

/// Leaf comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafExpr {
    /// Concept name, e.g. `CD4 COUNT`
    pub reference: String,
    pub operator: ComparisonOperator,
    pub literal: Literal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowExpr>,
}

impl LeafExpr {
    pub fn with_window(mut self, window: WindowExpr) -> Self {
        self.window = Some(window);
        self
    }
}

/// AND / OR over two or more operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalExpr {
    pub operator: LogicalOperator,
    pub operands: Vec<CriteriaExpr>,
}

/// Literal as written in the criteria text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Number(Decimal),
    Text(String),
    Temporal(DateTime<Utc>),
    Code(CodeLiteral),
}

/// `Code 'POS' from 'LOCAL'`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLiteral {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// `within [start, end]`; either side may be left open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowExpr {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// ============================================================================
// Canonical text rendering
// ============================================================================

fn write_quoted(f: &mut fmt::Formatter<'_>, quote: char, s: &str) -> fmt::Result {
    write!(f, "{quote}")?;
    for ch in s.chars() {
        if ch == quote || ch == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{ch}")?;
    }
    write!(f, "{quote}")
}

fn write_temporal(f: &mut fmt::Formatter<'_>, value: &DateTime<Utc>) -> fmt::Result {
    write!(f, "@{}", value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write_quoted(f, '\'', s),
            Self::Temporal(t) => write_temporal(f, t),
            Self::Code(c) => {
                write!(f, "Code ")?;
                write_quoted(f, '\'', &c.code)?;
                if let Some(system) = &c.system {
                    write!(f, " from ")?;
                    write_quoted(f, '\'', system)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for WindowExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "within [")?;
        if let Some(start) = &self.start {
            write_temporal(f, start)?;
        }
        write!(f, ", ")?;
        if let Some(end) = &self.end {
            write_temporal(f, end)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for LeafExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, '"', &self.reference)?;
        write!(f, " {} {}", self.operator.symbol(), self.literal)?;
        if let Some(window) = &self.window {
            write!(f, " {window}")?;
        }
        Ok(())
    }
}

impl fmt::Display for LogicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator.keyword())?;
            }
            write!(f, "({operand})")?;
        }
        Ok(())
    }
}

impl fmt::Display for CriteriaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => leaf.fmt(f),
            Self::Logical(logical) => logical.fmt(f),
        }
    }
}
