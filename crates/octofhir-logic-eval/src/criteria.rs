//! Validated criteria trees
//!
//! Criteria are immutable once built. Every constructor checks operator,
//! operand and reference compatibility, so a tree that exists can be
//! evaluated without type errors.

use octofhir_logic_ast::{
    CodeLiteral, ComparisonOperator, CriteriaExpr, LeafExpr, Literal, LogicalExpr, LogicalOperator,
    WindowExpr,
};
use octofhir_logic_model::{DataReference, ObservationQuery};
use octofhir_logic_types::{Operand, TimeWindow, ValidationError, Value};
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// A criteria tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criteria {
    Leaf(LeafCriteria),
    Composite(CompositeCriteria),
}

/// `reference OP operand`, restricted to observations inside `window`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafCriteria {
    reference: DataReference,
    operator: ComparisonOperator,
    operand: Operand,
    window: TimeWindow,
}

/// AND / OR over one or more children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeCriteria {
    operator: LogicalOperator,
    children: Vec<Criteria>,
}

impl LeafCriteria {
    fn new(
        reference: DataReference,
        operator: ComparisonOperator,
        operand: Operand,
        window: TimeWindow,
    ) -> Result<Self, ValidationError> {
        let declared = reference.semantic_type;

        if !declared.supports(operator) || !operand.semantic_type().supports(operator) {
            return Err(ValidationError::OrderingOnCoded {
                reference: reference.name,
                operator,
            });
        }

        let operand = operand.normalize_to(declared)?;
        if operand.semantic_type() != declared {
            return Err(ValidationError::TypeMismatch {
                reference: reference.name,
                expected: declared,
                found: operand.semantic_type(),
            });
        }

        Ok(Self {
            reference,
            operator,
            operand,
            window,
        })
    }

    pub fn reference(&self) -> &DataReference {
        &self.reference
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// The fetch this leaf needs, optionally scoped to one subject
    pub fn query(&self, subject: Option<&str>) -> ObservationQuery {
        let query = ObservationQuery::new(&self.reference.name).with_window(self.window);
        match subject {
            Some(subject) => query.for_subject(subject),
            None => query,
        }
    }

    fn to_expr(&self) -> LeafExpr {
        let literal = match self.operand.value() {
            Value::Numeric(n) => Literal::Number(*n),
            Value::Text(s) => Literal::Text(s.clone()),
            Value::Temporal(t) => Literal::Temporal(*t),
            Value::Coded(c) => Literal::Code(CodeLiteral {
                code: c.code.clone(),
                system: c.system.clone(),
            }),
        };
        let window = (!self.window.is_unbounded()).then(|| WindowExpr {
            start: self.window.start(),
            end: self.window.end(),
        });

        LeafExpr {
            reference: self.reference.name.clone(),
            operator: self.operator,
            literal,
            window,
        }
    }
}

impl CompositeCriteria {
    pub fn operator(&self) -> LogicalOperator {
        self.operator
    }

    pub fn children(&self) -> &[Criteria] {
        &self.children
    }
}

impl Criteria {
    /// Build a leaf over all observation times
    ///
    /// Fails with [`ValidationError::OrderingOnCoded`] for an ordering
    /// operator on a coded reference or operand, and with
    /// [`ValidationError::TypeMismatch`] when the operand's type differs from
    /// the reference's. Text operands are first read as the reference's type
    /// when it is coded or temporal.
    pub fn leaf(
        reference: DataReference,
        operator: ComparisonOperator,
        operand: impl Into<Operand>,
    ) -> Result<Self, ValidationError> {
        Self::leaf_within(reference, operator, operand, TimeWindow::unbounded())
    }

    /// Build a leaf restricted to observations inside `window`
    pub fn leaf_within(
        reference: DataReference,
        operator: ComparisonOperator,
        operand: impl Into<Operand>,
        window: TimeWindow,
    ) -> Result<Self, ValidationError> {
        LeafCriteria::new(reference, operator, operand.into(), window).map(Self::Leaf)
    }

    pub fn and(children: impl IntoIterator<Item = Criteria>) -> Result<Self, ValidationError> {
        Self::composite(LogicalOperator::And, children)
    }

    pub fn or(children: impl IntoIterator<Item = Criteria>) -> Result<Self, ValidationError> {
        Self::composite(LogicalOperator::Or, children)
    }

    /// Combine children; at least one is required
    pub fn composite(
        operator: LogicalOperator,
        children: impl IntoIterator<Item = Criteria>,
    ) -> Result<Self, ValidationError> {
        let children: Vec<Criteria> = children.into_iter().collect();
        if children.is_empty() {
            return Err(ValidationError::EmptyComposite { operator });
        }
        Ok(Self::Composite(CompositeCriteria { operator, children }))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Nesting depth, a leaf being 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Composite(c) => 1 + c.children.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// All leaves, left to right
    pub fn leaves(&self) -> SmallVec<[&LeafCriteria; 4]> {
        let mut leaves = SmallVec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut SmallVec<[&'a LeafCriteria; 4]>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::Composite(c) => c.children.iter().for_each(|child| child.collect_leaves(out)),
        }
    }

    /// Every fetch a full evaluation may issue, without duplicates
    pub fn queries(&self, subject: Option<&str>) -> Vec<ObservationQuery> {
        let mut queries: Vec<ObservationQuery> = Vec::new();
        for leaf in self.leaves() {
            let query = leaf.query(subject);
            if !queries.contains(&query) {
                queries.push(query);
            }
        }
        queries
    }

    /// Convert back to the untyped parse tree
    pub fn to_expr(&self) -> CriteriaExpr {
        match self {
            Self::Leaf(leaf) => CriteriaExpr::Leaf(leaf.to_expr()),
            Self::Composite(c) => CriteriaExpr::Logical(LogicalExpr {
                operator: c.operator,
                operands: c.children.iter().map(Self::to_expr).collect(),
            }),
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_expr().fmt(f)
    }
}
