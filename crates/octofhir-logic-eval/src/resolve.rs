//! Resolution of parsed criteria against a concept dictionary

use crate::Criteria;
use octofhir_logic_ast::{CriteriaExpr, LeafExpr, Literal};
use octofhir_logic_model::ConceptDictionary;
use octofhir_logic_types::{Code, Operand, TimeWindow, ValidationError};

/// Turn a parse tree into validated criteria
///
/// Every reference must be declared in the dictionary; its declared type
/// decides how literals are read and which operators are allowed.
pub fn resolve(expr: &CriteriaExpr, dictionary: &ConceptDictionary) -> Result<Criteria, ValidationError> {
    match expr {
        CriteriaExpr::Leaf(leaf) => resolve_leaf(leaf, dictionary),
        CriteriaExpr::Logical(logical) => {
            let children = logical
                .operands
                .iter()
                .map(|operand| resolve(operand, dictionary))
                .collect::<Result<Vec<_>, _>>()?;
            Criteria::composite(logical.operator, children)
        }
    }
}

fn resolve_leaf(leaf: &LeafExpr, dictionary: &ConceptDictionary) -> Result<Criteria, ValidationError> {
    let reference = dictionary
        .get(&leaf.reference)
        .ok_or_else(|| ValidationError::UnknownReference {
            name: leaf.reference.clone(),
        })?;

    let operand = match &leaf.literal {
        Literal::Number(n) => Operand::numeric(*n),
        Literal::Text(s) => Operand::text(s),
        Literal::Temporal(t) => Operand::temporal(*t),
        Literal::Code(c) => {
            let code = Code::new(&c.code);
            Operand::coded(match &c.system {
                Some(system) => code.with_system(system),
                None => code,
            })
        }
    };

    let window = match &leaf.window {
        Some(w) => TimeWindow::new(w.start, w.end)?,
        None => TimeWindow::unbounded(),
    };

    Criteria::leaf_within(reference.clone(), leaf.operator, operand, window)
}
