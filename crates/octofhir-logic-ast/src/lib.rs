//! Logic criteria syntax definitions
//!
//! This crate defines the closed operator sets used by clinical criteria
//! ([`ComparisonOperator`], [`LogicalOperator`]) and the untyped tree produced
//! by the criteria parser before references are resolved against a concept
//! dictionary.

mod expression;
mod operator;

pub use expression::*;
pub use operator::*;
