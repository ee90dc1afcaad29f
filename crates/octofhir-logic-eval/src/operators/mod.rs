//! Operator semantics
//!
//! - Comparison operators (EQUALS .. GREATER THAN EQUALS) on typed values
//! - Logical operators (AND, OR) on ordered match sets

pub mod comparison;
pub mod logical;

pub use comparison::*;
pub use logical::*;
