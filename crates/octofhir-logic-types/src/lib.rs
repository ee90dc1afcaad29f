//! Type system for clinical criteria
//!
//! This crate defines:
//! - [`SemanticType`], the declared type of a data reference
//! - [`Value`] and [`Code`], the runtime representation of observation values
//! - [`Operand`], the right-hand side of a comparison, with normalization from
//!   primitives, text and JSON
//! - [`TimeWindow`], the inclusive observation time range of a leaf
//! - value comparison under each semantic type
//! - [`ValidationError`], raised while building criteria

mod compare;
mod error;
mod normalize;
mod operand;
mod semantic;
mod value;
mod window;

pub use compare::*;
pub use error::*;
pub use normalize::*;
pub use operand::*;
pub use semantic::*;
pub use value::*;
pub use window::*;
