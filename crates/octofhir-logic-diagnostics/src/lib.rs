//! Diagnostics for the logic criteria workspace
//!
//! This crate provides the error handling infrastructure shared by the parser,
//! criteria construction and evaluation crates: structured error codes, source
//! locations for the criteria text syntax, and the umbrella [`LogicError`].

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for logic operations
pub type Result<T> = std::result::Result<T, LogicError>;
