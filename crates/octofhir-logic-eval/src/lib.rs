//! Clinical criteria evaluation
//!
//! A [`Criteria`] tree pairs data references with comparison operators and
//! operands, combined with AND/OR. Construction validates operator, operand
//! and reference types up front, so evaluation never fails on them.
//! [`LogicService`] evaluates a tree against an injected
//! [`ObservationSource`](octofhir_logic_model::ObservationSource) and returns
//! the matching observations in the source's order.
//!
//! # Semantics
//!
//! - A leaf matches an observation when `value OP operand` holds under the
//!   reference's semantic type; coded references support equality only
//! - Missing values never match, under any operator
//! - AND intersects child results by observation id, OR unions them; AND
//!   stops fetching once its intermediate result is empty
//!
//! # Example
//!
//! ```ignore
//! use octofhir_logic_eval::{Criteria, LogicService};
//! use octofhir_logic_ast::ComparisonOperator;
//!
//! let criteria = Criteria::leaf(cd4, ComparisonOperator::GreaterThan, 200)?;
//! let matches = LogicService::new(source).evaluate(&criteria)?;
//! ```

pub mod criteria;
pub mod error;
pub mod listener;
pub mod operators;
pub mod options;
pub mod resolve;
pub mod service;

pub use criteria::{CompositeCriteria, Criteria, LeafCriteria};
pub use error::{EvalError, EvalResult};
pub use listener::{EvaluationListener, FetchCounter};
pub use options::EvaluationOptions;
pub use resolve::resolve;
pub use service::{evaluate_async, LogicService};
