//! Toolbridge Schema Engine
//!
//! Declarative schema nodes plus the two engines that consume them:
//! satisfaction (does a value conform?) and filtering (keep only what the
//! schema declares). Both are pure functions over borrowed inputs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod schema;
pub mod value;
pub mod satisfy;
pub mod filter;

pub use schema::{SchemaError, SchemaKind, SchemaNode};
pub use value::{kind_of, to_value, Value, ValueError};
pub use satisfy::{satisfies, satisfies_typed, Mismatch, Satisfier, SatisfyStats};
pub use filter::{filter, filter_typed};
