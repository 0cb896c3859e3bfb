//! Toolbridge Core Types
//!
//! Pure record types with no I/O. Everything here is a snapshot of what the
//! management API stored; the schema engine and compiler only read it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod model;

// Re-exports
pub use id::{AppId, FieldId, InterfaceId, ParameterId, TypeId};
pub use model::{CustomType, CustomTypeField, FieldKind, InterfaceParameter, ParamGroup, UnknownKind};
