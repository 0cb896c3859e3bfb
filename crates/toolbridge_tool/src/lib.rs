//! Toolbridge Tool Layer
//!
//! Tools built from described interfaces, a registry to find them, and a gate
//! that validates arguments and filters responses around every call. The
//! actual upstream call is behind the [`Invoker`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod gate;
pub mod registry;
pub mod trait_;

pub use config::GateConfig;
pub use gate::{ToolError, ToolGate};
pub use registry::{RegistryError, SharedRegistry, ToolEntry, ToolRegistry};
pub use trait_::{InvokeError, Invoker, ToolSpec};
