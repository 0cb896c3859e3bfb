//! Toolbridge Schema Compiler
//!
//! Turns the stored custom type graph into schema nodes:
//! - Snapshot of types and fields loaded once per compilation
//! - Depth-bounded compilation that terminates on cyclic graphs
//! - Input and output schemas for described interfaces
//! - Reference and cycle checks run before types are saved

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod check;
pub mod compiler;
pub mod context;
pub mod error;
pub mod graph;
pub mod interface;

// Re-exports
pub use check::{check_acyclic, check_references, GraphError, PENDING_TYPE_ID};
pub use compiler::SchemaCompiler;
pub use context::{BuildContext, MAX_RECURSION_DEPTH};
pub use error::CompileError;
pub use graph::{GraphRecords, SourceError, TypeGraph, TypeSource};
pub use interface::{compile_interface, compile_interface_schemas, InterfaceSchemas};
