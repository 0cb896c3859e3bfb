//! Tool description and the invoker seam

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use toolbridge_compile::{compile_interface_schemas, CompileError, TypeGraph};
use toolbridge_core::InterfaceParameter;
use toolbridge_schema::{SchemaNode, Value};

/// A callable tool as exposed to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    /// Unique tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Schema arguments must satisfy
    pub input: Arc<SchemaNode>,
    /// Schema responses are projected onto, if any
    pub output: Option<Arc<SchemaNode>>,
}

impl ToolSpec {
    /// Create a tool with an input schema and no output schema
    #[must_use]
    pub fn new(name: impl Into<String>, input: SchemaNode) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input: Arc::new(input),
            output: None,
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set output schema
    #[must_use]
    pub fn with_output(mut self, output: SchemaNode) -> Self {
        self.output = Some(Arc::new(output));
        self
    }

    /// Build a tool from an interface's parameters
    ///
    /// An interface without output parameters gets no output schema, so its
    /// responses pass through unfiltered.
    ///
    /// # Errors
    ///
    /// Returns error if either parameter group fails to compile
    pub fn from_interface(
        graph: &TypeGraph,
        name: impl Into<String>,
        description: impl Into<String>,
        params: &[InterfaceParameter],
    ) -> Result<Self, CompileError> {
        let schemas = compile_interface_schemas(graph, params)?;
        let output = (!schemas.output.properties.is_empty()).then(|| Arc::new(schemas.output));
        Ok(Self {
            name: name.into(),
            description: description.into(),
            input: Arc::new(schemas.input),
            output,
        })
    }
}

/// Error from the upstream call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    /// Upstream could not be reached
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    /// Upstream answered with a failure
    #[error("upstream returned status {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Upstream response could not be decoded
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// Performs the actual call a tool stands for
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Call the tool with already validated arguments
    ///
    /// # Errors
    ///
    /// Returns error if the upstream call fails
    async fn invoke(&self, tool: &ToolSpec, arguments: Value) -> Result<Value, InvokeError>;
}
