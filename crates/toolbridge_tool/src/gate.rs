//! Schema-checked tool calls.
//!
//! The gate sits between tool consumers and the invoker: arguments are
//! validated against the tool's input schema before anything leaves the
//! process, and responses are projected onto the output schema before they
//! are handed back.

use crate::config::GateConfig;
use crate::registry::{RegistryError, SharedRegistry};
use crate::trait_::{InvokeError, Invoker};
use std::sync::Arc;
use toolbridge_schema::{filter, Satisfier, Value};

/// Error from a gated call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Tool lookup failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Arguments do not satisfy the input schema
    #[error("invalid arguments for {name} at {path}: {reason}")]
    InvalidArguments {
        /// Tool name
        name: String,
        /// Where the arguments stopped matching
        path: String,
        /// What was expected there
        reason: String,
    },

    /// Upstream call failed
    #[error("invocation of {name} failed: {source}")]
    Invoke {
        /// Tool name
        name: String,
        /// Underlying failure
        source: InvokeError,
    },
}

/// Validating, filtering front of an invoker
pub struct ToolGate<I: Invoker> {
    registry: Arc<SharedRegistry>,
    invoker: I,
    config: GateConfig,
}

impl<I: Invoker> ToolGate<I> {
    /// Create a gate with the default configuration
    #[must_use]
    pub fn new(registry: Arc<SharedRegistry>, invoker: I) -> Self {
        Self {
            registry,
            invoker,
            config: GateConfig::default(),
        }
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in effect
    #[must_use]
    pub fn config(&self) -> GateConfig {
        self.config
    }

    /// Registry the gate resolves tools from
    #[must_use]
    pub fn registry(&self) -> &Arc<SharedRegistry> {
        &self.registry
    }

    /// Call a tool by name
    ///
    /// # Errors
    ///
    /// Returns error if the tool is unknown, the arguments are rejected or
    /// the invoker fails
    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let spec = self.registry.get(name)?;

        if self.config.validate_arguments {
            let mut satisfier = Satisfier::new();
            if !satisfier.check(&spec.input, &arguments) {
                let (path, reason) = satisfier
                    .last_failure()
                    .map(|m| (m.path.clone(), m.reason.clone()))
                    .unwrap_or_else(|| ("/".to_string(), "does not match".to_string()));
                tracing::info!(tool = name, %path, %reason, "arguments rejected");
                return Err(ToolError::InvalidArguments {
                    name: name.to_string(),
                    path,
                    reason,
                });
            }
        }

        let response = match self.invoker.invoke(&spec, arguments).await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(tool = name, error = %source, "tool invocation failed");
                return Err(ToolError::Invoke {
                    name: name.to_string(),
                    source,
                });
            }
        };

        let response = match (&spec.output, self.config.filter_responses) {
            (Some(output), true) => filter(Some(&**output), &response),
            _ => response,
        };
        tracing::debug!(tool = name, "tool call completed");
        Ok(response)
    }
}
