//! Tool registry for discovery and lookup by name.

use crate::trait_::ToolSpec;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// Error from registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Tool already registered
    #[error("tool already registered: {name}")]
    AlreadyRegistered {
        /// Tool name
        name: String,
    },
    /// Tool not found
    #[error("tool not found: {name}")]
    NotFound {
        /// Tool name
        name: String,
    },
    /// A writer panicked while holding the lock
    #[error("tool registry lock poisoned")]
    Poisoned,
}

/// Entry for a registered tool
#[derive(Debug, Clone)]
pub struct ToolEntry {
    /// The tool description
    pub spec: Arc<ToolSpec>,
    /// Whether tool is enabled
    pub enabled: bool,
}

/// Registry for tools, in registration order
///
/// Disabled tools stay registered but are hidden from lookups and listings.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns error if a tool with the same name is already registered
    pub fn register(&mut self, spec: ToolSpec) -> Result<(), RegistryError> {
        if self.tools.contains_key(&spec.name) {
            return Err(RegistryError::AlreadyRegistered { name: spec.name });
        }
        tracing::info!(tool = %spec.name, "tool registered");
        let name = spec.name.clone();
        self.tools.insert(
            name,
            ToolEntry {
                spec: Arc::new(spec),
                enabled: true,
            },
        );
        Ok(())
    }

    /// Get an enabled tool by name
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or disabled
    pub fn get(&self, name: &str) -> Result<Arc<ToolSpec>, RegistryError> {
        self.tools
            .get(name)
            .filter(|e| e.enabled)
            .map(|e| Arc::clone(&e.spec))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// List enabled tool names
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.tools
            .iter()
            .filter(|(_, e)| e.enabled)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Check if an enabled tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.get(name).is_some_and(|e| e.enabled)
    }

    /// Enable a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn enable(&mut self, name: &str) -> Result<(), RegistryError> {
        self.set_enabled(name, true)
    }

    /// Disable a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn disable(&mut self, name: &str) -> Result<(), RegistryError> {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let entry = self.tools.get_mut(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })?;
        entry.enabled = enabled;
        tracing::info!(tool = name, enabled, "tool state changed");
        Ok(())
    }

    /// Unregister a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found
    pub fn unregister(&mut self, name: &str) -> Result<(), RegistryError> {
        self.tools
            .shift_remove(name)
            .map(|_| tracing::info!(tool = name, "tool unregistered"))
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Number of enabled tools
    #[must_use]
    pub fn count(&self) -> usize {
        self.tools.values().filter(|e| e.enabled).count()
    }

    /// Check if no tool is enabled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Thread-safe registry for concurrent access
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: RwLock<ToolRegistry>,
}

impl SharedRegistry {
    /// Create a new shared registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool already registered or the lock is poisoned
    pub fn register(&self, spec: ToolSpec) -> Result<(), RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.register(spec)
    }

    /// Unregister a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or the lock is poisoned
    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.unregister(name)
    }

    /// Get an enabled tool by name
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or the lock is poisoned
    pub fn get(&self, name: &str) -> Result<Arc<ToolSpec>, RegistryError> {
        let registry = self.inner.read().map_err(|_| RegistryError::Poisoned)?;
        registry.get(name)
    }

    /// List enabled tool names
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned
    pub fn list(&self) -> Result<Vec<String>, RegistryError> {
        let registry = self.inner.read().map_err(|_| RegistryError::Poisoned)?;
        Ok(registry.list())
    }

    /// Enable a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or the lock is poisoned
    pub fn enable(&self, name: &str) -> Result<(), RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.enable(name)
    }

    /// Disable a tool
    ///
    /// # Errors
    ///
    /// Returns error if tool not found or the lock is poisoned
    pub fn disable(&self, name: &str) -> Result<(), RegistryError> {
        let mut registry = self.inner.write().map_err(|_| RegistryError::Poisoned)?;
        registry.disable(name)
    }
}
