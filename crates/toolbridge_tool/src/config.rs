//! Gate configuration

use serde::{Deserialize, Serialize};

/// What the gate enforces around each call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Reject arguments that do not satisfy the input schema
    pub validate_arguments: bool,
    /// Project responses onto the output schema
    pub filter_responses: bool,
}

impl GateConfig {
    /// Parse from a JSON document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON or has wrongly typed keys
    pub fn from_json_str(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// Pass everything through untouched
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            validate_arguments: false,
            filter_responses: false,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            validate_arguments: true,
            filter_responses: true,
        }
    }
}
