//! Schema nodes describing the expected shape of run-time values.
//!
//! A node serializes to the JSON-Schema subset tool consumers understand:
//! `type`, `description`, `properties`, `required` and `items`.

use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Logical kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Text
    String,
    /// Any numeric value, whatever its width
    Number,
    /// True or false
    Boolean,
    /// Keyed mapping with declared properties
    Object,
    /// Sequence whose elements all match `items`
    Array,
}

impl SchemaKind {
    /// Name used in the serialized schema
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether the kind is a leaf
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean)
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reading a schema document
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Document does not have the schema shape
    #[error("invalid schema document: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// One node of a schema tree.
///
/// `kind` decides which other members matter: `properties` and `required`
/// only for objects, `items` only for arrays. Children sit behind `Arc` so a
/// single node can be shared by several parents; the satisfaction engine
/// keys its cache on node identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemaNode {
    /// Logical kind
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Informational text, never affects behavior
    #[serde(default)]
    pub description: String,
    /// Declared properties of an object
    #[serde(default)]
    pub properties: IndexMap<String, Arc<SchemaNode>>,
    /// Property names that must be present and non-null
    #[serde(default)]
    pub required: IndexSet<String>,
    /// Element schema of an array
    #[serde(default)]
    pub items: Option<Arc<SchemaNode>>,
}

impl SchemaNode {
    /// Create a bare node of the given kind
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: String::new(),
            properties: IndexMap::new(),
            required: IndexSet::new(),
            items: None,
        }
    }

    /// String leaf
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    /// Number leaf
    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    /// Boolean leaf
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Object with no properties yet
    #[must_use]
    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    /// Array of `items`
    #[must_use]
    pub fn array(items: impl Into<Arc<SchemaNode>>) -> Self {
        let mut node = Self::new(SchemaKind::Array);
        node.items = Some(items.into());
        node
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an owned property
    #[must_use]
    pub fn with_property(self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.with_shared_property(name, Arc::new(schema))
    }

    /// Add a property pointing at a node other parents may share
    #[must_use]
    pub fn with_shared_property(mut self, name: impl Into<String>, schema: Arc<SchemaNode>) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a property name as required
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Whether this node itself lists required names
    #[must_use]
    pub fn has_own_required(&self) -> bool {
        self.kind == SchemaKind::Object && !self.required.is_empty()
    }

    /// Parse a JSON-Schema-shaped document
    ///
    /// # Errors
    ///
    /// Returns error if the document has no known `type` or a member has the wrong shape
    pub fn from_json(document: &Value) -> Result<Self, SchemaError> {
        Ok(Self::deserialize(document)?)
    }

    /// Render as a JSON-Schema-shaped document
    #[must_use]
    pub fn to_json(&self) -> Value {
        // Serializing a tree of strings and maps into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if !self.description.is_empty() {
            map.serialize_entry("description", &self.description)?;
        }
        match self.kind {
            SchemaKind::Object => {
                map.serialize_entry("properties", &self.properties)?;
                map.serialize_entry("required", &self.required)?;
            }
            SchemaKind::Array => {
                if let Some(items) = &self.items {
                    map.serialize_entry("items", items)?;
                }
            }
            _ => {}
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builders() {
        let schema = SchemaNode::object()
            .with_property("name", SchemaNode::string())
            .with_required("name")
            .with_description("person");
        assert_eq!(schema.kind, SchemaKind::Object);
        assert!(schema.has_own_required());
        assert_eq!(schema.properties.len(), 1);
        assert_eq!(schema.description, "person");
    }

    #[test]
    fn test_to_json_object_always_lists_properties() {
        let schema = SchemaNode::object();
        assert_eq!(
            schema.to_json(),
            json!({"type": "object", "properties": {}, "required": []})
        );
    }

    #[test]
    fn test_to_json_scalar_is_minimal() {
        let schema = SchemaNode::number().with_description("age");
        assert_eq!(schema.to_json(), json!({"type": "number", "description": "age"}));
    }

    #[test]
    fn test_from_json_nested() {
        let document = json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "owner": {
                    "type": "object",
                    "properties": {"id": {"type": "number"}},
                    "required": ["id"]
                }
            },
            "required": ["owner"]
        });
        let schema = SchemaNode::from_json(&document).unwrap();
        let tags = &schema.properties["tags"];
        assert_eq!(tags.kind, SchemaKind::Array);
        assert_eq!(tags.items.as_ref().unwrap().kind, SchemaKind::String);
        assert!(schema.properties["owner"].required.contains("id"));
        assert_eq!(schema.to_json(), document);
    }

    #[test]
    fn test_from_json_unknown_type() {
        let result = SchemaNode::from_json(&json!({"type": "integer"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_required_is_a_set() {
        let schema = SchemaNode::from_json(&json!({
            "type": "object",
            "required": ["a", "a", "b"]
        }))
        .unwrap();
        assert_eq!(schema.required.len(), 2);
    }

    #[test]
    fn test_shared_property_keeps_identity() {
        let shared = Arc::new(SchemaNode::string());
        let schema = SchemaNode::object()
            .with_shared_property("a", Arc::clone(&shared))
            .with_shared_property("b", Arc::clone(&shared));
        assert!(Arc::ptr_eq(&schema.properties["a"], &schema.properties["b"]));
    }
}
