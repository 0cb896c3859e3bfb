//! In-memory snapshot of the custom type graph.
//!
//! The snapshot is loaded in full before compilation begins; the compiler
//! issues no queries of its own and never mutates what it reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use toolbridge_core::{AppId, CustomType, CustomTypeField, TypeId};

/// Error loading records from storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Custom types could not be read
    #[error("failed to load custom types: {0}")]
    Types(String),
    /// Custom type fields could not be read
    #[error("failed to load custom type fields: {0}")]
    Fields(String),
}

/// Storage holding custom type records
pub trait TypeSource {
    /// Every stored custom type
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read
    fn load_types(&self) -> Result<Vec<CustomType>, SourceError>;

    /// Every stored custom type field, in storage order
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read
    fn load_fields(&self) -> Result<Vec<CustomTypeField>, SourceError>;
}

/// Plain record lists, as held in memory or read from a graph file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecords {
    /// Custom types
    #[serde(default)]
    pub types: Vec<CustomType>,
    /// Custom type fields
    #[serde(default)]
    pub fields: Vec<CustomTypeField>,
}

impl TypeSource for GraphRecords {
    fn load_types(&self) -> Result<Vec<CustomType>, SourceError> {
        Ok(self.types.clone())
    }

    fn load_fields(&self) -> Result<Vec<CustomTypeField>, SourceError> {
        Ok(self.fields.clone())
    }
}

/// Indexed, read-only view of all custom types and their fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGraph {
    types: HashMap<TypeId, CustomType>,
    fields: HashMap<TypeId, Vec<CustomTypeField>>,
}

impl TypeGraph {
    /// Index loose records. Field order per type follows input order.
    #[must_use]
    pub fn from_records(types: Vec<CustomType>, fields: Vec<CustomTypeField>) -> Self {
        let types = types.into_iter().map(|t| (t.id, t)).collect();
        let mut by_type: HashMap<TypeId, Vec<CustomTypeField>> = HashMap::new();
        for field in fields {
            by_type.entry(field.custom_type_id).or_default().push(field);
        }
        Self {
            types,
            fields: by_type,
        }
    }

    /// Load everything from storage in two reads
    ///
    /// # Errors
    ///
    /// Returns error if either read fails
    pub fn load(source: &dyn TypeSource) -> Result<Self, SourceError> {
        let types = source.load_types()?;
        let fields = source.load_fields()?;
        tracing::debug!(types = types.len(), fields = fields.len(), "loaded type graph");
        Ok(Self::from_records(types, fields))
    }

    /// Look up a custom type
    #[must_use]
    pub fn custom_type(&self, id: TypeId) -> Option<&CustomType> {
        self.types.get(&id)
    }

    /// Fields of a type; a type with no stored fields has an empty list
    #[must_use]
    pub fn fields(&self, id: TypeId) -> &[CustomTypeField] {
        self.fields.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Types owned by an application
    pub fn types_of_app(&self, app_id: AppId) -> impl Iterator<Item = &CustomType> {
        self.types.values().filter(move |t| t.app_id == app_id)
    }

    /// Number of types in the snapshot
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Whether the snapshot has no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<GraphRecords> for TypeGraph {
    fn from(records: GraphRecords) -> Self {
        Self::from_records(records.types, records.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbridge_core::{FieldId, FieldKind};

    fn records() -> GraphRecords {
        GraphRecords {
            types: vec![
                CustomType::new(TypeId::new(1), AppId::new(1), "App1Type"),
                CustomType::new(TypeId::new(2), AppId::new(2), "App2Type"),
            ],
            fields: vec![
                CustomTypeField::new(FieldId::new(1), TypeId::new(1), "first", FieldKind::String),
                CustomTypeField::new(FieldId::new(2), TypeId::new(1), "second", FieldKind::Number),
            ],
        }
    }

    struct BrokenSource;

    impl TypeSource for BrokenSource {
        fn load_types(&self) -> Result<Vec<CustomType>, SourceError> {
            Err(SourceError::Types("connection refused".to_string()))
        }

        fn load_fields(&self) -> Result<Vec<CustomTypeField>, SourceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_lookup_type() {
        let graph = TypeGraph::from(records());
        assert_eq!(graph.custom_type(TypeId::new(2)).unwrap().app_id, AppId::new(2));
        assert!(graph.custom_type(TypeId::new(999)).is_none());
        assert_eq!(graph.type_count(), 2);
    }

    #[test]
    fn test_fields_keep_order() {
        let graph = TypeGraph::from(records());
        let names: Vec<_> = graph.fields(TypeId::new(1)).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let graph = TypeGraph::from(records());
        assert!(graph.fields(TypeId::new(2)).is_empty());
        assert!(graph.fields(TypeId::new(999)).is_empty());
    }

    #[test]
    fn test_types_of_app() {
        let graph = TypeGraph::from(records());
        let ids: Vec<_> = graph.types_of_app(AppId::new(1)).map(|t| t.id).collect();
        assert_eq!(ids, [TypeId::new(1)]);
    }

    #[test]
    fn test_load_from_source() {
        let graph = TypeGraph::load(&records()).unwrap();
        assert_eq!(graph.type_count(), 2);
        let err = TypeGraph::load(&BrokenSource).unwrap_err();
        assert_eq!(err.to_string(), "failed to load custom types: connection refused");
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"{
            "types": [{"id": 1, "app_id": 7, "name": "Point", "description": "2d"}],
            "fields": [
                {"id": 1, "custom_type_id": 1, "name": "x", "type": "number", "required": true},
                {"id": 2, "custom_type_id": 1, "name": "y", "type": "number"}
            ]
        }"#;
        let records: GraphRecords = serde_json::from_str(json).unwrap();
        let graph = TypeGraph::from(records);
        assert_eq!(graph.fields(TypeId::new(1)).len(), 2);
        assert!(graph.fields(TypeId::new(1))[0].required);
    }
}
