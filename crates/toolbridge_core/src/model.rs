//! Stored records describing custom types and interface parameters.
//!
//! These are read-only snapshots of what the management API persisted.
//! Nothing in toolbridge mutates them after loading.

use crate::id::{AppId, FieldId, InterfaceId, ParameterId, TypeId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared kind of a field or parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Any numeric value
    Number,
    /// Text
    String,
    /// True or false
    Boolean,
    /// Reference to another custom type
    Custom,
}

impl FieldKind {
    /// Whether this kind is a leaf (not a reference)
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Stored name of the kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "custom" => Ok(Self::Custom),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A named, reusable object shape owned by an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomType {
    /// Type ID
    pub id: TypeId,
    /// Owning application
    pub app_id: AppId,
    /// Type name, unique within the application
    pub name: String,
    /// Free text passed on to tool consumers
    #[serde(default)]
    pub description: String,
}

impl CustomType {
    /// Create a custom type record
    #[must_use]
    pub fn new(id: TypeId, app_id: AppId, name: impl Into<String>) -> Self {
        Self {
            id,
            app_id,
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One field of a custom type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTypeField {
    /// Field ID
    pub id: FieldId,
    /// Type this field belongs to
    pub custom_type_id: TypeId,
    /// Field name
    pub name: String,
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Referenced type, present iff `kind` is `Custom`
    #[serde(rename = "ref", default)]
    pub reference: Option<TypeId>,
    /// Whether the field holds a list of `kind`
    #[serde(default)]
    pub is_array: bool,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
    /// Free text passed on to tool consumers
    #[serde(default)]
    pub description: String,
}

impl CustomTypeField {
    /// Create a scalar or unresolved field
    #[must_use]
    pub fn new(id: FieldId, custom_type_id: TypeId, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id,
            custom_type_id,
            name: name.into(),
            kind,
            reference: None,
            is_array: false,
            required: false,
            description: String::new(),
        }
    }

    /// Create a field referencing another custom type
    #[must_use]
    pub fn custom(id: FieldId, custom_type_id: TypeId, name: impl Into<String>, target: TypeId) -> Self {
        Self::new(id, custom_type_id, name, FieldKind::Custom).with_reference(target)
    }

    /// Set the referenced type
    #[must_use]
    pub fn with_reference(mut self, target: TypeId) -> Self {
        self.reference = Some(target);
        self
    }

    /// Mark as array
    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Which side of a call a parameter describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamGroup {
    /// Arguments sent by the tool consumer
    Input,
    /// Shape of the upstream response
    Output,
}

/// A parameter of a described interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceParameter {
    /// Parameter ID
    pub id: ParameterId,
    /// Interface this parameter belongs to
    pub interface_id: InterfaceId,
    /// Owning application
    pub app_id: AppId,
    /// Parameter name
    pub name: String,
    /// Declared kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Referenced type, present iff `kind` is `Custom`
    #[serde(rename = "ref", default)]
    pub reference: Option<TypeId>,
    /// Whether the parameter holds a list of `kind`
    #[serde(default)]
    pub is_array: bool,
    /// Whether the parameter must be present
    #[serde(default)]
    pub required: bool,
    /// Free text passed on to tool consumers
    #[serde(default)]
    pub description: String,
    /// Input or output side
    pub group: ParamGroup,
    /// Value filled in by the bridge when the consumer omits it
    #[serde(default)]
    pub default_value: Option<String>,
}

impl InterfaceParameter {
    /// Create a parameter
    #[must_use]
    pub fn new(
        id: ParameterId,
        interface_id: InterfaceId,
        app_id: AppId,
        name: impl Into<String>,
        kind: FieldKind,
        group: ParamGroup,
    ) -> Self {
        Self {
            id,
            interface_id,
            app_id,
            name: name.into(),
            kind,
            reference: None,
            is_array: false,
            required: false,
            description: String::new(),
            group,
            default_value: None,
        }
    }

    /// Set the referenced type
    #[must_use]
    pub fn with_reference(mut self, target: TypeId) -> Self {
        self.reference = Some(target);
        self
    }

    /// Mark as array
    #[must_use]
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set default value
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether the bridge supplies this parameter itself.
    ///
    /// Only non-array scalars can carry a usable default.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.kind.is_scalar()
            && !self.is_array
            && self.default_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}
