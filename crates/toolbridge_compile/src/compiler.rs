//! Compiler from custom type records to schema nodes.
//!
//! The graph may contain cycles. Nothing here tracks visited types: every
//! reference descends one level and the build context's depth bound is what
//! ends a cyclic walk.

use crate::context::BuildContext;
use crate::error::CompileError;
use crate::graph::TypeGraph;
use std::sync::Arc;
use toolbridge_core::{CustomTypeField, FieldKind, InterfaceParameter, TypeId};
use toolbridge_schema::{SchemaKind, SchemaNode};

/// The parts of a field or parameter that decide its schema
#[derive(Debug, Clone, Copy)]
pub(crate) struct Member<'a> {
    pub name: &'a str,
    pub kind: FieldKind,
    pub reference: Option<TypeId>,
    pub is_array: bool,
    pub description: &'a str,
}

impl<'a> From<&'a CustomTypeField> for Member<'a> {
    fn from(field: &'a CustomTypeField) -> Self {
        Self {
            name: &field.name,
            kind: field.kind,
            reference: field.reference,
            is_array: field.is_array,
            description: &field.description,
        }
    }
}

impl<'a> From<&'a InterfaceParameter> for Member<'a> {
    fn from(param: &'a InterfaceParameter) -> Self {
        Self {
            name: &param.name,
            kind: param.kind,
            reference: param.reference,
            is_array: param.is_array,
            description: &param.description,
        }
    }
}

/// Compiler over a loaded type graph
#[derive(Debug, Clone, Copy)]
pub struct SchemaCompiler<'g> {
    graph: &'g TypeGraph,
}

impl<'g> SchemaCompiler<'g> {
    /// Create a compiler reading from `graph`
    #[must_use]
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self { graph }
    }

    /// Compile a custom type from the root context
    ///
    /// # Errors
    ///
    /// Returns error if the type or any type it references cannot be compiled
    pub fn compile(&self, type_id: TypeId) -> Result<SchemaNode, CompileError> {
        self.compile_root(type_id, BuildContext::new())
    }

    /// Compile a custom type from a root context with another depth bound
    ///
    /// # Errors
    ///
    /// Returns error if the type or any type it references cannot be compiled
    pub fn compile_with_limit(&self, type_id: TypeId, limit: usize) -> Result<SchemaNode, CompileError> {
        self.compile_root(type_id, BuildContext::with_limit(limit))
    }

    fn compile_root(&self, type_id: TypeId, ctx: BuildContext) -> Result<SchemaNode, CompileError> {
        match self.compile_type(type_id, ctx) {
            Ok(schema) => {
                tracing::debug!(%type_id, properties = schema.properties.len(), "compiled custom type");
                Ok(schema)
            }
            Err(err) => {
                tracing::warn!(%type_id, %err, "custom type compilation failed");
                Err(err)
            }
        }
    }

    /// Compile a custom type into an object node at the given depth
    ///
    /// # Errors
    ///
    /// Returns `TypeNotFound` for an unknown id, or any error from its fields
    pub fn compile_type(&self, type_id: TypeId, ctx: BuildContext) -> Result<SchemaNode, CompileError> {
        let custom_type = self
            .graph
            .custom_type(type_id)
            .ok_or(CompileError::TypeNotFound { id: type_id })?;

        let mut schema = SchemaNode::object().with_description(custom_type.description.as_str());
        for field in self.graph.fields(type_id) {
            let property = self.compile_field(field, ctx)?;
            schema = schema.with_property(field.name.as_str(), property);
            if field.required {
                schema = schema.with_required(field.name.as_str());
            }
        }
        Ok(schema)
    }

    /// Compile one field at the given depth
    ///
    /// # Errors
    ///
    /// Returns `RecursionLimitExceeded` once the context is at its bound,
    /// `MissingReference` for a custom field without a target, or any error
    /// from the referenced type
    pub fn compile_field(&self, field: &CustomTypeField, ctx: BuildContext) -> Result<SchemaNode, CompileError> {
        self.compile_member(Member::from(field), ctx)
    }

    pub(crate) fn compile_member(&self, member: Member<'_>, ctx: BuildContext) -> Result<SchemaNode, CompileError> {
        ctx.check_depth()?;

        let element = match member.kind {
            FieldKind::String => SchemaNode::new(SchemaKind::String),
            FieldKind::Number => SchemaNode::new(SchemaKind::Number),
            FieldKind::Boolean => SchemaNode::new(SchemaKind::Boolean),
            FieldKind::Custom => {
                let target = member.reference.ok_or_else(|| CompileError::MissingReference {
                    field: member.name.to_string(),
                })?;
                self.compile_type(target, ctx.next())?
            }
        };

        if member.is_array {
            return Ok(SchemaNode::array(Arc::new(element)).with_description(member.description));
        }
        if member.kind.is_scalar() {
            return Ok(element.with_description(member.description));
        }
        Ok(element)
    }
}
