//! Input and output schemas of a described interface.

use crate::compiler::{Member, SchemaCompiler};
use crate::context::BuildContext;
use crate::error::CompileError;
use crate::graph::TypeGraph;
use serde::Serialize;
use toolbridge_core::{InterfaceParameter, ParamGroup};
use toolbridge_schema::SchemaNode;

/// Both schemas of one interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceSchemas {
    /// Arguments a tool consumer must send
    pub input: SchemaNode,
    /// Shape of the upstream response
    pub output: SchemaNode,
}

/// Build the object schema over the parameters of one group.
///
/// Scalar parameters with a default are left out: the bridge fills them in,
/// so consumers never see them. Each remaining parameter compiles like a
/// custom type field starting from the root context.
///
/// # Errors
///
/// Returns the first compile error met by any parameter
pub fn compile_interface(
    graph: &TypeGraph,
    params: &[InterfaceParameter],
    group: ParamGroup,
) -> Result<SchemaNode, CompileError> {
    let compiler = SchemaCompiler::new(graph);
    let mut schema = SchemaNode::object();

    for param in params.iter().filter(|p| p.group == group) {
        if param.has_default() {
            tracing::trace!(param = %param.name, "parameter has default, skipped");
            continue;
        }
        let property = compiler.compile_member(Member::from(param), BuildContext::new())?;
        schema = schema.with_property(param.name.as_str(), property);
        if param.required {
            schema = schema.with_required(param.name.as_str());
        }
    }
    Ok(schema)
}

/// Compile the input and output schema together
///
/// # Errors
///
/// Returns the first compile error from either group
pub fn compile_interface_schemas(
    graph: &TypeGraph,
    params: &[InterfaceParameter],
) -> Result<InterfaceSchemas, CompileError> {
    let input = compile_interface(graph, params, ParamGroup::Input)?;
    let output = compile_interface(graph, params, ParamGroup::Output)?;
    tracing::debug!(
        inputs = input.properties.len(),
        outputs = output.properties.len(),
        "compiled interface schemas"
    );
    Ok(InterfaceSchemas { input, output })
}
