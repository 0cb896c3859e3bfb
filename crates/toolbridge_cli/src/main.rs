//! Toolbridge CLI
//!
//! Compile stored custom types into schemas and check values against them.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use toolbridge_compile::{compile_interface_schemas, GraphRecords, InterfaceSchemas, SchemaCompiler, TypeGraph};
use toolbridge_core::{InterfaceParameter, TypeId};
use toolbridge_schema::{filter, Satisfier, SchemaNode, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "toolbridge")]
#[command(about = "Schema engine for APIs described as data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a custom type into a schema
    Compile {
        /// Graph file holding types and fields
        #[arg(short, long)]
        graph: PathBuf,
        /// Custom type ID
        #[arg(short = 't', long = "type")]
        type_id: i64,
        /// Bound on nested references
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Compile the input and output schemas of an interface
    Interface {
        /// Graph file holding types and fields
        #[arg(short, long)]
        graph: PathBuf,
        /// File holding the interface parameters
        #[arg(short, long)]
        params: PathBuf,
    },
    /// Check a value against a schema and show its filtered form
    Check {
        /// Schema document
        #[arg(short, long)]
        schema: PathBuf,
        /// Value document
        #[arg(short, long)]
        value: PathBuf,
    },
}

/// Outcome of `check`
#[derive(Debug, Serialize)]
struct CheckReport {
    satisfies: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    filtered: Value,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Compile {
            graph,
            type_id,
            max_depth,
        } => serde_json::to_value(compile(&graph, TypeId::new(type_id), max_depth)?)?,
        Commands::Interface { graph, params } => serde_json::to_value(interface(&graph, &params)?)?,
        Commands::Check { schema, value } => serde_json::to_value(check(&schema, &value)?)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_graph(path: &Path) -> Result<TypeGraph> {
    let records: GraphRecords =
        serde_json::from_value(read_json(path)?).with_context(|| format!("graph file {}", path.display()))?;
    Ok(TypeGraph::from(records))
}

fn compile(graph_path: &Path, type_id: TypeId, max_depth: Option<usize>) -> Result<SchemaNode> {
    let graph = load_graph(graph_path)?;
    let compiler = SchemaCompiler::new(&graph);
    let schema = match max_depth {
        Some(limit) => compiler.compile_with_limit(type_id, limit),
        None => compiler.compile(type_id),
    }
    .with_context(|| format!("compiling {type_id}"))?;
    Ok(schema)
}

fn interface(graph_path: &Path, params_path: &Path) -> Result<InterfaceSchemas> {
    let graph = load_graph(graph_path)?;
    let params: Vec<InterfaceParameter> = serde_json::from_value(read_json(params_path)?)
        .with_context(|| format!("parameter file {}", params_path.display()))?;
    Ok(compile_interface_schemas(&graph, &params)?)
}

fn check(schema_path: &Path, value_path: &Path) -> Result<CheckReport> {
    let schema = SchemaNode::from_json(&read_json(schema_path)?)?;
    let value = read_json(value_path)?;

    let mut satisfier = Satisfier::new();
    let satisfies = satisfier.check(&schema, &value);
    let failure = satisfier.last_failure();
    Ok(CheckReport {
        satisfies,
        path: failure.map(|m| m.path.clone()),
        reason: failure.map(|m| m.reason.clone()),
        filtered: filter(Some(&schema), &value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn graph_file() -> NamedTempFile {
        write_json(&json!({
            "types": [
                {"id": 1, "app_id": 1, "name": "User"},
                {"id": 2, "app_id": 1, "name": "Loop"}
            ],
            "fields": [
                {"id": 1, "custom_type_id": 1, "name": "name", "type": "string", "required": true},
                {"id": 2, "custom_type_id": 2, "name": "next", "type": "custom", "ref": 2}
            ]
        }))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compile_command() {
        let graph = graph_file();
        let schema = compile(graph.path(), TypeId::new(1), None).unwrap();
        assert_eq!(schema.required.len(), 1);
    }

    #[test]
    fn test_compile_cycle_reports_limit() {
        let graph = graph_file();
        let err = compile(graph.path(), TypeId::new(2), Some(3)).unwrap_err();
        assert!(format!("{err:#}").contains("maximum recursion depth exceeded (limit 3)"));
    }

    #[test]
    fn test_interface_command() {
        let graph = graph_file();
        let params = write_json(&json!([
            {"id": 1, "interface_id": 1, "app_id": 1, "name": "user", "type": "custom", "ref": 1, "group": "output"},
            {"id": 2, "interface_id": 1, "app_id": 1, "name": "id", "type": "number", "required": true, "group": "input"}
        ]));
        let schemas = interface(graph.path(), params.path()).unwrap();
        assert!(schemas.input.required.contains("id"));
        assert!(schemas.output.properties.contains_key("user"));
    }

    #[test]
    fn test_check_command() {
        let schema = write_json(&json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "required": ["name"]
        }));
        let value = write_json(&json!({"name": 3, "extra": true}));
        let report = check(schema.path(), value.path()).unwrap();
        assert!(!report.satisfies);
        assert_eq!(report.path.as_deref(), Some("/name"));
        assert_eq!(report.filtered, json!({}));
    }

    #[test]
    fn test_missing_file() {
        let err = check(Path::new("/nonexistent/schema.json"), Path::new("/nonexistent/v.json")).unwrap_err();
        assert!(err.to_string().starts_with("reading"));
    }
}
