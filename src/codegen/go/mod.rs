//! Go code generator
//!
//! Generates GORM model structs, one file per table.

use minijinja::Environment;
use serde::Serialize;
use tracing::{debug, trace};

use crate::codegen::{CodeGenConfig, CodeGenerator};
use crate::error::ModelgenError;
use crate::schema::{FieldType, Import, TableDescriptor};

/// Built-in model template
pub const MODEL_TEMPLATE: &str = include_str!("templates/model.go.jinja");

const TEMPLATE_NAME: &str = "model.go";

/// Go code generator
pub struct GoGenerator {
    env: Environment<'static>,
}

#[derive(Debug, Serialize)]
struct ModelContext<'a> {
    package: &'a str,
    type_name: &'a str,
    table_name: &'a str,
    imports: Vec<&'static str>,
    fields: Vec<FieldContext<'a>>,
}

#[derive(Debug, Serialize)]
struct FieldContext<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    field_type: String,
    column: &'a str,
}

impl GoGenerator {
    pub fn new() -> Self {
        let mut env = new_environment();
        env.add_template(TEMPLATE_NAME, MODEL_TEMPLATE)
            .expect("Failed to load go model template");

        Self { env }
    }

    /// Use a custom model template instead of the built-in one
    ///
    /// The template receives `package`, `type_name`, `table_name`, `imports`
    /// (import paths) and `fields` (each with `name`, `type` and `column`).
    pub fn with_template(source: impl Into<String>) -> Result<Self, ModelgenError> {
        let mut env = new_environment();
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(|e| ModelgenError::Template(e.to_string()))?;
        debug!("Loaded custom model template");

        Ok(Self { env })
    }
}

impl Default for GoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for GoGenerator {
    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn render_table(
        &self,
        table: &TableDescriptor,
        config: &CodeGenConfig,
    ) -> Result<String, ModelgenError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| ModelgenError::CodeGen {
                table: table.source_table.clone(),
                message: format!("Template error: {}", e),
            })?;

        let ctx = build_model_context(table, config);
        trace!(table = ?table.source_table, context = ?ctx, "Rendering model");

        template.render(&ctx).map_err(|e| ModelgenError::CodeGen {
            table: table.source_table.clone(),
            message: format!("Render error: {}", e),
        })
    }
}

fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}

/// Build template context for a table
fn build_model_context<'a>(table: &'a TableDescriptor, config: &'a CodeGenConfig) -> ModelContext<'a> {
    ModelContext {
        package: &config.package,
        type_name: &table.type_name,
        table_name: &table.source_table,
        imports: table.imports.iter().map(|import| go_import(*import)).collect(),
        fields: table
            .fields
            .iter()
            .map(|field| FieldContext {
                name: &field.field_name,
                field_type: go_type(&field.field_type),
                column: &field.source_column,
            })
            .collect(),
    }
}

/// Convert FieldType to Go type string
fn go_type(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Temporal => "time.Time".to_string(),
        FieldType::SmallInt => "int".to_string(),
        FieldType::Text => "string".to_string(),
        FieldType::Unmapped(raw) => raw.clone(),
    }
}

/// Go import path providing an import capability
fn go_import(import: Import) -> &'static str {
    match import {
        Import::Time => "time",
    }
}
