//! Generation pipeline
//!
//! Runs introspection, mapping, rendering and writing for each requested
//! table in order. The first failure aborts the run; files already written
//! for earlier tables are left in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::codegen::{CodeGenConfig, CodeGenerator, UnmappedTypePolicy};
use crate::error::ModelgenError;
use crate::introspect::Introspector;
use crate::mapper::map_table;
use crate::schema::{FieldType, TableDescriptor};

/// Generate one model file per table, returning the written paths
pub fn generate_models<I, G>(
    introspector: &mut I,
    generator: &G,
    config: &CodeGenConfig,
    tables: &[String],
) -> Result<Vec<PathBuf>, ModelgenError>
where
    I: Introspector + ?Sized,
    G: CodeGenerator + ?Sized,
{
    info!(
        output = ?config.output_dir,
        tables = ?tables.len(),
        "Generating models"
    );

    fs::create_dir_all(&config.output_dir).map_err(|source| ModelgenError::Output {
        path: config.output_dir.clone(),
        source,
    })?;
    debug!(path = ?config.output_dir, "Created output directory");

    let mut written = Vec::with_capacity(tables.len());
    for table_name in tables {
        let path = generate_model(introspector, generator, config, table_name)?;
        written.push(path);
    }

    info!(files = written.len(), "Model generation complete");
    Ok(written)
}

/// Generate the model file for a single table
pub fn generate_model<I, G>(
    introspector: &mut I,
    generator: &G,
    config: &CodeGenConfig,
    table_name: &str,
) -> Result<PathBuf, ModelgenError>
where
    I: Introspector + ?Sized,
    G: CodeGenerator + ?Sized,
{
    let columns = introspector.columns(table_name)?;
    let table = map_table(table_name, &columns);
    debug!(
        table = ?table.source_table,
        type_name = ?table.type_name,
        fields = table.fields.len(),
        imports = ?table.imports,
        "Mapped table"
    );

    check_unmapped(&table, config.unmapped_types)?;

    let code = generator.render_table(&table, config)?;
    let path = model_path(&config.output_dir, &table, generator.file_extension());
    write_model(&path, &code)?;
    debug!(table = ?table.source_table, path = ?path, "Generated model file");

    Ok(path)
}

/// Path of the generated file for a table: `<dir>/<TypeName>.<ext>`
pub fn model_path(output_dir: &Path, table: &TableDescriptor, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", table.type_name, extension))
}

fn check_unmapped(table: &TableDescriptor, policy: UnmappedTypePolicy) -> Result<(), ModelgenError> {
    let mut passthrough = Vec::new();

    for field in &table.fields {
        let FieldType::Unmapped(raw) = &field.field_type else {
            continue;
        };

        match policy {
            UnmappedTypePolicy::Passthrough => {
                debug!(
                    table = ?table.source_table,
                    column = ?field.source_column,
                    database_type = ?raw,
                    "Unmapped column type, emitting verbatim"
                );
                passthrough.push(field.source_column.as_str());
            }
            UnmappedTypePolicy::Deny => {
                error!(
                    table = ?table.source_table,
                    column = ?field.source_column,
                    database_type = ?raw,
                    "Unmapped column type"
                );
                return Err(ModelgenError::UnmappedType {
                    table: table.source_table.clone(),
                    column: field.source_column.clone(),
                    database_type: raw.clone(),
                });
            }
        }
    }

    if !passthrough.is_empty() {
        warn!(
            table = ?table.source_table,
            columns = ?passthrough,
            "Columns with unmapped types emitted verbatim"
        );
    }

    Ok(())
}

fn write_model(path: &Path, code: &str) -> Result<(), ModelgenError> {
    fs::write(path, code).map_err(|source| {
        error!(path = ?path, error = ?source, "Failed to write model file");
        ModelgenError::Output {
            path: path.to_path_buf(),
            source,
        }
    })
}
