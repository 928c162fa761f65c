//! Type and name mapping
//!
//! Turns raw column descriptors into generation-ready field and table
//! descriptors. Everything here is pure: no I/O and no failure modes.

use tracing::trace;

use crate::schema::{
    singularize, to_pascal_case, ColumnDescriptor, FieldDescriptor, FieldType, ImportSet,
    TableDescriptor,
};

/// Map a database type name to a field type
///
/// Matching is exact and case-sensitive. Anything unknown is kept verbatim in
/// [`FieldType::Unmapped`].
pub fn map_type(database_type: &str) -> FieldType {
    match database_type {
        "datetime" | "timestamp" => FieldType::Temporal,
        "tinyint" => FieldType::SmallInt,
        "varchar" => FieldType::Text,
        other => FieldType::Unmapped(other.to_string()),
    }
}

/// Map a single column to a model field
pub fn map_column(column: &ColumnDescriptor) -> FieldDescriptor {
    let field_type = map_type(&column.database_type);

    trace!(
        column = ?column.name,
        database_type = ?column.database_type,
        field_type = ?field_type,
        "Mapped column"
    );

    FieldDescriptor {
        field_name: to_pascal_case(&column.name),
        field_type,
        source_column: column.name.clone(),
    }
}

/// Map a table and its columns to a model description
///
/// Field order follows `columns`. Imports are collected in the order the
/// fields first need them.
pub fn map_table(table_name: &str, columns: &[ColumnDescriptor]) -> TableDescriptor {
    let fields: Vec<FieldDescriptor> = columns.iter().map(map_column).collect();

    let imports: ImportSet = fields
        .iter()
        .filter_map(|field| field.field_type.required_import())
        .collect();

    TableDescriptor {
        type_name: to_pascal_case(&singularize(table_name)),
        source_table: table_name.to_string(),
        fields,
        imports,
    }
}
