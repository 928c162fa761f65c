use std::path::PathBuf;

use thiserror::Error;

/// modelgen errors
#[derive(Error, Debug)]
pub enum ModelgenError {
    #[error("Failed to connect to database: {0}")]
    Connection(String),

    #[error("Failed to introspect table '{table}': {message}")]
    Introspection { table: String, message: String },

    #[error("Column '{column}' of table '{table}' has unmapped type '{database_type}'")]
    UnmappedType {
        table: String,
        column: String,
        database_type: String,
    },

    #[error("Invalid template: {0}")]
    Template(String),

    #[error("Code generation failed for table '{table}': {message}")]
    CodeGen { table: String, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}
