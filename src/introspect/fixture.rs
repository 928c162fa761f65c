use std::{fs, path::Path, str::FromStr};

use serde::Deserialize;
use tracing::{debug, error, trace};

use super::Introspector;
use crate::prelude::{ColumnDescriptor, ModelgenError};

/// Introspector backed by a TOML schema description
///
/// ```toml
/// [[tables]]
/// name = "users"
/// columns = [
///   { name = "id", type = "int" },
///   { name = "email", type = "varchar" },
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureIntrospector {
    tables: Vec<FixtureTable>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureTable {
    name: String,
    #[serde(default)]
    columns: Vec<FixtureColumn>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureColumn {
    name: String,
    #[serde(rename = "type")]
    database_type: String,
}

impl FixtureIntrospector {
    /// Read a schema description from disk
    pub fn from_path(path: &Path) -> Result<Self, ModelgenError> {
        debug!(path = ?path, "Loading schema file");

        let contents = fs::read_to_string(path).map_err(|e| {
            error!(path = ?path, error = ?e, "Failed to read schema file");
            ModelgenError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        contents.parse()
    }

    /// Names of all tables in the schema file, in file order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}

impl FromStr for FixtureIntrospector {
    type Err = ModelgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
            .map_err(|e| ModelgenError::Config(format!("Invalid schema file: {}", e)))
    }
}

impl Introspector for FixtureIntrospector {
    fn columns(&mut self, table_name: &str) -> Result<Vec<ColumnDescriptor>, ModelgenError> {
        let table = self
            .tables
            .iter()
            .find(|t| t.name == table_name)
            .ok_or_else(|| ModelgenError::Introspection {
                table: table_name.to_string(),
                message: format!(
                    "table not found in schema file (available: {})",
                    self.table_names().collect::<Vec<_>>().join(", ")
                ),
            })?;

        trace!(table = ?table_name, columns = ?table.columns.len(), "Found columns");

        Ok(table
            .columns
            .iter()
            .map(|c| ColumnDescriptor::new(&c.name, &c.database_type))
            .collect())
    }
}
