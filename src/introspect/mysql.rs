use mysql::{prelude::Queryable, Conn, OptsBuilder};
use tracing::{debug, error, info, trace};

use super::Introspector;
use crate::config::DbConfig;
use crate::prelude::{ColumnDescriptor, ModelgenError};

/// Open a connection to the configured MySQL database
pub fn connect(config: &DbConfig) -> Result<Conn, ModelgenError> {
    info!(connection = ?config.redacted_connection_string(), "Connecting to MySQL");

    let opts = OptsBuilder::new()
        .ip_or_hostname(Some(config.host.as_str()))
        .tcp_port(config.port)
        .user(Some(config.user.as_str()))
        .pass(Some(config.password.as_str()))
        .db_name(Some(config.database.as_str()));

    let conn = Conn::new(opts).map_err(|e| {
        error!(connection = ?config.redacted_connection_string(), error = ?e, "Connection failed");
        ModelgenError::Connection(format!("{}: {}", config.redacted_connection_string(), e))
    })?;

    info!("Connected to database");
    Ok(conn)
}

/// MySQL introspector
///
/// Reads column metadata of the currently selected database.
pub struct MySqlIntrospector<'a> {
    conn: &'a mut Conn,
}

impl<'a> MySqlIntrospector<'a> {
    pub fn new(conn: &'a mut Conn) -> Self {
        Self { conn }
    }
}

impl Introspector for MySqlIntrospector<'_> {
    fn columns(&mut self, table_name: &str) -> Result<Vec<ColumnDescriptor>, ModelgenError> {
        debug!(table = ?table_name, "Introspecting table");

        let columns = query_columns(self.conn, table_name)?;

        // information_schema returns nothing for unknown tables
        if columns.is_empty() && !table_exists(self.conn, table_name)? {
            error!(table = ?table_name, "Table not found");
            return Err(ModelgenError::Introspection {
                table: table_name.to_string(),
                message: "table not found".to_string(),
            });
        }

        trace!(table = ?table_name, columns = ?columns.len(), "Found columns");
        Ok(columns)
    }
}

/// Query all columns for a table
fn query_columns(conn: &mut Conn, table_name: &str) -> Result<Vec<ColumnDescriptor>, ModelgenError> {
    trace!(table = ?table_name, "Querying columns");

    let sql = r#"
        SELECT
            COLUMN_NAME AS column_name,
            DATA_TYPE AS data_type
        FROM information_schema.COLUMNS
        WHERE TABLE_SCHEMA = DATABASE()
            AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
    "#;

    let rows: Vec<(String, String)> = conn.exec(sql, (table_name,)).map_err(|e| {
        error!(table = ?table_name, error = ?e, "Failed to query columns");
        ModelgenError::Introspection {
            table: table_name.to_string(),
            message: format!("Failed to query columns: {}", e),
        }
    })?;

    let columns = rows
        .into_iter()
        .map(|(name, data_type)| {
            trace!(column = ?name, data_type = ?data_type, "Column");
            ColumnDescriptor::new(name, data_type)
        })
        .collect();

    Ok(columns)
}

/// Check whether a table exists in the current database
fn table_exists(conn: &mut Conn, table_name: &str) -> Result<bool, ModelgenError> {
    let sql = r#"
        SELECT COUNT(*)
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = DATABASE()
            AND TABLE_NAME = ?
    "#;

    let count: Option<u64> = conn.exec_first(sql, (table_name,)).map_err(|e| {
        error!(table = ?table_name, error = ?e, "Failed to query table");
        ModelgenError::Introspection {
            table: table_name.to_string(),
            message: format!("Failed to query table: {}", e),
        }
    })?;

    Ok(count.unwrap_or(0) > 0)
}
