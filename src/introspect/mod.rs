//! Database introspection
//!
//! This module provides functionality for extracting column metadata for
//! named tables. The MySQL implementation is feature-gated; the fixture
//! implementation reads a TOML description instead of a live database.

use crate::prelude::{ColumnDescriptor, ModelgenError};

mod fixture;

pub use fixture::FixtureIntrospector;

/// Trait for database introspection implementations
pub trait Introspector {
    /// Return the columns of a table in their natural order
    fn columns(&mut self, table_name: &str) -> Result<Vec<ColumnDescriptor>, ModelgenError>;
}

// Feature-gated database implementations
#[cfg(feature = "mysql")]
mod mysql;

#[cfg(feature = "mysql")]
pub use self::mysql::{connect as connect_mysql, MySqlIntrospector};
