//! # modelgen
//!
//! Generate GORM model structs from MySQL table metadata
//!
//! This crate provides a CLI tool and library for reading the columns of
//! named tables and emitting one model source file per table.

pub mod codegen;
pub mod config;
pub mod error;
pub mod generate;
pub mod introspect;
pub mod mapper;
pub mod schema;

pub mod prelude {
    pub use crate::codegen::{CodeGenConfig, CodeGenerator, GoGenerator, UnmappedTypePolicy};
    pub use crate::config::{ConnectionOverrides, DbConfig};
    pub use crate::error::ModelgenError;
    pub use crate::generate::generate_models;
    pub use crate::introspect::{FixtureIntrospector, Introspector};
    pub use crate::mapper::{map_column, map_table};
    pub use crate::schema::{
        ColumnDescriptor, FieldDescriptor, FieldType, Import, ImportSet, TableDescriptor,
    };
}

#[cfg(feature = "mysql")]
pub use introspect::{connect_mysql, MySqlIntrospector};
