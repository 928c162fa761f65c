//! Code generation
//!
//! This module provides functionality for rendering model source code from
//! mapped table descriptors.

use std::path::PathBuf;

use crate::prelude::{ModelgenError, TableDescriptor};

pub mod go;

pub use go::GoGenerator;

/// What to do with columns whose database type has no mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmappedTypePolicy {
    /// Emit the database type name verbatim
    #[default]
    Passthrough,
    /// Fail generation for the table
    Deny,
}

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodeGenConfig {
    /// Output directory
    pub output_dir: PathBuf,
    /// Package the generated files belong to
    pub package: String,
    pub unmapped_types: UnmappedTypePolicy,
}

impl CodeGenConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            package: "models".to_string(),
            unmapped_types: UnmappedTypePolicy::default(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_unmapped_types(mut self, policy: UnmappedTypePolicy) -> Self {
        self.unmapped_types = policy;
        self
    }
}

/// Trait for language-specific code generators
pub trait CodeGenerator {
    /// File extension of generated files, without the dot
    fn file_extension(&self) -> &'static str;

    /// Render the source of one model
    fn render_table(
        &self,
        table: &TableDescriptor,
        config: &CodeGenConfig,
    ) -> Result<String, ModelgenError>;
}
