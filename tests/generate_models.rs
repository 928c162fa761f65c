//! End-to-end generation from a schema file to model files on disk.

use std::fs;

use modelgen::prelude::*;

const SCHEMA: &str = r#"
[[tables]]
name = "user_profiles"
columns = [
  { name = "id", type = "int" },
  { name = "user_id", type = "int" },
  { name = "created_at", type = "datetime" },
  { name = "bio", type = "varchar" },
]

[[tables]]
name = "categories"
columns = [
  { name = "id", type = "int" },
  { name = "parent_id", type = "int" },
  { name = "position", type = "tinyint" },
  { name = "kind", type = "enum('a','b')" },
  { name = "updated_at", type = "timestamp" },
  { name = "created_at", type = "datetime" },
]

[[tables]]
name = "people"
"#;

fn write_schema(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("schema.toml");
    fs::write(&path, SCHEMA).expect("Failed to write schema");
    path
}

#[test]
fn test_user_profiles_model() {
    let dir = tempfile::tempdir().unwrap();
    let mut introspector = FixtureIntrospector::from_path(&write_schema(dir.path())).unwrap();
    let config = CodeGenConfig::new(dir.path().join("models"));

    let written = generate_models(
        &mut introspector,
        &GoGenerator::new(),
        &config,
        &["user_profiles".to_string()],
    )
    .unwrap();

    assert_eq!(written, vec![dir.path().join("models").join("UserProfile.go")]);
    let code = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(
        code,
        r#"package models

import (
	"time"
)

type UserProfile struct {
	Id int `gorm:"column:id"`
	UserId int `gorm:"column:user_id"`
	CreatedAt time.Time `gorm:"column:created_at"`
	Bio string `gorm:"column:bio"`
}

func (UserProfile) TableName() string {
	return "user_profiles"
}
"#
    );
}

#[test]
fn test_multiple_temporal_columns_single_import() {
    let dir = tempfile::tempdir().unwrap();
    let mut introspector = FixtureIntrospector::from_path(&write_schema(dir.path())).unwrap();
    let config = CodeGenConfig::new(dir.path().to_path_buf());

    let written = generate_models(
        &mut introspector,
        &GoGenerator::new(),
        &config,
        &["categories".to_string()],
    )
    .unwrap();

    let code = fs::read_to_string(dir.path().join("Category.go")).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(code.matches("\"time\"").count(), 1);
    assert!(code.contains("\tPosition int `gorm:\"column:position\"`\n"));
    assert!(code.contains("\tKind enum('a','b') `gorm:\"column:kind\"`\n"));
    assert!(code.contains("return \"categories\""));

    let kind = code.find("Kind").unwrap();
    let updated = code.find("UpdatedAt").unwrap();
    let created = code.find("CreatedAt").unwrap();
    assert!(kind < updated && updated < created);
}

#[test]
fn test_empty_table_and_irregular_plural() {
    let dir = tempfile::tempdir().unwrap();
    let mut introspector = FixtureIntrospector::from_path(&write_schema(dir.path())).unwrap();
    let config = CodeGenConfig::new(dir.path().to_path_buf()).with_package("entities");

    generate_models(
        &mut introspector,
        &GoGenerator::new(),
        &config,
        &["people".to_string()],
    )
    .unwrap();

    let code = fs::read_to_string(dir.path().join("Person.go")).unwrap();
    assert!(code.starts_with("package entities\n\ntype Person struct {\n}\n"));
    assert!(code.contains("return \"people\""));
}

#[test]
fn test_output_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path());
    let tables = vec!["user_profiles".to_string(), "categories".to_string()];

    let mut first = Vec::new();
    for run in ["a", "b"] {
        let mut introspector = FixtureIntrospector::from_path(&schema).unwrap();
        let config = CodeGenConfig::new(dir.path().join(run));
        let written =
            generate_models(&mut introspector, &GoGenerator::new(), &config, &tables).unwrap();
        let contents: Vec<String> = written
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        if first.is_empty() {
            first = contents;
        } else {
            assert_eq!(first, contents);
        }
    }
}

#[test]
fn test_strict_types_rejects_unmapped() {
    let dir = tempfile::tempdir().unwrap();
    let mut introspector = FixtureIntrospector::from_path(&write_schema(dir.path())).unwrap();
    let config = CodeGenConfig::new(dir.path().to_path_buf())
        .with_unmapped_types(UnmappedTypePolicy::Deny);

    let err = generate_models(
        &mut introspector,
        &GoGenerator::new(),
        &config,
        &["people".to_string(), "categories".to_string()],
    )
    .unwrap_err();

    assert!(matches!(err, ModelgenError::UnmappedType { .. }));
    assert!(dir.path().join("Person.go").exists());
    assert!(!dir.path().join("Category.go").exists());
}

#[test]
fn test_missing_schema_file() {
    let dir = tempfile::tempdir().unwrap();

    let result = FixtureIntrospector::from_path(&dir.path().join("nope.toml"));

    assert!(matches!(result, Err(ModelgenError::Config(_))));
}
