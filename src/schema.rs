//! Schema data structures
//!
//! These types form the contract between introspection (produces column
//! descriptors), the mapper (produces table descriptors) and code generation
//! (consumes them).

use indexmap::IndexSet;

/// Raw facts about one physical column, as reported by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Database type name, e.g. `varchar` or `datetime`
    pub database_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, database_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_type: database_type.into(),
        }
    }
}

/// Language-neutral type of a generated model field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Date/time value (`datetime`, `timestamp`)
    Temporal,
    /// Small integer (`tinyint`)
    SmallInt,
    /// Text (`varchar`)
    Text,
    /// No mapping known, stores the raw database type name
    Unmapped(String),
}

impl FieldType {
    /// Capability the generated code needs in order to use this type
    pub fn required_import(&self) -> Option<Import> {
        match self {
            FieldType::Temporal => Some(Import::Time),
            _ => None,
        }
    }
}

/// Auxiliary capability required by a generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Import {
    Time,
}

/// Deduplicated set of imports, iterated in insertion order
pub type ImportSet = IndexSet<Import>;

/// A single generated model field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub field_type: FieldType,
    /// Column name exactly as found in the database
    pub source_column: String,
}

/// Everything needed to render one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Singular, PascalCase type name
    pub type_name: String,
    /// Physical table name, used for the table name binding
    pub source_table: String,
    pub fields: Vec<FieldDescriptor>,
    pub imports: ImportSet,
}

/// Convert snake_case to PascalCase
///
/// Only the first character of each segment is touched; empty segments
/// (leading, trailing or repeated underscores) disappear.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let first_upper = first.to_uppercase().to_string();
                    first_upper + chars.as_str()
                }
            }
        })
        .collect()
}

/// Singularize a snake_case table name
///
/// Only the last word is inflected, so `user_profiles` becomes
/// `user_profile` and `staff_people` becomes `staff_person`.
pub fn singularize(name: &str) -> String {
    let trimmed = name.trim_end_matches('_');
    let suffix = &name[trimmed.len()..];

    let (head, word) = match trimmed.rfind('_') {
        Some(idx) => trimmed.split_at(idx + 1),
        None => ("", trimmed),
    };

    if word.is_empty() {
        return name.to_string();
    }

    let singular = pluralizer::pluralize(word, 1, false);
    format!("{}{}{}", head, singular, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_pascal_case("user_accounts"), "UserAccounts");
        assert_eq!(to_pascal_case("order_line_items"), "OrderLineItems");
    }

    #[test]
    fn test_to_pascal_case_keeps_inner_case() {
        assert_eq!(to_pascal_case("userID"), "UserID");
        assert_eq!(to_pascal_case("html_URL"), "HtmlURL");
    }

    #[test]
    fn test_to_pascal_case_drops_empty_segments() {
        assert_eq!(to_pascal_case("user__id"), "UserId");
        assert_eq!(to_pascal_case("_private_"), "Private");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_pascal_case_digits() {
        assert_eq!(to_pascal_case("address_2"), "Address2");
        assert_eq!(to_pascal_case("v2_token"), "V2Token");
    }

    #[test]
    fn test_singularize_regular_plural() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
    }

    #[test]
    fn test_singularize_irregular_plural() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("children"), "child");
    }

    #[test]
    fn test_singularize_last_word_only() {
        assert_eq!(singularize("user_profiles"), "user_profile");
        assert_eq!(singularize("users_categories"), "users_category");
    }

    #[test]
    fn test_singularize_no_change() {
        assert_eq!(singularize("staff"), "staff");
        assert_eq!(singularize("user"), "user");
    }

    #[test]
    fn test_singularize_trailing_underscore() {
        assert_eq!(singularize("users_"), "user_");
        assert_eq!(singularize("___"), "___");
    }

    #[test]
    fn test_required_import() {
        assert_eq!(FieldType::Temporal.required_import(), Some(Import::Time));
        assert_eq!(FieldType::Text.required_import(), None);
        assert_eq!(
            FieldType::Unmapped("datetime2".to_string()).required_import(),
            None
        );
    }
}
