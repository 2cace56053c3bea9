//! Field descriptors derived from catalog columns

use inflector::Inflector;
use serde::Serialize;

use super::catalog::CatalogColumn;

/// Columns every model carries implicitly; never scaffolded
pub const IMPLICIT_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Column-name suffix marking a foreign key
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// One scaffoldable field of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,
    /// Catalog scalar type, or the related entity name for foreign keys
    #[serde(rename = "type")]
    pub field_type: String,
    /// `true` when the column is `NOT NULL`
    pub required: bool,
    /// Column is (part of) the primary key
    pub is_primary_key: bool,
    /// Column name ends in `_id`
    pub is_foreign_key: bool,
    /// Character maximum length, when the catalog reports one
    pub max_length: Option<i64>,
    /// Column default expression, when the catalog reports one
    pub default_value: Option<String>,
}

impl FieldDescriptor {
    /// Build the descriptor for one catalog column
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::schema::{CatalogColumn, FieldDescriptor};
    /// let field = FieldDescriptor::from_column(&CatalogColumn::new("author_id", "int"));
    /// assert!(field.is_foreign_key);
    /// assert_eq!(field.field_type, "Author");
    /// assert!(field.required);
    /// ```
    #[must_use]
    pub fn from_column(column: &CatalogColumn) -> Self {
        let related = related_entity(&column.column_name);

        Self {
            name: column.column_name.clone(),
            is_foreign_key: related.is_some(),
            field_type: related.unwrap_or_else(|| column.data_type.clone()),
            required: !column.nullable,
            is_primary_key: column.is_primary_key(),
            max_length: column.max_length,
            default_value: column.default_value.clone(),
        }
    }

    /// Descriptor for an allow-listed name the catalog does not know
    #[must_use]
    pub fn undeclared(name: &str) -> Self {
        let related = related_entity(name);

        Self {
            name: name.to_string(),
            is_foreign_key: related.is_some(),
            field_type: related.unwrap_or_else(|| "string".to_string()),
            required: false,
            is_primary_key: false,
            max_length: None,
            default_value: None,
        }
    }

    /// Whether this field is one of [`IMPLICIT_FIELDS`]
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        is_implicit(&self.name)
    }
}

/// Whether `name` is one of [`IMPLICIT_FIELDS`]
#[must_use]
pub fn is_implicit(name: &str) -> bool {
    IMPLICIT_FIELDS.contains(&name)
}

/// Exact-suffix foreign key test
///
/// # Examples
///
/// ```
/// # use vilt_scaffold::schema::field::is_foreign_key;
/// assert!(is_foreign_key("author_id"));
/// assert!(!is_foreign_key("valid"));
/// assert!(!is_foreign_key("_id"));
/// ```
#[must_use]
pub fn is_foreign_key(name: &str) -> bool {
    related_entity(name).is_some()
}

/// Related entity name for a foreign key column (`blog_post_id` -> `BlogPost`)
#[must_use]
pub fn related_entity(name: &str) -> Option<String> {
    name.strip_suffix(FOREIGN_KEY_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(Inflector::to_pascal_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_foreign_key_type_override() {
        let field = FieldDescriptor::from_column(&CatalogColumn::new("author_id", "int"));
        assert!(field.is_foreign_key);
        assert_eq!(field.field_type, "Author");
    }

    #[test]
    fn test_scalar_type_kept() {
        let column = CatalogColumn::new("title", "varchar").max_length(255);
        let field = FieldDescriptor::from_column(&column);
        assert!(!field.is_foreign_key);
        assert_eq!(field.field_type, "varchar");
        assert_eq!(field.max_length, Some(255));
        assert!(field.required);
    }

    #[test]
    fn test_nullable_and_default() {
        let column = CatalogColumn::new("status", "varchar")
            .nullable()
            .default_value("draft");
        let field = FieldDescriptor::from_column(&column);
        assert!(!field.required);
        assert_eq!(field.default_value.as_deref(), Some("draft"));
    }

    #[test]
    fn test_primary_key_flag() {
        let field = FieldDescriptor::from_column(&CatalogColumn::new("uuid", "char").primary_key());
        assert!(field.is_primary_key);
    }

    #[test]
    fn test_valid_is_not_foreign_key() {
        assert!(!is_foreign_key("valid"));
        assert!(!is_foreign_key("paid"));
        assert!(!is_foreign_key("_id"));
        assert!(!is_foreign_key("author_identity"));
    }

    #[test]
    fn test_related_entity_multi_word() {
        assert_eq!(related_entity("blog_post_id").as_deref(), Some("BlogPost"));
        assert_eq!(related_entity("title"), None);
    }

    #[test]
    fn test_undeclared_field() {
        let field = FieldDescriptor::undeclared("nickname");
        assert_eq!(field.field_type, "string");
        assert!(!field.required);

        let field = FieldDescriptor::undeclared("team_id");
        assert_eq!(field.field_type, "Team");
        assert!(field.is_foreign_key);
    }

    #[test]
    fn test_implicit_fields() {
        assert!(is_implicit("id"));
        assert!(is_implicit("created_at"));
        assert!(is_implicit("updated_at"));
        assert!(!is_implicit("deleted_at"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let field = FieldDescriptor::from_column(&CatalogColumn::new("author_id", "int"));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "Author");
        assert_eq!(json["isForeignKey"], true);
        assert_eq!(json["maxLength"], serde_json::Value::Null);
    }

    proptest! {
        #[test]
        fn prop_id_suffix_is_foreign_key(stem in "[a-z][a-z]{0,10}") {
            let name = format!("{stem}_id");
            prop_assert!(is_foreign_key(&name));
            prop_assert_eq!(related_entity(&name), Some(stem.to_pascal_case()));
        }

        #[test]
        fn prop_plain_names_are_not_foreign_keys(name in "[a-z]{1,12}") {
            prop_assert!(!is_foreign_key(&name));
        }
    }
}
