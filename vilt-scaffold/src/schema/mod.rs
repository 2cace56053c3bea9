//! Schema reading: model metadata plus catalog columns
//!
//! [`SchemaReader::describe`] turns a model name into a [`ModelDescriptor`]:
//! the ordered list of scaffoldable fields along with the model's allow-list
//! and relations. Implicit bookkeeping columns are excluded, foreign keys
//! are detected from the `_id` suffix.

pub mod catalog;
pub mod field;
pub mod model;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use catalog::{Catalog, CatalogColumn, SqlCatalog, StaticCatalog};
pub use field::{FieldDescriptor, IMPLICIT_FIELDS};
pub use model::{
    validate_model_name, ManifestResolver, ModelMetadata, ModelResolver, Relation, RelationKind,
};

use crate::error::{Result, ScaffoldError};

/// Where the descriptor list comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Every catalog column, in catalog order
    #[default]
    Catalog,
    /// The model's fillable allow-list, in allow-list order
    Fillable,
}

/// Everything the generator needs to know about one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Model name (`Post`)
    pub name: String,
    /// Backing table (`posts`)
    pub table_name: String,
    /// Scaffoldable fields, implicit columns excluded
    pub fields: Vec<FieldDescriptor>,
    /// Declared allow-list
    pub fillable: Vec<String>,
    /// Declared relationships
    pub relations: Vec<Relation>,
}

/// Builds [`ModelDescriptor`]s from a resolver and a catalog
#[derive(Debug)]
pub struct SchemaReader<R, C> {
    resolver: R,
    catalog: C,
    field_source: FieldSource,
}

impl<R: ModelResolver, C: Catalog> SchemaReader<R, C> {
    /// Reader using the default [`FieldSource::Catalog`]
    pub const fn new(resolver: R, catalog: C) -> Self {
        Self {
            resolver,
            catalog,
            field_source: FieldSource::Catalog,
        }
    }

    /// Choose where the field list comes from
    #[must_use]
    pub const fn with_field_source(mut self, field_source: FieldSource) -> Self {
        self.field_source = field_source;
        self
    }

    /// Describe `model`
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::ModelNotFound`] for a non-`PascalCase` name or when
    ///   the resolver knows no such model
    /// - [`ScaffoldError::EmptySchema`] when the table has no column besides
    ///   the implicit ones, or no field survives the exclusions
    /// - [`ScaffoldError::Catalog`] when the catalog query fails
    #[tracing::instrument(skip(self))]
    pub fn describe(&self, model: &str) -> Result<ModelDescriptor> {
        validate_model_name(model)?;

        let metadata = self.resolver.resolve(model)?;
        let table_name = metadata.table_name();

        let mut seen = HashSet::new();
        let columns: Vec<CatalogColumn> = self
            .catalog
            .columns(&table_name)?
            .into_iter()
            .filter(|column| seen.insert(column.column_name.clone()))
            .collect();

        if columns.iter().all(|column| field::is_implicit(&column.column_name)) {
            return Err(ScaffoldError::EmptySchema(model.to_string()));
        }

        let fields = match self.field_source {
            FieldSource::Catalog => catalog_fields(&columns, &metadata.fillable),
            FieldSource::Fillable => fillable_fields(&columns, &metadata.fillable),
        };

        if fields.is_empty() {
            return Err(ScaffoldError::EmptySchema(model.to_string()));
        }

        tracing::info!(table = %table_name, fields = fields.len(), "model described");

        Ok(ModelDescriptor {
            name: model.to_string(),
            table_name,
            fields,
            fillable: metadata.fillable,
            relations: metadata.relations,
        })
    }
}

fn catalog_fields(columns: &[CatalogColumn], fillable: &[String]) -> Vec<FieldDescriptor> {
    columns
        .iter()
        .filter(|column| !field::is_implicit(&column.column_name))
        .inspect(|column| {
            if !fillable.is_empty() && !fillable.contains(&column.column_name) {
                warn!(column = %column.column_name, "column is not in the fillable list");
            }
        })
        .map(FieldDescriptor::from_column)
        .collect()
}

fn fillable_fields(columns: &[CatalogColumn], fillable: &[String]) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();

    fillable
        .iter()
        .filter(|name| !field::is_implicit(name) && seen.insert(name.as_str()))
        .map(|name| {
            columns
                .iter()
                .find(|column| &column.column_name == name)
                .map_or_else(
                    || {
                        warn!(field = %name, "fillable field has no catalog column");
                        FieldDescriptor::undeclared(name)
                    },
                    FieldDescriptor::from_column,
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn posts_catalog() -> StaticCatalog {
        StaticCatalog::new().with_table(
            "posts",
            vec![
                CatalogColumn::new("id", "bigint").primary_key(),
                CatalogColumn::new("title", "varchar").max_length(255),
                CatalogColumn::new("body", "text"),
                CatalogColumn::new("author_id", "bigint"),
                CatalogColumn::new("created_at", "timestamp").nullable(),
                CatalogColumn::new("updated_at", "timestamp").nullable(),
            ],
        )
    }

    fn models(fillable: &[&str]) -> HashMap<String, ModelMetadata> {
        let mut metadata = ModelMetadata::new("Post");
        metadata.fillable = fillable.iter().map(ToString::to_string).collect();
        metadata.relations = vec![Relation::new("author", RelationKind::BelongsTo)];

        let mut models = HashMap::new();
        models.insert("Post".to_string(), metadata);
        models
    }

    fn names(descriptor: &ModelDescriptor) -> Vec<&str> {
        descriptor.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_describe_excludes_implicit_fields() {
        let reader = SchemaReader::new(models(&[]), posts_catalog());
        let descriptor = reader.describe("Post").unwrap();

        assert_eq!(descriptor.table_name, "posts");
        assert_eq!(names(&descriptor), vec!["title", "body", "author_id"]);
        assert_eq!(descriptor.fields[2].field_type, "Author");
        assert!(descriptor.fields[2].is_foreign_key);
        assert_eq!(descriptor.relations.len(), 1);
    }

    #[test]
    fn test_catalog_source_ignores_fillable_filter() {
        let reader = SchemaReader::new(models(&["title"]), posts_catalog());
        let descriptor = reader.describe("Post").unwrap();
        assert_eq!(names(&descriptor), vec!["title", "body", "author_id"]);
        assert_eq!(descriptor.fillable, vec!["title"]);
    }

    #[test]
    fn test_fillable_source_follows_allow_list_order() {
        let reader = SchemaReader::new(
            models(&["author_id", "title", "title", "id", "subtitle"]),
            posts_catalog(),
        )
        .with_field_source(FieldSource::Fillable);

        let descriptor = reader.describe("Post").unwrap();
        assert_eq!(names(&descriptor), vec!["author_id", "title", "subtitle"]);
        assert!(descriptor.fields[1].required);
        assert_eq!(descriptor.fields[2].field_type, "string");
        assert!(!descriptor.fields[2].required);
    }

    #[test]
    fn test_duplicate_columns_keep_first() {
        let catalog = StaticCatalog::new().with_table(
            "posts",
            vec![
                CatalogColumn::new("title", "varchar"),
                CatalogColumn::new("title", "text").nullable(),
            ],
        );
        let descriptor = SchemaReader::new(models(&[]), catalog)
            .describe("Post")
            .unwrap();

        assert_eq!(descriptor.fields.len(), 1);
        assert_eq!(descriptor.fields[0].field_type, "varchar");
        assert!(descriptor.fields[0].required);
    }

    #[test]
    fn test_missing_table_is_empty_schema() {
        let reader = SchemaReader::new(models(&["title"]), StaticCatalog::new())
            .with_field_source(FieldSource::Fillable);
        let result = reader.describe("Post");
        assert!(matches!(result, Err(ScaffoldError::EmptySchema(name)) if name == "Post"));
    }

    #[test]
    fn test_only_implicit_columns_is_empty_schema() {
        let catalog = StaticCatalog::new().with_table(
            "posts",
            vec![
                CatalogColumn::new("id", "bigint").primary_key(),
                CatalogColumn::new("created_at", "timestamp"),
            ],
        );
        let result = SchemaReader::new(models(&[]), catalog).describe("Post");
        assert!(matches!(result, Err(ScaffoldError::EmptySchema(_))));
    }

    #[test]
    fn test_fillable_source_needs_real_columns() {
        let catalog = StaticCatalog::new().with_table(
            "posts",
            vec![
                CatalogColumn::new("id", "bigint").primary_key(),
                CatalogColumn::new("created_at", "timestamp").nullable(),
                CatalogColumn::new("updated_at", "timestamp").nullable(),
            ],
        );
        let result = SchemaReader::new(models(&["title"]), catalog)
            .with_field_source(FieldSource::Fillable)
            .describe("Post");
        assert!(matches!(result, Err(ScaffoldError::EmptySchema(name)) if name == "Post"));
    }

    #[test]
    fn test_unknown_model() {
        let result = SchemaReader::new(models(&[]), posts_catalog()).describe("Comment");
        assert!(matches!(result, Err(ScaffoldError::ModelNotFound(name)) if name == "Comment"));
    }

    #[test]
    fn test_invalid_model_name() {
        let err = SchemaReader::new(models(&[]), posts_catalog())
            .describe("post")
            .unwrap_err();
        assert!(matches!(&err, ScaffoldError::ModelNotFound(name) if name == "post"));
        assert_eq!(err.to_string(), "Model post does not exist.");
    }

    #[test]
    fn test_describe_is_deterministic() {
        let reader = SchemaReader::new(models(&[]), posts_catalog());
        assert_eq!(reader.describe("Post").unwrap(), reader.describe("Post").unwrap());
    }
}
