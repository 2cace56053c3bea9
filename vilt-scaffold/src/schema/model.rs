//! Model metadata: what a model declares about itself
//!
//! Each model is described by a manifest `{models_dir}/{Model}.toml`:
//!
//! ```toml
//! table = "posts"
//! fillable = ["title", "body", "author_id"]
//!
//! [[relations]]
//! name = "author"
//! kind = "belongs_to"
//! related = "User"
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};
use crate::scaffold::helpers::NameHelpers;

/// Relationship kinds a model may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Inverse one-to-one / one-to-many
    BelongsTo,
    /// One-to-one
    HasOne,
    /// One-to-many
    HasMany,
    /// Many-to-many
    BelongsToMany,
    /// Polymorphic inverse
    MorphTo,
    /// Polymorphic one-to-one
    MorphOne,
    /// Polymorphic one-to-many
    MorphMany,
    /// Polymorphic many-to-many
    MorphToMany,
}

/// A declared relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Relation method name (`author`, `comments`)
    pub name: String,
    /// Relationship kind
    pub kind: RelationKind,
    /// Related model, when declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

impl Relation {
    /// Relation without a related-model annotation
    pub fn new(name: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            related: None,
        }
    }
}

/// Metadata declared by one model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetadata {
    /// Model name, filled in by the resolver
    #[serde(skip)]
    pub name: String,
    /// Explicit table name
    pub table: Option<String>,
    /// Mass-assignable field allow-list
    pub fillable: Vec<String>,
    /// Declared relationships, in declaration order
    pub relations: Vec<Relation>,
}

impl ModelMetadata {
    /// Metadata with no table override, allow-list or relations
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Backing table: the declared one, or the snake-case plural of the name
    ///
    /// # Examples
    ///
    /// ```
    /// # use vilt_scaffold::schema::ModelMetadata;
    /// assert_eq!(ModelMetadata::new("BlogPost").table_name(), "blog_posts");
    /// ```
    #[must_use]
    pub fn table_name(&self) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| NameHelpers::table_name(&self.name))
    }
}

/// Check that `name` is a `PascalCase` identifier
///
/// Anything else cannot name a model, so it is reported as
/// [`ScaffoldError::ModelNotFound`].
pub fn validate_model_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ScaffoldError::ModelNotFound(name.to_string()))
    }
}

/// Source of model metadata
pub trait ModelResolver {
    /// Metadata for `model`, or [`ScaffoldError::ModelNotFound`]
    fn resolve(&self, model: &str) -> Result<ModelMetadata>;
}

impl<R: ModelResolver + ?Sized> ModelResolver for &R {
    fn resolve(&self, model: &str) -> Result<ModelMetadata> {
        (**self).resolve(model)
    }
}

impl ModelResolver for HashMap<String, ModelMetadata> {
    fn resolve(&self, model: &str) -> Result<ModelMetadata> {
        self.get(model)
            .cloned()
            .ok_or_else(|| ScaffoldError::ModelNotFound(model.to_string()))
    }
}

/// Reads `{Model}.toml` manifests from a models directory
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    models_dir: PathBuf,
}

impl ManifestResolver {
    /// Resolver over `models_dir`
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Manifest location for `model`
    #[must_use]
    pub fn manifest_path(&self, model: &str) -> PathBuf {
        self.models_dir.join(format!("{model}.toml"))
    }
}

impl ModelResolver for ManifestResolver {
    fn resolve(&self, model: &str) -> Result<ModelMetadata> {
        validate_model_name(model)?;
        let path = self.manifest_path(model);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScaffoldError::ModelNotFound(model.to_string()));
            }
            Err(source) => return Err(ScaffoldError::Io { path, source }),
        };

        let mut metadata: ModelMetadata = toml::from_str(&content)
            .map_err(|source| ScaffoldError::InvalidManifest {
                path: path.clone(),
                source,
            })?;
        metadata.name = model.to_string();

        tracing::debug!(
            manifest = %path.display(),
            fillable = metadata.fillable.len(),
            relations = metadata.relations.len(),
            "model manifest loaded"
        );
        Ok(metadata)
    }
}
