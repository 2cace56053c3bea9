//! The Laravel project a command operates on

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vilt_scaffold::config::{PathSettings, ViltConfig};
use vilt_scaffold::schema::{Catalog, ManifestResolver, ModelMetadata, ModelResolver, SchemaReader};

/// Project root plus its loaded configuration
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ViltConfig,
}

impl Project {
    /// Load the configuration for the project at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory or the configuration
    /// cannot be loaded.
    pub fn load(root: &Path, config_file: Option<&Path>) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Project directory '{}' does not exist", root.display());
        }

        let config = ViltConfig::load(root, config_file)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;

        Ok(Self::new(root, config))
    }

    /// Project with an already-built configuration
    pub fn new(root: impl Into<PathBuf>, config: ViltConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded configuration
    #[must_use]
    pub const fn config(&self) -> &ViltConfig {
        &self.config
    }

    /// Configured paths anchored at the project root
    #[must_use]
    pub fn paths(&self) -> PathSettings {
        self.config.paths.rooted(&self.root)
    }

    /// Resolver over the project's model manifests
    #[must_use]
    pub fn resolver(&self) -> ManifestResolver {
        ManifestResolver::new(self.paths().models_dir)
    }

    /// Manifest metadata for `model`, read without touching the database
    ///
    /// # Errors
    ///
    /// Returns an error if `model` has no readable manifest.
    pub fn model_metadata(&self, model: &str) -> Result<ModelMetadata> {
        Ok(self.resolver().resolve(model)?)
    }

    /// Schema reader over the project's model manifests and `catalog`
    pub fn schema_reader<C: Catalog>(&self, catalog: C) -> SchemaReader<ManifestResolver, C> {
        SchemaReader::new(self.resolver(), catalog).with_field_source(self.config.field_source)
    }

    /// `path` relative to the project root, for display
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
