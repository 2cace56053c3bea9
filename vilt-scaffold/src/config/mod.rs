//! Configuration management for vilt-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `VILT_` prefix, `__` for nesting)
//! 2. `--config <file>` when given, otherwise `./vilt.toml` in the project root
//! 3. `~/.config/vilt-scaffold/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! `DATABASE_URL` is honoured when no `database_url` was configured.
//!
//! Environment variable format: `VILT_SECTION__FIELD_NAME`
//! - Example: `VILT_LAYOUT_NAME=AdminLayout`
//! - Example: `VILT_PATHS__ROUTES_FILE=routes/admin.php`
//!
//! # Example Configuration
//!
//! ```toml
//! # vilt.toml
//! stub_template = "default"
//! layout_name = "AppLayout"
//! controller_namespace = "App\\Http\\Controllers"
//! field_source = "catalog"
//! database_url = "mysql://root@localhost/blog"
//!
//! [paths]
//! models_dir = "app/Models"
//! routes_file = "routes/web.php"
//!
//! [placeholders]
//! validation_rules = true
//! relations = false
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};
use crate::scaffold::helpers::NameHelpers;
use crate::scaffold::PlaceholderGroup;
use crate::schema::FieldSource;

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "vilt.toml";

/// Input and output locations, relative to the project root unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding `{Model}.toml` model manifests
    pub models_dir: PathBuf,

    /// Directory receiving `{Model}Controller.php`
    pub controllers_dir: PathBuf,

    /// Shared route-definitions file
    pub routes_file: PathBuf,

    /// Directory receiving `{Model}/Index.vue`, `Form.vue` and `Show.vue`
    pub pages_dir: PathBuf,

    /// Override root for template sets (`{stubs_dir}/{stub_template}/*.stub`)
    pub stubs_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("app/Models"),
            controllers_dir: PathBuf::from("app/Http/Controllers"),
            routes_file: PathBuf::from("routes/web.php"),
            pages_dir: PathBuf::from("resources/js/Pages"),
            stubs_dir: PathBuf::from("stubs/vilt-crud-generator"),
        }
    }
}

impl PathSettings {
    /// Anchor every relative path at `root`
    #[must_use]
    pub fn rooted(&self, root: &Path) -> Self {
        Self {
            models_dir: root.join(&self.models_dir),
            controllers_dir: root.join(&self.controllers_dir),
            routes_file: root.join(&self.routes_file),
            pages_dir: root.join(&self.pages_dir),
            stubs_dir: root.join(&self.stubs_dir),
        }
    }
}

/// Toggles for the optional template-variable groups
///
/// A disabled group is not bound, so its tokens stay verbatim in the output.
/// Naming and layout tokens are always bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PlaceholderSettings {
    /// `{{ validRules }}` in the controller
    pub validation_rules: bool,

    /// `{{ th }}` / `{{ td }}` in the list view
    pub table: bool,

    /// `{{ fields }}` in the form view
    pub form_fields: bool,

    /// `{{ relations }}` in the controller
    pub relations: bool,
}

impl Default for PlaceholderSettings {
    fn default() -> Self {
        Self {
            validation_rules: true,
            table: true,
            form_fields: true,
            relations: true,
        }
    }
}

impl PlaceholderSettings {
    /// Whether tokens of `group` should be substituted
    #[must_use]
    pub const fn is_enabled(&self, group: PlaceholderGroup) -> bool {
        match group {
            PlaceholderGroup::Naming | PlaceholderGroup::Layout => true,
            PlaceholderGroup::ValidationRules => self.validation_rules,
            PlaceholderGroup::Table => self.table,
            PlaceholderGroup::FormFields => self.form_fields,
            PlaceholderGroup::Relations => self.relations,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViltConfig {
    /// Template set directory name
    pub stub_template: String,

    /// Layout component wrapping the generated pages
    pub layout_name: String,

    /// PHP namespace of generated controllers
    pub controller_namespace: String,

    /// Where the descriptor list comes from
    pub field_source: FieldSource,

    /// Catalog connection URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Input and output locations
    pub paths: PathSettings,

    /// Optional template-variable groups
    pub placeholders: PlaceholderSettings,
}

impl Default for ViltConfig {
    fn default() -> Self {
        Self {
            stub_template: "default".to_string(),
            layout_name: "AppLayout".to_string(),
            controller_namespace: "App\\Http\\Controllers".to_string(),
            field_source: FieldSource::Catalog,
            database_url: None,
            paths: PathSettings::default(),
            placeholders: PlaceholderSettings::default(),
        }
    }
}

impl ViltConfig {
    /// Load configuration for a project
    ///
    /// Precedence, highest first:
    /// 1. Environment variables (`VILT_*`, use `__` for nesting)
    /// 2. `explicit_file` if given, otherwise `{project_root}/vilt.toml`
    /// 3. `~/.config/vilt-scaffold/config.toml`
    /// 4. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `explicit_file` does not exist
    /// - A configuration file contains invalid TOML
    /// - Configuration values fail type conversion
    pub fn load(project_root: &Path, explicit_file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        match explicit_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ScaffoldError::Io {
                        path: path.to_path_buf(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local_config = project_root.join(CONFIG_FILE_NAME);
                if local_config.exists() {
                    figment = figment.merge(Toml::file(&local_config));
                }
            }
        }

        figment = figment.merge(Env::prefixed("VILT_").split("__").lowercase(true));

        let mut config: Self = figment.extract().map_err(Box::new)?;
        if config.database_url.is_none() {
            config.database_url = std::env::var("DATABASE_URL").ok();
        }

        tracing::debug!(
            stub_template = %config.stub_template,
            field_source = ?config.field_source,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a specific file, without project or user layers
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values fail
    /// type conversion. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)?;

        Ok(config)
    }

    /// Get the recommended XDG path for the user configuration file
    ///
    /// # Example
    ///
    /// ```rust
    /// use vilt_scaffold::config::ViltConfig;
    ///
    /// let path = ViltConfig::recommended_path();
    /// // Returns: ~/.config/vilt-scaffold/config.toml
    /// assert!(path.ends_with("config.toml") || path.ends_with("vilt.toml"));
    /// ```
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(CONFIG_FILE_NAME),
            |config_dir| config_dir.join("vilt-scaffold").join("config.toml"),
        )
    }

    /// The configured database URL
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingDatabaseUrl`] when none is configured.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or(ScaffoldError::MissingDatabaseUrl)
    }

    /// Fully-qualified controller class reference for `model`
    #[must_use]
    pub fn controller_reference(&self, model: &str) -> String {
        NameHelpers::controller_reference(&self.controller_namespace, model)
    }
}
