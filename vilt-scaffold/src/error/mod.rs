//! Error types for schema reading and template emission

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No model manifest exists for the requested name
    #[error("Model {0} does not exist.")]
    ModelNotFound(String),

    /// The table yielded no usable fields after exclusions
    #[error("Table schema for {0} not found.")]
    EmptySchema(String),

    /// Template missing from both the override root and the bundled set
    #[error("Template '{file}' not found in template set '{set}'.")]
    TemplateNotFound {
        /// Template set name (the `stub_template` option)
        set: String,
        /// Template file name
        file: String,
    },

    /// A target directory or file could not be created or written
    #[error("Cannot write '{path}': {source}")]
    OutputPathUnwritable {
        /// The path that could not be written
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Model manifest exists but cannot be parsed
    #[error("Invalid model manifest '{path}': {source}")]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
        /// Parse error
        source: toml::de::Error,
    },

    /// Reading an input file failed
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path that could not be read
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Catalog query or connection failure
    #[error("Catalog query failed: {0}")]
    Catalog(#[from] sqlx::Error),

    /// The catalog runtime could not be started
    #[error("Failed to start catalog runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Database URL scheme is not one of mysql, mariadb, postgres, sqlite
    #[error("Unsupported database URL scheme '{0}' (expected mysql, mariadb, postgres or sqlite)")]
    UnsupportedDatabase(String),

    /// No database URL configured
    #[error("No database URL configured (set `database_url` in vilt.toml or DATABASE_URL)")]
    MissingDatabaseUrl,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}
