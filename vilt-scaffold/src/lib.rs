//! vilt-scaffold: schema-driven CRUD scaffolding for Laravel + Inertia + Vue
//!
//! Given a model name, the crate reads the model's declared metadata, inspects
//! the backing table in the database catalog and emits:
//!
//! - a controller (`app/Http/Controllers/{Model}Controller.php`)
//! - a route registration appended to `routes/web.php`
//! - list, form and detail pages under `resources/js/Pages/{Model}/`
//!
//! # Pipeline
//!
//! ```text
//! ModelResolver + Catalog ──► SchemaReader::describe ──► ModelDescriptor
//!                                                            │
//!                       TemplateSet + ViltConfig ──► Generator::generate ──► files
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use vilt_scaffold::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let root = std::path::Path::new(".");
//! let config = ViltConfig::load(root, None)?;
//! let catalog = SqlCatalog::connect_lazy(config.require_database_url()?)?;
//! let resolver = ManifestResolver::new(config.paths.rooted(root).models_dir);
//!
//! let model = SchemaReader::new(resolver, catalog)
//!     .with_field_source(config.field_source)
//!     .describe("Post")?;
//!
//! let report = Generator::new(config, root).generate(&model);
//! for path in report.written() {
//!     println!("wrote {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod schema;

pub mod prelude {
    //! Convenience re-exports for the common pipeline types

    pub use crate::config::{PathSettings, PlaceholderSettings, ViltConfig};
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::scaffold::{
        Emitted, GenerationReport, Generator, Placeholder, Substitutions, Template, TemplateSet,
    };
    pub use crate::schema::{
        Catalog, CatalogColumn, FieldDescriptor, FieldSource, ManifestResolver, ModelDescriptor,
        ModelMetadata, ModelResolver, Relation, RelationKind, SchemaReader, SqlCatalog,
        StaticCatalog,
    };
}
