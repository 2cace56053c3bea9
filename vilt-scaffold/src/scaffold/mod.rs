//! Template emission
//!
//! Renders the controller, route and page templates for a described model
//! and writes them into the project tree.

pub mod generator;
pub mod helpers;
pub mod markup;
pub mod placeholder;
pub mod templates;

pub use generator::{Emitted, GeneratedFile, GenerationReport, Generator, StepReport};
pub use markup::ControlKind;
pub use placeholder::{substitute, Placeholder, PlaceholderGroup, Substitutions};
pub use templates::{PublishOutcome, Template, TemplateSet, TemplateSource, BUNDLED_SET};
