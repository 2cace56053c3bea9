//! CRUD scaffold generator orchestrator
//!
//! Coordinates the generation of all files for one model:
//! - Controller
//! - Route registration
//! - List, form and detail pages
//!
//! Steps run in a fixed order and are independent: a failing step is
//! recorded in the [`GenerationReport`] and the next step still runs.
//! Nothing is rolled back.

use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::helpers::NameHelpers;
use super::markup;
use super::placeholder::{Placeholder, PlaceholderGroup, Substitutions};
use super::templates::{Template, TemplateSet};
use crate::config::{PathSettings, ViltConfig};
use crate::error::{Result, ScaffoldError};
use crate::schema::ModelDescriptor;

/// Option groups bound for each template
const fn groups_for(template: Template) -> &'static [PlaceholderGroup] {
    match template {
        Template::Controller => &[
            PlaceholderGroup::Naming,
            PlaceholderGroup::ValidationRules,
            PlaceholderGroup::Relations,
        ],
        Template::Route => &[PlaceholderGroup::Naming],
        Template::ListView => &[
            PlaceholderGroup::Naming,
            PlaceholderGroup::Layout,
            PlaceholderGroup::Table,
        ],
        Template::FormView => &[
            PlaceholderGroup::Naming,
            PlaceholderGroup::Layout,
            PlaceholderGroup::FormFields,
        ],
        Template::DetailView => &[PlaceholderGroup::Naming, PlaceholderGroup::Layout],
    }
}

/// A rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Template the file was rendered from
    pub template: Template,
    /// Target path
    pub path: PathBuf,
    /// Substituted content
    pub content: String,
}

/// Effect of one emission step on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// File created or replaced
    Written(PathBuf),
    /// Text appended to an existing (or new) file
    Appended(PathBuf),
    /// Nothing to do; the content is already present
    Skipped(PathBuf),
}

impl Emitted {
    /// Target path
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Appended(path) | Self::Skipped(path) => path,
        }
    }
}

/// Outcome of one emission step
#[derive(Debug)]
pub struct StepReport {
    /// Template the step rendered
    pub template: Template,
    /// What happened
    pub outcome: Result<Emitted>,
}

/// Outcome of a whole generation run
#[derive(Debug)]
pub struct GenerationReport {
    /// Model name
    pub model: String,
    /// One entry per template, in emission order
    pub steps: Vec<StepReport>,
}

impl GenerationReport {
    /// Paths written or appended to
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|step| match &step.outcome {
            Ok(Emitted::Written(path) | Emitted::Appended(path)) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Paths left untouched because their content was already present
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|step| match &step.outcome {
            Ok(Emitted::Skipped(path)) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Failed steps with their errors
    pub fn failures(&self) -> impl Iterator<Item = (Template, &ScaffoldError)> {
        self.steps
            .iter()
            .filter_map(|step| step.outcome.as_ref().err().map(|e| (step.template, e)))
    }

    /// Whether every step succeeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|step| step.outcome.is_ok())
    }
}

/// CRUD scaffold generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: ViltConfig,
    paths: PathSettings,
    templates: TemplateSet,
}

impl Generator {
    /// Generator writing below `project_root`
    pub fn new(config: ViltConfig, project_root: impl AsRef<Path>) -> Self {
        let paths = config.paths.rooted(project_root.as_ref());
        let templates = TemplateSet::new(&paths.stubs_dir, config.stub_template.clone());

        Self {
            config,
            paths,
            templates,
        }
    }

    /// Generate every file for `model`
    ///
    /// Order: controller, route, list view, form view, detail view.
    #[tracing::instrument(skip_all, fields(model = %model.name))]
    pub fn generate(&self, model: &ModelDescriptor) -> GenerationReport {
        let subs = self.substitutions(model);

        let steps = Template::EMISSION_ORDER
            .into_iter()
            .map(|template| {
                let outcome = self
                    .render(template, model, &subs)
                    .and_then(|file| Self::emit(&file));

                match &outcome {
                    Ok(emitted) => info!(
                        template = template.label(),
                        path = %emitted.path().display(),
                        "step finished"
                    ),
                    Err(e) => warn!(template = template.label(), error = %e, "step failed"),
                }

                StepReport { template, outcome }
            })
            .collect();

        GenerationReport {
            model: model.name.clone(),
            steps,
        }
    }

    /// Render one template without touching the output tree
    pub fn render_one(&self, template: Template, model: &ModelDescriptor) -> Result<GeneratedFile> {
        self.render(template, model, &self.substitutions(model))
    }

    /// Target path of `template` for `model`
    #[must_use]
    pub fn output_path(&self, template: Template, model: &str) -> PathBuf {
        match template {
            Template::Controller => self
                .paths
                .controllers_dir
                .join(format!("{}.php", NameHelpers::controller_class(model))),
            Template::Route => self.paths.routes_file.clone(),
            Template::ListView => self.paths.pages_dir.join(model).join("Index.vue"),
            Template::FormView => self.paths.pages_dir.join(model).join("Form.vue"),
            Template::DetailView => self.paths.pages_dir.join(model).join("Show.vue"),
        }
    }

    /// Every value the vocabulary can take for `model`, before group filtering
    fn substitutions(&self, model: &ModelDescriptor) -> Substitutions {
        let name = model.name.as_str();

        Substitutions::new()
            .with(Placeholder::Namespace, self.config.controller_namespace.as_str())
            .with(Placeholder::Model, name)
            .with(Placeholder::ModelVariable, NameHelpers::model_variable(name))
            .with(
                Placeholder::CollectionVariable,
                NameHelpers::collection_variable(name),
            )
            .with(Placeholder::ControllerClass, NameHelpers::controller_class(name))
            .with(
                Placeholder::ControllerReference,
                self.config.controller_reference(name),
            )
            .with(Placeholder::LayoutName, self.config.layout_name.as_str())
            .with(
                Placeholder::ValidationRules,
                markup::validation_rules(&model.fields),
            )
            .with(Placeholder::TableHead, markup::table_head(&model.fields))
            .with(Placeholder::TableData, markup::table_data(&model.fields))
            .with(Placeholder::FormFields, markup::form_fields(&model.fields))
            .with(Placeholder::Relations, markup::relation_list(&model.relations))
    }

    fn render(
        &self,
        template: Template,
        model: &ModelDescriptor,
        all: &Substitutions,
    ) -> Result<GeneratedFile> {
        let source = self.templates.load(template)?;

        let mut bound = Substitutions::new();
        for &group in groups_for(template) {
            if !self.config.placeholders.is_enabled(group) {
                continue;
            }
            for placeholder in Placeholder::in_group(group) {
                if let Some(value) = all.get(placeholder) {
                    bound.bind(placeholder, value);
                }
            }
        }

        Ok(GeneratedFile {
            template,
            path: self.output_path(template, &model.name),
            content: bound.apply(&source),
        })
    }

    fn emit(file: &GeneratedFile) -> Result<Emitted> {
        match file.template {
            Template::Route => Self::append_route(&file.path, &file.content),
            _ => {
                create_parent(&file.path)?;
                fs::write(&file.path, &file.content).map_err(|source| {
                    ScaffoldError::OutputPathUnwritable {
                        path: file.path.clone(),
                        source,
                    }
                })?;
                Ok(Emitted::Written(file.path.clone()))
            }
        }
    }

    /// Append `text` unless the routes file already contains it verbatim
    fn append_route(path: &Path, text: &str) -> Result<Emitted> {
        let existing = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(ScaffoldError::OutputPathUnwritable {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if existing.contains(text) {
            return Ok(Emitted::Skipped(path.to_path_buf()));
        }

        create_parent(path)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| write!(file, "\n{text}"))
            .map_err(|source| ScaffoldError::OutputPathUnwritable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Emitted::Appended(path.to_path_buf()))
    }
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::OutputPathUnwritable {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
