//! CRUD generation for one model
//!
//! # Example
//!
//! ```bash
//! vilt generate Post
//! vilt --path ../blog -v generate Comment
//! ```

use anyhow::Result;
use console::style;
use vilt_scaffold::scaffold::{Emitted, GenerationReport, Generator};
use vilt_scaffold::schema::{Catalog, SqlCatalog};

use crate::Project;

pub struct GenerateCommand {
    model: String,
}

impl GenerateCommand {
    pub const fn new(model: String) -> Self {
        Self { model }
    }

    /// Describe the model from the configured database and emit every file
    pub fn execute(&self, project: &Project) -> Result<()> {
        // An unknown model is reported before any database setup
        project.model_metadata(&self.model)?;
        let catalog = SqlCatalog::connect_lazy(project.config().require_database_url()?)?;
        let report = self.run_with(project, catalog)?;

        let failed = report.failures().count();
        if failed > 0 {
            anyhow::bail!(
                "{failed} of {} steps failed for {}",
                report.steps.len(),
                self.model
            );
        }

        println!(
            "\n{} CRUD for {} created successfully.",
            style("✨").green().bold(),
            style(&self.model).green().bold()
        );
        Ok(())
    }

    /// Run the pipeline against `catalog`, printing one line per step
    ///
    /// Schema errors (unknown model, empty table) are returned before any
    /// file is touched. Emission failures are reported in the returned
    /// [`GenerationReport`].
    pub fn run_with<C: Catalog>(&self, project: &Project, catalog: C) -> Result<GenerationReport> {
        let model = project.schema_reader(catalog).describe(&self.model)?;

        println!(
            "\n{} {} {}",
            style("Generating CRUD for").cyan().bold(),
            style(&self.model).green().bold(),
            style(format!("({} fields)", model.fields.len())).dim()
        );

        let report = Generator::new(project.config().clone(), project.root()).generate(&model);

        for step in &report.steps {
            match &step.outcome {
                Ok(Emitted::Written(path)) => println!(
                    "  {} {} ({})",
                    style("✓").green(),
                    style(project.relative(path).display()).dim(),
                    style(step.template.label()).dim()
                ),
                Ok(Emitted::Appended(path)) => println!(
                    "  {} {} ({} appended)",
                    style("✓").green(),
                    style(project.relative(path).display()).dim(),
                    style(step.template.label()).dim()
                ),
                Ok(Emitted::Skipped(path)) => println!(
                    "  {} {} ({} already present)",
                    style("•").yellow(),
                    style(project.relative(path).display()).dim(),
                    style(step.template.label()).dim()
                ),
                Err(e) => eprintln!(
                    "  {} {}: {}",
                    style("✗").red(),
                    style(step.template.label()).red(),
                    e
                ),
            }
        }

        Ok(report)
    }
}
