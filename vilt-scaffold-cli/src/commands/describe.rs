//! Print the field descriptors of a model without generating anything

use anyhow::{Context, Result};
use console::style;
use vilt_scaffold::schema::{Catalog, ModelDescriptor, SqlCatalog};

use crate::Project;

pub struct DescribeCommand {
    model: String,
    json: bool,
}

impl DescribeCommand {
    pub const fn new(model: String, json: bool) -> Self {
        Self { model, json }
    }

    pub fn execute(&self, project: &Project) -> Result<()> {
        // An unknown model is reported before any database setup
        project.model_metadata(&self.model)?;
        let catalog = SqlCatalog::connect_lazy(project.config().require_database_url()?)?;
        let model = self.run_with(project, catalog)?;
        println!("{}", self.render(&model)?);
        Ok(())
    }

    pub fn run_with<C: Catalog>(&self, project: &Project, catalog: C) -> Result<ModelDescriptor> {
        Ok(project.schema_reader(catalog).describe(&self.model)?)
    }

    /// Descriptor list as pretty JSON or an aligned table
    pub fn render(&self, model: &ModelDescriptor) -> Result<String> {
        if self.json {
            return serde_json::to_string_pretty(model).context("Failed to serialize descriptors");
        }

        let width = model
            .fields
            .iter()
            .map(|f| f.name.len())
            .max()
            .unwrap_or(0);

        let mut out = format!(
            "{} {} ({})\n",
            style("Model").cyan().bold(),
            style(&model.name).green().bold(),
            model.table_name
        );
        for field in &model.fields {
            let mut flags = Vec::new();
            if field.required {
                flags.push("required");
            }
            if field.is_primary_key {
                flags.push("primary");
            }
            if field.is_foreign_key {
                flags.push("foreign");
            }

            out.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                field.name,
                field.field_type,
                style(flags.join(", ")).dim()
            ));
        }
        if !model.relations.is_empty() {
            let names: Vec<_> = model.relations.iter().map(|r| r.name.as_str()).collect();
            out.push_str(&format!("  {} {}\n", style("relations:").dim(), names.join(", ")));
        }

        Ok(out.trim_end().to_string())
    }
}
