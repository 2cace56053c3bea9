//! Copy the bundled stubs (and optionally a default `vilt.toml`) into the project
//!
//! Published stubs land in the override root, where they take precedence
//! over the compiled-in set and can be edited freely.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use vilt_scaffold::config::{ViltConfig, CONFIG_FILE_NAME};
use vilt_scaffold::scaffold::{PublishOutcome, TemplateSet};

use crate::Project;

pub struct PublishCommand {
    force: bool,
    with_config: bool,
}

impl PublishCommand {
    pub const fn new(force: bool, with_config: bool) -> Self {
        Self { force, with_config }
    }

    pub fn execute(&self, project: &Project) -> Result<Vec<PublishOutcome>> {
        let stubs_dir = project.paths().stubs_dir;
        let mut outcomes = TemplateSet::publish(&stubs_dir, self.force)?;

        if self.with_config {
            outcomes.push(self.write_config(project.root().join(CONFIG_FILE_NAME))?);
        }

        for outcome in &outcomes {
            match outcome {
                PublishOutcome::Written(path) => println!(
                    "  {} {}",
                    style("✓").green(),
                    style(project.relative(path).display()).dim()
                ),
                PublishOutcome::Kept(path) => println!(
                    "  {} {} (exists, use --force to overwrite)",
                    style("•").yellow(),
                    style(project.relative(path).display()).dim()
                ),
            }
        }

        Ok(outcomes)
    }

    fn write_config(&self, path: PathBuf) -> Result<PublishOutcome> {
        if path.exists() && !self.force {
            return Ok(PublishOutcome::Kept(path));
        }

        let content = toml::to_string_pretty(&ViltConfig::default())
            .context("Failed to serialize default configuration")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(PublishOutcome::Written(path))
    }
}
