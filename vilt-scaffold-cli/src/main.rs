//! vilt CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use vilt_cli_lib::{DescribeCommand, GenerateCommand, LogFormatArg, Project, PublishCommand};
use vilt_scaffold::observability;

#[derive(Parser)]
#[command(name = "vilt")]
#[command(version)]
#[command(about = "CRUD scaffolding for Laravel + Inertia + Vue projects", long_about = None)]
struct Cli {
    /// Project root
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    path: PathBuf,

    /// Configuration file (replaces <DIR>/vilt.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Compact)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate controller, route and pages for a model
    Generate {
        /// Model name (`PascalCase`, e.g. `Post`, `BlogPost`)
        model: String,
    },
    /// Print the fields a model would be scaffolded with
    Describe {
        /// Model name (`PascalCase`)
        model: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Copy the bundled stubs into the project for customization
    Publish {
        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
        /// Also write a vilt.toml with the default settings
        #[arg(long)]
        with_config: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose, cli.log_format.into())?;

    let project = Project::load(&cli.path, cli.config.as_deref())?;
    tracing::debug!(root = %project.root().display(), "project loaded");

    match cli.command {
        Commands::Generate { model } => {
            GenerateCommand::new(model).execute(&project)?;
        }
        Commands::Describe { model, json } => {
            DescribeCommand::new(model, json).execute(&project)?;
        }
        Commands::Publish { force, with_config } => {
            PublishCommand::new(force, with_config).execute(&project)?;
        }
    }

    Ok(())
}
