//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::import::ImportArgs;

#[derive(Parser)]
#[command(name = "jira-import")]
#[command(author, version, about = "Import hierarchical work items from a CSV file into Jira")]
#[command(
    long_about = "Reads a flat CSV of work items (Epics, Stories, Tasks, Sub-tasks) and \
creates them in Jira, inferring parent-child relationships from row order: Stories and \
Tasks attach to the most recent Epic, Sub-tasks to the most recent Story or Task."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import work items from a CSV file
    Import(ImportArgs),

    /// Print a CSV template to stdout
    Template,

    /// Show the resolved configuration (API token masked)
    Config,
}
