//! `jira-import import` command - the end-to-end import run

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::hierarchy::{organize, Grouping, ParentLink};
use crate::core::import::Importer;
use crate::core::row::{read_rows, IssueKind, WorkItemRow};
use crate::jira::JiraClient;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file containing work items
    pub file: PathBuf,

    /// Read and organize the file without creating any issues
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the post-create status transition
    #[arg(long)]
    pub skip_transitions: bool,

    /// Jira base URL (e.g. https://yourcompany.atlassian.net)
    #[arg(long, env = "JIRA_URL")]
    pub url: Option<String>,

    /// Account email for API authentication
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: Option<String>,

    /// Jira API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target project key
    #[arg(long, env = "JIRA_PROJECT_KEY")]
    pub project: Option<String>,

    /// Workflow status to transition created issues to
    #[arg(long, env = "JIRA_DEFAULT_STATUS")]
    pub status: Option<String>,
}

pub fn run(args: ImportArgs) -> Result<()> {
    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Jira Work Item Import").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!();

    if args.dry_run {
        // A dry run never touches the network, so credentials are
        // not required
        let rows = read_and_report(&args.file)?;
        let (grouping, links) = organize(&rows);
        print_plan(&rows, &grouping, &links);
        println!();
        println!(
            "{}",
            style("Dry run complete. No issues were created.").yellow()
        );
        return Ok(());
    }

    // Validate configuration before any row is processed
    let mut config = Config::load();
    config.merge(Config {
        jira_url: args.url.clone(),
        email: args.email.clone(),
        api_token: args.token.clone(),
        project_key: args.project.clone(),
        default_status: args.status.clone(),
    });
    let resolved = config.validate().map_err(|e| miette::miette!("{}", e))?;

    let rows = read_and_report(&args.file)?;
    let (grouping, links) = organize(&rows);

    let client = JiraClient::new(&resolved).into_diagnostic()?;
    let mut importer = Importer::new(links, resolved.default_status.clone())
        .with_skip_transitions(args.skip_transitions);
    importer.run(&rows, &grouping, &client);

    // Summary
    let stats = importer.stats();
    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Issues created:   {}", style(stats.created).green());
    if stats.failed > 0 {
        println!("  Failed:           {}", style(stats.failed).red());
    }
    if stats.skipped > 0 {
        println!("  Skipped:          {}", style(stats.skipped).dim());
    }
    if stats.transition_warnings > 0 {
        println!(
            "  Transition warnings: {}",
            style(stats.transition_warnings).yellow()
        );
    }

    if !importer.created().is_empty() {
        println!();
        println!("{}", style("Row → Issue Key").bold());
        for (id, key) in importer.created() {
            println!("  Row {} → {}", id, style(key).cyan());
        }
    }

    Ok(())
}

fn read_and_report(file: &PathBuf) -> Result<Vec<WorkItemRow>> {
    println!(
        "{} Reading {}",
        style("→").blue(),
        style(file.display()).yellow()
    );
    let rows = read_rows(file).map_err(|e| miette::miette!("{}", e))?;
    println!("Found {} work items", style(rows.len()).cyan());
    Ok(rows)
}

/// Print what the import would do, with parents shown as row
/// references since no issue keys exist yet
fn print_plan(rows: &[WorkItemRow], grouping: &Grouping, links: &ParentLink) {
    let by_id: std::collections::HashMap<_, _> = rows.iter().map(|r| (r.id, r)).collect();

    for kind in IssueKind::TIER_ORDER {
        for id in grouping.rows(kind) {
            let Some(row) = by_id.get(id) else {
                continue;
            };
            let parent = links.get(id);
            match (kind, parent) {
                (IssueKind::SubTask, None) => {
                    println!(
                        "{} Row {}: Would skip {} '{}' - no parent Story or Task",
                        style("⚠").yellow(),
                        id,
                        kind,
                        row.title
                    );
                }
                (_, Some(parent)) => {
                    println!(
                        "{} Row {}: Would create {} '{}' (parent: row {})",
                        style("○").dim(),
                        id,
                        style(kind).cyan(),
                        row.title,
                        parent
                    );
                }
                (_, None) => {
                    println!(
                        "{} Row {}: Would create {} '{}'",
                        style("○").dim(),
                        id,
                        style(kind).cyan(),
                        row.title
                    );
                }
            }
        }
    }
}
