//! `jira-import config` command - show the resolved configuration

use console::style;
use miette::Result;

use crate::core::config::{Config, DEFAULT_STATUS};

pub fn run() -> Result<()> {
    let config = Config::load();

    println!("{}", style("Resolved configuration").bold());
    println!();
    print_field("jira_url", config.jira_url.as_deref());
    print_field("email", config.email.as_deref());
    print_field("api_token", config.api_token.as_deref().map(mask).as_deref());
    print_field("project_key", config.project_key.as_deref());
    print_field(
        "default_status",
        Some(config.default_status.as_deref().unwrap_or(DEFAULT_STATUS)),
    );

    if config.validate().is_err() {
        println!();
        println!(
            "{} Configuration is incomplete. Set values via JIRA_* environment \
             variables or a jira-import.yaml file.",
            style("⚠").yellow()
        );
    }

    Ok(())
}

fn print_field(name: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => {
            println!("  {:<16} {}", name, style(v).cyan());
        }
        _ => {
            println!("  {:<16} {}", name, style("(not set)").red());
        }
    }
}

/// Show only the first few characters of the token
fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{}…", visible)
}
