//! `jira-import template` command - print a CSV template

use console::style;
use miette::Result;

const HEADERS: [&str; 5] = ["Work Item Type", "Title", "Description", "Tags", "Priority"];

const EXAMPLE_ROWS: [[&str; 5]; 4] = [
    [
        "Epic",
        "User Authentication",
        "Everything around signing users in",
        "auth",
        "High",
    ],
    [
        "Story",
        "Login form",
        "Build the login form",
        "auth; UI",
        "Medium",
    ],
    [
        "Sub-task",
        "Validate email field",
        "Client-side validation",
        "UI",
        "Low",
    ],
    [
        "Task",
        "Set up SSO integration",
        "Wire up the identity provider",
        "auth; infra",
        "High",
    ],
];

pub fn run() -> Result<()> {
    // Output to stdout (can be redirected to file)
    println!("{}", HEADERS.join(","));
    for row in EXAMPLE_ROWS {
        println!("{}", row.map(quote).join(","));
    }

    // Print usage hint to stderr so it doesn't interfere with
    // redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: jira-import template > work-items.csv",
        style("→").blue()
    );

    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field)
}
