//! Sequenced import - creates issues tier by tier so that parents
//! always exist before their children are attempted.
//!
//! Tier order is Epic, Story, Task, Sub-task; within a tier rows keep
//! their input order. Each row's failure is isolated: it is logged
//! and the run continues.

use console::style;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::hierarchy::{Grouping, ParentLink};
use crate::core::row::{IssueKind, RowId, WorkItemRow};

/// Jira priorities accepted as-is; anything else falls back to the
/// default with a warning
pub const VALID_PRIORITIES: [&str; 5] = ["Critical", "High", "Medium", "Low", "Trivial"];
pub const DEFAULT_PRIORITY: &str = "Medium";

/// Row identity -> created issue key, in row order
pub type CreatedIssueMap = BTreeMap<RowId, String>;

/// A fully shaped issue ready for the tracker collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub kind: IssueKind,
    pub summary: String,
    /// Plain description text; the tracker wraps it in its rich-text
    /// document format
    pub description: String,
    /// Cleaned labels: split on ';', trimmed, spaces replaced with
    /// underscores
    pub labels: Vec<String>,
    /// Validated priority name
    pub priority: String,
    pub parent_key: Option<String>,
}

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Executed,
    /// No transition to the target status is available for the issue
    NotAvailable,
}

/// The two tracker capabilities the importer needs. Implemented by
/// the Jira client; tests substitute a recording mock.
pub trait IssueTracker {
    type Error: fmt::Display;

    /// Create an issue and return its key
    fn create_issue(&self, issue: &NewIssue) -> Result<String, Self::Error>;

    /// Move an issue to the target status by name (case-insensitive)
    fn transition_issue(
        &self,
        issue_key: &str,
        target_status: &str,
    ) -> Result<TransitionOutcome, Self::Error>;
}

/// Counters for the end-of-run summary
#[derive(Debug, Default)]
pub struct ImportStats {
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    pub transition_warnings: usize,
}

/// Importer context: parent links, the growing row -> key map and
/// run counters. Owns the tier-ordered creation sequence.
pub struct Importer {
    parent_links: ParentLink,
    created: CreatedIssueMap,
    stats: ImportStats,
    target_status: String,
    skip_transitions: bool,
}

impl Importer {
    pub fn new(parent_links: ParentLink, target_status: impl Into<String>) -> Self {
        Self {
            parent_links,
            created: CreatedIssueMap::new(),
            stats: ImportStats::default(),
            target_status: target_status.into(),
            skip_transitions: false,
        }
    }

    /// Suppress the post-create status transition
    pub fn with_skip_transitions(mut self, skip: bool) -> Self {
        self.skip_transitions = skip;
        self
    }

    /// Run the import: every grouped row, tier by tier, in order.
    /// Row-level failures never abort the run.
    pub fn run<T: IssueTracker>(&mut self, rows: &[WorkItemRow], grouping: &Grouping, tracker: &T) {
        let by_id: BTreeMap<RowId, &WorkItemRow> = rows.iter().map(|r| (r.id, r)).collect();

        for kind in IssueKind::TIER_ORDER {
            let tier = grouping.rows(kind);
            if tier.is_empty() {
                continue;
            }

            println!();
            println!("{} Importing {}", style("→").blue(), style(kind.plural()).cyan());

            for id in tier {
                let Some(row) = by_id.get(id).copied() else {
                    continue;
                };
                self.import_row(row, tracker);
            }
        }
    }

    fn import_row<T: IssueTracker>(&mut self, row: &WorkItemRow, tracker: &T) {
        let parent_key = self.resolve_parent(row.id).map(str::to_string);

        // Epics never carry a parent; Stories and Tasks proceed with
        // or without one; a Sub-task must have one or is skipped.
        let parent_key = match row.kind {
            IssueKind::Epic => None,
            IssueKind::Story | IssueKind::Task => parent_key,
            IssueKind::SubTask => match parent_key {
                Some(key) => Some(key),
                None => {
                    println!(
                        "{} Skipping Sub-task '{}' - no parent issue available",
                        style("⚠").yellow(),
                        row.title
                    );
                    self.stats.skipped += 1;
                    return;
                }
            },
        };

        let issue = build_issue(row, parent_key);

        match tracker.create_issue(&issue) {
            Ok(key) => {
                println!(
                    "{} Created {}: {} - {}",
                    style("✓").green(),
                    row.kind,
                    style(&key).cyan(),
                    truncate(&row.title, 60)
                );
                if !self.skip_transitions {
                    self.transition(&key, tracker);
                }
                self.created.insert(row.id, key);
                self.stats.created += 1;
            }
            Err(e) => {
                // The row stays absent from the created map, so any
                // later children resolve to no parent
                println!(
                    "{} Failed to create {} '{}': {}",
                    style("✗").red(),
                    row.kind,
                    row.title,
                    e
                );
                self.stats.failed += 1;
            }
        }
    }

    /// Resolve a row's parent link through the created-issue map.
    /// Absent at either step means no parent.
    fn resolve_parent(&self, id: RowId) -> Option<&str> {
        self.parent_links
            .get(&id)
            .and_then(|parent| self.created.get(parent))
            .map(String::as_str)
    }

    fn transition<T: IssueTracker>(&mut self, key: &str, tracker: &T) {
        match tracker.transition_issue(key, &self.target_status) {
            Ok(TransitionOutcome::Executed) => {
                println!(
                    "  {} Transitioned {} to '{}'",
                    style("→").blue(),
                    key,
                    self.target_status
                );
            }
            Ok(TransitionOutcome::NotAvailable) => {
                println!(
                    "  {} No transition to '{}' available for {}",
                    style("⚠").yellow(),
                    self.target_status,
                    key
                );
                self.stats.transition_warnings += 1;
            }
            Err(e) => {
                println!(
                    "  {} Could not transition {} to '{}': {}",
                    style("⚠").yellow(),
                    key,
                    self.target_status,
                    e
                );
                self.stats.transition_warnings += 1;
            }
        }
    }

    pub fn created(&self) -> &CreatedIssueMap {
        &self.created
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }
}

/// Shape a row into a tracker-ready issue
pub fn build_issue(row: &WorkItemRow, parent_key: Option<String>) -> NewIssue {
    NewIssue {
        kind: row.kind,
        summary: row.title.clone(),
        description: row.description.clone(),
        labels: split_labels(&row.tags),
        priority: resolve_priority(&row.priority),
        parent_key,
    }
}

/// Split a raw tag string into labels: ';' delimited, trimmed, empty
/// fragments dropped, internal spaces replaced with underscores (Jira
/// labels do not allow spaces)
pub fn split_labels(tags: &str) -> Vec<String> {
    tags.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.replace(' ', "_"))
        .collect()
}

/// Validate a raw priority against the allowed set, falling back to
/// the default with a warning when invalid
pub fn resolve_priority(raw: &str) -> String {
    let raw = raw.trim();
    if VALID_PRIORITIES.contains(&raw) {
        return raw.to_string();
    }
    if !raw.is_empty() {
        eprintln!(
            "{} Invalid priority '{}', using default: {}",
            style("⚠").yellow(),
            raw,
            DEFAULT_PRIORITY
        );
    }
    DEFAULT_PRIORITY.to_string()
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
