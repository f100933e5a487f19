//! Hierarchy inference - groups flat rows by kind and links children
//! to parents based purely on row order.
//!
//! Hierarchy: Epic → Story/Task → Sub-task. Stories and Tasks link to
//! the most recent Epic; Sub-tasks link to the most recent Story or
//! Task. An Epic starts a fresh sub-hierarchy.

use console::style;
use std::collections::HashMap;

use crate::core::row::{IssueKind, RowId, WorkItemRow};

/// Child row identity -> parent row identity. A row with no inferable
/// parent has no entry.
pub type ParentLink = HashMap<RowId, RowId>;

/// Row identities grouped by issue kind, input order preserved
#[derive(Debug, Default)]
pub struct Grouping {
    epics: Vec<RowId>,
    stories: Vec<RowId>,
    tasks: Vec<RowId>,
    subtasks: Vec<RowId>,
}

impl Grouping {
    /// Row identities for one kind, in input order
    pub fn rows(&self, kind: IssueKind) -> &[RowId] {
        match kind {
            IssueKind::Epic => &self.epics,
            IssueKind::Story => &self.stories,
            IssueKind::Task => &self.tasks,
            IssueKind::SubTask => &self.subtasks,
        }
    }

    fn push(&mut self, kind: IssueKind, id: RowId) {
        match kind {
            IssueKind::Epic => self.epics.push(id),
            IssueKind::Story => self.stories.push(id),
            IssueKind::Task => self.tasks.push(id),
            IssueKind::SubTask => self.subtasks.push(id),
        }
    }

    /// Total number of grouped rows
    pub fn len(&self) -> usize {
        self.epics.len() + self.stories.len() + self.tasks.len() + self.subtasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rolling scan state carried through the single forward pass
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    /// Most recent Epic, parent for Stories and Tasks
    current_epic: Option<RowId>,
    /// Most recent Story or Task, parent for Sub-tasks
    current_parent: Option<RowId>,
}

/// Group rows by kind and infer parent-child links in a single
/// left-to-right pass. A linked parent always precedes its child in
/// the input; there is no lookahead.
pub fn organize(rows: &[WorkItemRow]) -> (Grouping, ParentLink) {
    let mut grouping = Grouping::default();
    let mut links = ParentLink::new();

    rows.iter().fold(ScanState::default(), |state, row| {
        grouping.push(row.kind, row.id);
        match row.kind {
            IssueKind::Epic => ScanState {
                current_epic: Some(row.id),
                current_parent: None,
            },
            IssueKind::Story | IssueKind::Task => {
                // Stories and Tasks link only to the Epic, never to
                // each other
                if let Some(epic) = state.current_epic {
                    links.insert(row.id, epic);
                }
                ScanState {
                    current_parent: Some(row.id),
                    ..state
                }
            }
            IssueKind::SubTask => {
                match state.current_parent {
                    Some(parent) => {
                        links.insert(row.id, parent);
                    }
                    None => {
                        eprintln!(
                            "{} Warning: Sub-task '{}' has no parent Story or Task",
                            style("⚠").yellow(),
                            row.title
                        );
                    }
                }
                state
            }
        }
    });

    (grouping, links)
}
