//! jira-csv-import
//!
//! A CLI for importing a flat CSV of work items into Jira as a
//! hierarchy of Epics, Stories, Tasks and Sub-tasks, with parent-child
//! relationships inferred from row order.

pub mod cli;
pub mod core;
pub mod jira;
