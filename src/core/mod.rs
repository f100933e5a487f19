//! Core module - row model, hierarchy inference and sequenced import

pub mod config;
pub mod hierarchy;
pub mod import;
pub mod row;

pub use config::{Config, ConfigError, ResolvedConfig};
pub use hierarchy::{organize, Grouping, ParentLink};
pub use import::{
    CreatedIssueMap, Importer, ImportStats, IssueTracker, NewIssue, TransitionOutcome,
};
pub use row::{IssueKind, ReadError, RowId, WorkItemRow};
