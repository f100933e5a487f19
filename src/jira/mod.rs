//! Jira REST API v3 collaborator - issue creation and workflow
//! transitions

pub mod client;
pub mod payload;

pub use client::{JiraClient, JiraError};
