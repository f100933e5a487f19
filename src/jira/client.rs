//! Jira REST API v3 client
//!
//! Blocking HTTP client with basic auth (account email + API token).
//! Implements the `IssueTracker` seam the importer runs against.

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::ResolvedConfig;
use crate::core::import::{IssueTracker, NewIssue, TransitionOutcome};
use crate::jira::payload::{CreateIssuePayload, TransitionPayload};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from the Jira API or the transport underneath it
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Jira REST client bound to one site and project
pub struct JiraClient {
    http: Client,
    base_url: String,
    email: String,
    api_token: String,
    project_key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

#[derive(Debug, Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
struct Transition {
    id: String,
    to: TransitionTarget,
}

#[derive(Debug, Deserialize)]
struct TransitionTarget {
    name: String,
}

impl JiraClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, JiraError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("jira-csv-import/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.jira_url.trim_end_matches('/').to_string(),
            email: config.email.clone(),
            api_token: config.api_token.clone(),
            project_key: config.project_key.clone(),
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
    }

    /// Turn a non-success response into `JiraError::Api`
    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, JiraError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(JiraError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

impl IssueTracker for JiraClient {
    type Error = JiraError;

    fn create_issue(&self, issue: &NewIssue) -> Result<String, JiraError> {
        let payload = CreateIssuePayload::new(&self.project_key, issue);
        let url = format!("{}/rest/api/3/issue", self.base_url);

        let response = Self::check(self.authed(self.http.post(&url)).json(&payload).send()?)?;
        let created: CreatedIssue = response.json()?;
        Ok(created.key)
    }

    fn transition_issue(
        &self,
        issue_key: &str,
        target_status: &str,
    ) -> Result<TransitionOutcome, JiraError> {
        let url = format!("{}/rest/api/3/issue/{}/transitions", self.base_url, issue_key);

        let response = Self::check(self.authed(self.http.get(&url)).send()?)?;
        let available: TransitionsResponse = response.json()?;

        let Some(transition) = available
            .transitions
            .iter()
            .find(|t| t.to.name.eq_ignore_ascii_case(target_status))
        else {
            return Ok(TransitionOutcome::NotAvailable);
        };

        let payload = TransitionPayload::new(&transition.id);
        Self::check(self.authed(self.http.post(&url)).json(&payload).send()?)?;
        Ok(TransitionOutcome::Executed)
    }
}
