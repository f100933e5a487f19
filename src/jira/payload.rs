//! Request body shaping for the Jira REST API
//!
//! Descriptions are sent in Atlassian Document Format (ADF): a doc
//! node containing paragraph nodes. An empty description still needs
//! a doc with one empty paragraph.

use serde::Serialize;

use crate::core::import::NewIssue;

/// ADF document root
#[derive(Debug, Serialize)]
pub struct AdfDocument {
    version: u8,
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<AdfParagraph>,
}

#[derive(Debug, Serialize)]
struct AdfParagraph {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<AdfText>,
}

#[derive(Debug, Serialize)]
struct AdfText {
    #[serde(rename = "type")]
    node_type: &'static str,
    text: String,
}

impl AdfDocument {
    /// Wrap plain text in a single-paragraph document. Empty text
    /// yields a document with one empty paragraph.
    pub fn from_text(text: &str) -> Self {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![AdfText {
                node_type: "text",
                text: text.to_string(),
            }]
        };

        AdfDocument {
            version: 1,
            node_type: "doc",
            content: vec![AdfParagraph {
                node_type: "paragraph",
                content,
            }],
        }
    }
}

/// `{"key": ...}` reference
#[derive(Debug, Serialize)]
pub struct KeyRef {
    pub key: String,
}

/// `{"name": ...}` reference
#[derive(Debug, Serialize)]
pub struct NameRef {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct IssueFields {
    project: KeyRef,
    summary: String,
    description: AdfDocument,
    issuetype: NameRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    labels: Vec<String>,
    priority: NameRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<KeyRef>,
}

/// POST /rest/api/3/issue body
#[derive(Debug, Serialize)]
pub struct CreateIssuePayload {
    fields: IssueFields,
}

impl CreateIssuePayload {
    pub fn new(project_key: &str, issue: &NewIssue) -> Self {
        CreateIssuePayload {
            fields: IssueFields {
                project: KeyRef {
                    key: project_key.to_string(),
                },
                summary: issue.summary.clone(),
                description: AdfDocument::from_text(&issue.description),
                issuetype: NameRef {
                    name: issue.kind.as_str().to_string(),
                },
                labels: issue.labels.clone(),
                priority: NameRef {
                    name: issue.priority.clone(),
                },
                parent: issue
                    .parent_key
                    .as_ref()
                    .map(|key| KeyRef { key: key.clone() }),
            },
        }
    }
}

/// POST /rest/api/3/issue/{key}/transitions body
#[derive(Debug, Serialize)]
pub struct TransitionPayload {
    pub transition: IdRef,
}

#[derive(Debug, Serialize)]
pub struct IdRef {
    pub id: String,
}

impl TransitionPayload {
    pub fn new(transition_id: &str) -> Self {
        TransitionPayload {
            transition: IdRef {
                id: transition_id.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::row::IssueKind;
    use serde_json::json;

    fn issue() -> NewIssue {
        NewIssue {
            kind: IssueKind::Story,
            summary: "Login form".to_string(),
            description: "Build the form".to_string(),
            labels: vec!["UI".to_string(), "auth_flow".to_string()],
            priority: "High".to_string(),
            parent_key: Some("PROJ-1".to_string()),
        }
    }

    #[test]
    fn test_adf_document_single_paragraph() {
        let doc = serde_json::to_value(AdfDocument::from_text("hello")).unwrap();
        assert_eq!(
            doc,
            json!({
                "version": 1,
                "type": "doc",
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "hello"}]
                }]
            })
        );
    }

    #[test]
    fn test_adf_document_empty_text_yields_empty_paragraph() {
        let doc = serde_json::to_value(AdfDocument::from_text("")).unwrap();
        assert_eq!(
            doc,
            json!({
                "version": 1,
                "type": "doc",
                "content": [{"type": "paragraph", "content": []}]
            })
        );
    }

    #[test]
    fn test_create_payload_shape() {
        let payload = serde_json::to_value(CreateIssuePayload::new("PROJ", &issue())).unwrap();
        let fields = &payload["fields"];
        assert_eq!(fields["project"]["key"], "PROJ");
        assert_eq!(fields["summary"], "Login form");
        assert_eq!(fields["issuetype"]["name"], "Story");
        assert_eq!(fields["labels"], json!(["UI", "auth_flow"]));
        assert_eq!(fields["priority"]["name"], "High");
        assert_eq!(fields["parent"]["key"], "PROJ-1");
    }

    #[test]
    fn test_create_payload_omits_empty_labels_and_parent() {
        let mut i = issue();
        i.labels.clear();
        i.parent_key = None;
        let payload = serde_json::to_value(CreateIssuePayload::new("PROJ", &i)).unwrap();
        let fields = payload["fields"].as_object().unwrap();
        assert!(!fields.contains_key("labels"));
        assert!(!fields.contains_key("parent"));
    }

    #[test]
    fn test_subtask_issuetype_name() {
        let mut i = issue();
        i.kind = IssueKind::SubTask;
        let payload = serde_json::to_value(CreateIssuePayload::new("PROJ", &i)).unwrap();
        assert_eq!(payload["fields"]["issuetype"]["name"], "Sub-task");
    }

    #[test]
    fn test_transition_payload_shape() {
        let payload = serde_json::to_value(TransitionPayload::new("31")).unwrap();
        assert_eq!(payload, json!({"transition": {"id": "31"}}));
    }
}
