//! Work item rows - CSV reading and issue-kind classification

use console::style;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Stable ordinal assigned to each non-blank input row (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub u32);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four importable issue kinds, in their fixed processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    Epic,
    Story,
    Task,
    SubTask,
}

impl IssueKind {
    /// Processing order: parents are always created before children
    pub const TIER_ORDER: [IssueKind; 4] = [
        IssueKind::Epic,
        IssueKind::Story,
        IssueKind::Task,
        IssueKind::SubTask,
    ];

    /// Classify a raw type cell. Case-insensitive; "subtask" and
    /// "sub-task" both map to SubTask. Returns None for anything
    /// unrecognized.
    pub fn classify(raw: &str) -> Option<IssueKind> {
        match raw.trim().to_lowercase().as_str() {
            "epic" => Some(IssueKind::Epic),
            "story" => Some(IssueKind::Story),
            "task" => Some(IssueKind::Task),
            "sub-task" | "subtask" => Some(IssueKind::SubTask),
            _ => None,
        }
    }

    /// The Jira issue-type name
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Epic => "Epic",
            IssueKind::Story => "Story",
            IssueKind::Task => "Task",
            IssueKind::SubTask => "Sub-task",
        }
    }

    /// Plural form for progress headings
    pub fn plural(&self) -> &'static str {
        match self {
            IssueKind::Epic => "Epics",
            IssueKind::Story => "Stories",
            IssueKind::Task => "Tasks",
            IssueKind::SubTask => "Sub-tasks",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One input record, immutable once read
#[derive(Debug, Clone)]
pub struct WorkItemRow {
    pub id: RowId,
    pub kind: IssueKind,
    pub title: String,
    pub description: String,
    /// Raw semicolon-delimited tag string
    pub tags: String,
    /// Raw priority string, validated later
    pub priority: String,
}

/// Errors that can occur while reading the input file
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Read work item rows from a CSV file.
///
/// Tolerates a leading UTF-8 byte-order marker. Rows with a blank
/// type cell are dropped silently; rows with an unrecognized type are
/// dropped with a warning. Dropped rows still consume a row identity
/// so that ordinals stay stable against the file.
pub fn read_rows(path: &Path) -> Result<Vec<WorkItemRow>, ReadError> {
    let contents = fs::read_to_string(path).map_err(|e| ReadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rows(&contents)
}

/// Parse work item rows from CSV text
pub fn parse_rows(input: &str) -> Result<Vec<WorkItemRow>, ReadError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = rdr.headers()?.clone();
    let header_map = build_header_map(&headers);

    if !header_map.contains_key("work item type") {
        return Err(ReadError::MissingColumn("Work Item Type"));
    }

    let mut rows = Vec::new();
    let mut next_id = 0u32;

    for result in rdr.records() {
        let record = result?;
        next_id += 1;
        let id = RowId(next_id);

        let raw_type = get_field(&record, &header_map, "work item type").unwrap_or_default();
        if raw_type.is_empty() {
            // Blank type means an empty or spacer row
            continue;
        }

        let kind = match IssueKind::classify(&raw_type) {
            Some(kind) => kind,
            None => {
                eprintln!(
                    "{} Row {}: Unrecognized work item type '{}' - skipping",
                    style("⚠").yellow(),
                    id,
                    raw_type
                );
                continue;
            }
        };

        rows.push(WorkItemRow {
            id,
            kind,
            title: get_field(&record, &header_map, "title")
                .unwrap_or_else(|| "Untitled".to_string()),
            description: get_field(&record, &header_map, "description").unwrap_or_default(),
            tags: get_field(&record, &header_map, "tags").unwrap_or_default(),
            priority: get_field(&record, &header_map, "priority").unwrap_or_default(),
        });
    }

    Ok(rows)
}

/// Build a map from header name to column index
fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a field value from a CSV record
fn get_field(
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(IssueKind::classify("Epic"), Some(IssueKind::Epic));
        assert_eq!(IssueKind::classify("EPIC"), Some(IssueKind::Epic));
        assert_eq!(IssueKind::classify("story"), Some(IssueKind::Story));
        assert_eq!(IssueKind::classify(" Task "), Some(IssueKind::Task));
    }

    #[test]
    fn test_classify_subtask_spellings() {
        assert_eq!(IssueKind::classify("Sub-task"), Some(IssueKind::SubTask));
        assert_eq!(IssueKind::classify("subtask"), Some(IssueKind::SubTask));
        assert_eq!(IssueKind::classify("SUBTASK"), Some(IssueKind::SubTask));
        assert_eq!(IssueKind::classify("SUB-TASK"), Some(IssueKind::SubTask));
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(IssueKind::classify("Bug"), None);
        assert_eq!(IssueKind::classify("Initiative"), None);
        assert_eq!(IssueKind::classify(""), None);
    }

    #[test]
    fn test_subtask_jira_name_is_hyphenated() {
        assert_eq!(IssueKind::SubTask.as_str(), "Sub-task");
    }

    #[test]
    fn test_parse_rows_basic() {
        let csv = "Work Item Type,Title,Description,Tags,Priority\n\
                   Epic,Login,User login,auth,High\n\
                   Story,Form,The form,ui,Medium\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, RowId(1));
        assert_eq!(rows[0].kind, IssueKind::Epic);
        assert_eq!(rows[0].title, "Login");
        assert_eq!(rows[1].id, RowId(2));
        assert_eq!(rows[1].kind, IssueKind::Story);
        assert_eq!(rows[1].priority, "Medium");
    }

    #[test]
    fn test_parse_rows_tolerates_bom() {
        let csv = "\u{feff}Work Item Type,Title\nEpic,Login\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Login");
    }

    #[test]
    fn test_parse_rows_drops_blank_type() {
        let csv = "Work Item Type,Title\nEpic,Login\n,spacer\nStory,Form\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        // The blank row still consumed ordinal 2
        assert_eq!(rows[1].id, RowId(3));
    }

    #[test]
    fn test_parse_rows_drops_unrecognized_but_keeps_ordinal() {
        let csv = "Work Item Type,Title\nEpic,Login\nBug,Broken\nStory,Form\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        // The unrecognized row consumed ordinal 2
        assert_eq!(rows[0].id, RowId(1));
        assert_eq!(rows[1].id, RowId(3));
    }

    #[test]
    fn test_parse_rows_missing_title_defaults() {
        let csv = "Work Item Type,Title\nEpic,\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].title, "Untitled");
    }

    #[test]
    fn test_parse_rows_requires_type_column() {
        let csv = "Title,Description\nLogin,x\n";
        let err = parse_rows(csv).unwrap_err();
        assert!(matches!(err, ReadError::MissingColumn("Work Item Type")));
    }

    #[test]
    fn test_parse_rows_headers_case_insensitive() {
        let csv = "work item type,TITLE\nepic,Login\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].title, "Login");
    }
}
