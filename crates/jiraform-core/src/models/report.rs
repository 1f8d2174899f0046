//! Results of a creation run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
    pub fields: CreatedIssueFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssueFields {
    pub summary: String,
    pub labels: Vec<String>,
    /// Tracker-side issue type name
    pub issue_type: String,
    pub root_cause: Option<String>,
    pub environment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSubtask {
    pub key: String,
    pub summary: String,
    pub parent_key: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationReport {
    pub issue: CreatedIssue,
    pub subtasks: Vec<CreatedSubtask>,
    pub created_at: DateTime<Utc>,
}

impl CreationReport {
    pub fn new(issue: CreatedIssue) -> Self {
        Self {
            issue,
            subtasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn push_subtask(&mut self, subtask: CreatedSubtask) {
        self.subtasks.push(subtask);
    }

    pub fn subtask_keys(&self) -> Vec<&str> {
        self.subtasks.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn components(&self) -> Vec<&str> {
        self.subtasks.iter().map(|s| s.component.as_str()).collect()
    }
}

impl fmt::Display for CreationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Issue created successfully with key: {}", self.issue.key)?;
        writeln!(f, "Subtasks created successfully:")?;
        for subtask in &self.subtasks {
            writeln!(f, "{} - {}", subtask.key, subtask.summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> CreatedIssue {
        CreatedIssue {
            key: "PROJ-1".to_string(),
            fields: CreatedIssueFields {
                summary: "Crash on login".to_string(),
                labels: vec!["auth".to_string()],
                issue_type: "Bug".to_string(),
                root_cause: None,
                environment: None,
            },
        }
    }

    fn subtask(key: &str, component: &str) -> CreatedSubtask {
        CreatedSubtask {
            key: key.to_string(),
            summary: component.to_string(),
            parent_key: "PROJ-1".to_string(),
            component: component.to_string(),
        }
    }

    #[test]
    fn test_report_keeps_order() {
        let mut report = CreationReport::new(issue());
        report.push_subtask(subtask("PROJ-2", "Epic"));
        report.push_subtask(subtask("PROJ-3", "Story"));

        assert_eq!(report.subtask_keys(), vec!["PROJ-2", "PROJ-3"]);
        assert_eq!(report.components(), vec!["Epic", "Story"]);
    }

    #[test]
    fn test_report_display() {
        let mut report = CreationReport::new(issue());
        report.push_subtask(subtask("PROJ-2", "Epic"));

        let text = report.to_string();
        assert!(text.starts_with("Issue created successfully with key: PROJ-1\n"));
        assert!(text.contains("PROJ-2 - Epic\n"));
    }
}
