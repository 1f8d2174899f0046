//! Operations the workflow needs from an issue tracker

use crate::Result;
use serde_json::{Map, Value};
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    /// Tracker-side type name
    pub issue_type: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubtask {
    pub project_key: String,
    pub parent_key: String,
    /// Component name, used as the sub-task summary
    pub component: String,
    pub issue_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub key: String,
}

pub trait IssueTracker {
    fn create_issue(&self, issue: &NewIssue) -> impl Future<Output = Result<IssueRef>> + Send;

    fn update_issue(
        &self,
        key: &str,
        fields: &Map<String, Value>,
    ) -> impl Future<Output = Result<()>> + Send;

    fn create_subtask(
        &self,
        subtask: &NewSubtask,
    ) -> impl Future<Output = Result<IssueRef>> + Send;
}
