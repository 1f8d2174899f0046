//! Issue creation workflow
//!
//! Creates the parent issue, fills in the bug-only custom fields, then fans out
//! one sub-task per component in order. Calls run one at a time and nothing is
//! rolled back when a later step fails; the error carries whatever was created.

use crate::tracker::{IssueTracker, NewIssue, NewSubtask};
use crate::Error;
use jiraform_core::models::{
    Config, CreatedIssue, CreatedIssueFields, CreatedSubtask, CreationReport, IssueRequest,
    IssueType,
};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid issue type: {0}")]
    InvalidIssueType(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to create issue: {0}")]
    RemoteCreateFailed(#[source] Error),

    #[error(
        "Issue {} was created but setting root cause and environment failed: {source}",
        .issue.key
    )]
    RemoteUpdateFailed {
        issue: Box<CreatedIssue>,
        #[source]
        source: Error,
    },

    #[error(
        "Issue {} was created but sub-task '{component}' failed after {} succeeded: {source}",
        .report.issue.key,
        .report.subtasks.len()
    )]
    SubtaskCreateFailed {
        component: String,
        report: Box<CreationReport>,
        #[source]
        source: Error,
    },
}

impl WorkflowError {
    /// Name of the step that failed
    pub fn step(&self) -> &'static str {
        match self {
            WorkflowError::InvalidIssueType(_) | WorkflowError::InvalidRequest(_) => "validate",
            WorkflowError::RemoteCreateFailed(_) => "create issue",
            WorkflowError::RemoteUpdateFailed { .. } => "update bug fields",
            WorkflowError::SubtaskCreateFailed { .. } => "create sub-tasks",
        }
    }

    /// The parent issue, when it exists on the tracker despite the failure
    pub fn created_issue(&self) -> Option<&CreatedIssue> {
        match self {
            WorkflowError::RemoteUpdateFailed { issue, .. } => Some(&**issue),
            WorkflowError::SubtaskCreateFailed { report, .. } => Some(&report.issue),
            _ => None,
        }
    }

    /// Everything created before a sub-task failed
    pub fn partial_report(&self) -> Option<&CreationReport> {
        match self {
            WorkflowError::SubtaskCreateFailed { report, .. } => Some(&**report),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

pub struct IssueWorkflow<T> {
    tracker: T,
    config: Config,
}

impl<T: IssueTracker> IssueWorkflow<T> {
    pub fn new(tracker: T, config: Config) -> Self {
        Self { tracker, config }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create the issue described by `request` along with its sub-tasks
    pub async fn create_issue(&self, request: &IssueRequest) -> Result<CreationReport> {
        let type_name = self.validate(request)?;

        let issue = self.create_parent(request, type_name).await?;
        tracing::info!("Created issue {}", issue.key);

        let issue = if request.issue_type == IssueType::Bug {
            self.apply_bug_fields(issue, request).await?
        } else {
            issue
        };

        let report = self.create_subtasks(issue, request).await?;
        tracing::info!(
            "Created {} sub-tasks under {}",
            report.subtasks.len(),
            report.issue.key
        );
        Ok(report)
    }

    fn validate(&self, request: &IssueRequest) -> Result<String> {
        let type_name = self
            .config
            .issue_types
            .name_for(request.issue_type)
            .ok_or_else(|| WorkflowError::InvalidIssueType(request.issue_type.to_string()))?
            .to_string();

        request
            .validate()
            .map_err(|e| WorkflowError::InvalidRequest(e.to_string()))?;

        Ok(type_name)
    }

    async fn create_parent(
        &self,
        request: &IssueRequest,
        type_name: String,
    ) -> Result<CreatedIssue> {
        let new_issue = NewIssue {
            project_key: self.config.jira.project_key.clone(),
            summary: request.title.clone(),
            issue_type: type_name,
            labels: request.labels.clone(),
        };

        tracing::debug!(
            "Creating {} in {}: {}",
            new_issue.issue_type,
            new_issue.project_key,
            new_issue.summary
        );

        let created = self
            .tracker
            .create_issue(&new_issue)
            .await
            .map_err(WorkflowError::RemoteCreateFailed)?;

        if created.key.trim().is_empty() {
            return Err(WorkflowError::RemoteCreateFailed(Error::InvalidResponse(
                "created issue has no key".to_string(),
            )));
        }

        Ok(CreatedIssue {
            key: created.key,
            fields: CreatedIssueFields {
                summary: new_issue.summary,
                labels: new_issue.labels,
                issue_type: new_issue.issue_type,
                root_cause: None,
                environment: None,
            },
        })
    }

    async fn apply_bug_fields(
        &self,
        mut issue: CreatedIssue,
        request: &IssueRequest,
    ) -> Result<CreatedIssue> {
        let mut fields = Map::new();
        fields.insert(
            self.config.fields.root_cause.clone(),
            optional_string(&request.root_cause),
        );
        fields.insert(
            self.config.fields.environment.clone(),
            optional_string(&request.environment),
        );

        if let Err(source) = self.tracker.update_issue(&issue.key, &fields).await {
            tracing::warn!("Failed to set bug fields on {}: {}", issue.key, source);
            return Err(WorkflowError::RemoteUpdateFailed {
                issue: Box::new(issue),
                source,
            });
        }

        issue.fields.root_cause = request.root_cause.clone();
        issue.fields.environment = request.environment.clone();
        Ok(issue)
    }

    async fn create_subtasks(
        &self,
        issue: CreatedIssue,
        request: &IssueRequest,
    ) -> Result<CreationReport> {
        let mut report = CreationReport::new(issue);

        for component in request.components() {
            let new_subtask = NewSubtask {
                project_key: self.config.jira.project_key.clone(),
                parent_key: report.issue.key.clone(),
                component: component.to_string(),
                issue_type: self.config.jira.subtask_issue_type.clone(),
            };

            match self.tracker.create_subtask(&new_subtask).await {
                Ok(created) => {
                    tracing::debug!("Created sub-task {} for {}", created.key, component);
                    report.push_subtask(CreatedSubtask {
                        key: created.key,
                        summary: new_subtask.component.clone(),
                        parent_key: new_subtask.parent_key,
                        component: new_subtask.component,
                    });
                }
                Err(source) => {
                    tracing::warn!(
                        "Sub-task '{}' under {} failed: {}",
                        component,
                        report.issue.key,
                        source
                    );
                    return Err(WorkflowError::SubtaskCreateFailed {
                        component: component.to_string(),
                        report: Box::new(report),
                        source,
                    });
                }
            }
        }

        Ok(report)
    }
}

fn optional_string(value: &Option<String>) -> Value {
    value
        .as_ref()
        .map(|v| Value::String(v.clone()))
        .unwrap_or(Value::Null)
}
