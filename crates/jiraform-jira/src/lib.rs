//! jiraform JIRA integration
//!
//! REST client for the JIRA issue API and the workflow that creates an issue
//! together with its sub-tasks.

pub mod auth;
pub mod client;
pub mod error;
pub mod tracker;
pub mod types;
pub mod workflow;

pub use auth::JiraAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use tracker::{IssueRef, IssueTracker, NewIssue, NewSubtask};
pub use workflow::{IssueWorkflow, WorkflowError};
