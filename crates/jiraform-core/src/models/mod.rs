pub mod config;
pub mod report;
pub mod request;

pub use config::{Config, FieldConfig, IssueTypeMap, JiraConfig, LoggingConfig};
pub use report::{CreatedIssue, CreatedIssueFields, CreatedSubtask, CreationReport};
pub use request::{split_list, IssueRequest, IssueType, RawForm, FIXED_COMPONENTS};
