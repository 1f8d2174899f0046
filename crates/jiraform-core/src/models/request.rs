//! Issue request data model

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Components that get a sub-item under every created issue, before the flows.
pub const FIXED_COMPONENTS: [&str; 3] = ["Epic", "Story", "Bug"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Epic,
    Story,
    Bug,
    Task,
}

impl IssueType {
    pub const ALL: [Self; 4] = [Self::Epic, Self::Story, Self::Bug, Self::Task];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::Story => "Story",
            IssueType::Bug => "Bug",
            IssueType::Task => "Task",
        }
    }

    /// Whether the root cause and environment fields apply to this type
    pub fn has_bug_fields(&self) -> bool {
        *self == IssueType::Bug
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::InvalidIssueType(trimmed.to_string()))
    }
}

/// Split a comma-delimited string into trimmed, non-empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unparsed field values as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawForm {
    pub issue_type: String,
    pub title: String,
    pub labels: String,
    pub root_cause: String,
    pub environment: String,
    pub flows: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub issue_type: IssueType,
    pub title: String,
    pub labels: Vec<String>,
    pub root_cause: Option<String>,
    pub environment: Option<String>,
    pub flows: Vec<String>,
}

impl IssueRequest {
    pub fn new(issue_type: IssueType, title: String) -> Result<Self> {
        let request = Self {
            issue_type,
            title: title.trim().to_string(),
            labels: Vec::new(),
            root_cause: None,
            environment: None,
            flows: Vec::new(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a request from raw form input.
    ///
    /// Labels and flows are comma-split with blank segments dropped. Labels
    /// are deduplicated, flows keep every entry in order.
    pub fn from_form(form: &RawForm) -> Result<Self> {
        let issue_type: IssueType = form.issue_type.parse()?;
        let mut request = Self::new(issue_type, form.title.clone())?
            .with_labels(split_list(&form.labels))
            .with_flows(split_list(&form.flows));
        request.root_cause = non_blank(&form.root_cause);
        request.environment = non_blank(&form.environment);
        Ok(request)
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in labels {
            self.add_label(label.into());
        }
        self
    }

    pub fn with_flows<I, S>(mut self, flows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flows = flows
            .into_iter()
            .map(|f| {
                let flow: String = f.into();
                flow.trim().to_string()
            })
            .collect();
        self
    }

    pub fn with_bug_details(mut self, root_cause: &str, environment: &str) -> Self {
        self.root_cause = non_blank(root_cause);
        self.environment = non_blank(environment);
        self
    }

    /// Add a label, ignoring blanks and duplicates
    pub fn add_label(&mut self, label: String) {
        let label = label.trim();
        if !label.is_empty() && !self.has_label(label) {
            self.labels.push(label.to_string());
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Sub-item components in creation order: the fixed set, then every flow.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        FIXED_COMPONENTS
            .iter()
            .copied()
            .chain(self.flows.iter().map(String::as_str))
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Issue title cannot be empty".to_string()));
        }

        if self.labels.iter().any(|l| l.trim().is_empty()) {
            return Err(Error::Validation("Labels cannot be blank".to_string()));
        }

        if self.flows.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::Validation("Flow names cannot be blank".to_string()));
        }

        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bug_form() -> RawForm {
        RawForm {
            issue_type: "Bug".to_string(),
            title: "Crash on login".to_string(),
            labels: "auth, crash".to_string(),
            root_cause: "null pointer".to_string(),
            environment: "prod".to_string(),
            flows: "login,signup".to_string(),
        }
    }

    #[test]
    fn test_split_list_drops_trailing_comma() {
        assert_eq!(split_list("a, b,"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_list_drops_blank_segments() {
        assert_eq!(split_list(",  x ,, y,"), vec!["x", "y"]);
        assert!(split_list(" , ,").is_empty());
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_issue_type_parse() {
        assert_eq!("Bug".parse::<IssueType>().unwrap(), IssueType::Bug);
        assert_eq!(" story ".parse::<IssueType>().unwrap(), IssueType::Story);
        assert_eq!("EPIC".parse::<IssueType>().unwrap(), IssueType::Epic);

        let err = "Incident".parse::<IssueType>().unwrap_err();
        assert!(matches!(err, Error::InvalidIssueType(ref t) if t == "Incident"));
    }

    #[test]
    fn test_issue_type_cycle() {
        assert_eq!(IssueType::Epic.next(), IssueType::Story);
        assert_eq!(IssueType::Task.next(), IssueType::Epic);
        assert_eq!(IssueType::Epic.previous(), IssueType::Task);
        assert_eq!(IssueType::Bug.previous(), IssueType::Story);
    }

    #[test]
    fn test_from_form() {
        let request = IssueRequest::from_form(&bug_form()).unwrap();
        assert_eq!(request.issue_type, IssueType::Bug);
        assert_eq!(request.title, "Crash on login");
        assert_eq!(request.labels, vec!["auth", "crash"]);
        assert_eq!(request.root_cause.as_deref(), Some("null pointer"));
        assert_eq!(request.environment.as_deref(), Some("prod"));
        assert_eq!(request.flows, vec!["login", "signup"]);
    }

    #[test]
    fn test_from_form_empty_title() {
        let form = RawForm {
            title: "   ".to_string(),
            ..bug_form()
        };
        assert!(matches!(
            IssueRequest::from_form(&form),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_from_form_blank_optional_fields() {
        let form = RawForm {
            issue_type: "Task".to_string(),
            root_cause: "  ".to_string(),
            environment: String::new(),
            ..bug_form()
        };
        let request = IssueRequest::from_form(&form).unwrap();
        assert!(request.root_cause.is_none());
        assert!(request.environment.is_none());
    }

    #[test]
    fn test_labels_deduplicated_flows_kept() {
        let form = RawForm {
            labels: "auth, auth,crash,".to_string(),
            flows: "login, login".to_string(),
            ..bug_form()
        };
        let request = IssueRequest::from_form(&form).unwrap();
        assert_eq!(request.labels, vec!["auth", "crash"]);
        assert_eq!(request.flows, vec!["login", "login"]);
    }

    #[test]
    fn test_components_order() {
        let request = IssueRequest::new(IssueType::Task, "Title".to_string())
            .unwrap()
            .with_flows(["checkout", "search"]);
        let components: Vec<&str> = request.components().collect();
        assert_eq!(components, vec!["Epic", "Story", "Bug", "checkout", "search"]);
    }

    #[test]
    fn test_validate_rejects_blank_flow() {
        let request = IssueRequest::new(IssueType::Story, "Title".to_string())
            .unwrap()
            .with_flows(["ok", " "]);
        assert!(request.validate().is_err());
    }
}
