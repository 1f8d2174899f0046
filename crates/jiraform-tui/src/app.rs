//! Form state and key handling

use crossterm::event::{KeyCode, KeyModifiers};
use jiraform_core::models::{Config, CreationReport, IssueRequest, IssueType, RawForm};
use jiraform_jira::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    IssueType,
    Title,
    Labels,
    RootCause,
    Environment,
    Flows,
    Submit,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::IssueType,
        Self::Title,
        Self::Labels,
        Self::RootCause,
        Self::Environment,
        Self::Flows,
        Self::Submit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::IssueType => "Type",
            FormField::Title => "Title",
            FormField::Labels => "Labels (comma separated)",
            FormField::RootCause => "Root cause",
            FormField::Environment => "Environment",
            FormField::Flows => "Flows (comma separated)",
            FormField::Submit => "Submit",
        }
    }

    /// Only bugs carry root cause and environment
    pub fn is_bug_only(&self) -> bool {
        matches!(self, FormField::RootCause | FormField::Environment)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Quit,
}

#[derive(Debug)]
pub enum Outcome {
    Created(CreationReport),
    Failed {
        message: String,
        issue_key: Option<String>,
        partial: Option<CreationReport>,
    },
}

pub struct App {
    pub project_key: String,
    pub server_url: String,
    pub issue_type: IssueType,
    pub title: String,
    pub labels: String,
    pub root_cause: String,
    pub environment: String,
    pub flows: String,
    pub focused: FormField,
    pub status_message: String,
    pub outcome: Option<Outcome>,
    /// Reports created during this session, printed on exit
    pub created: Vec<CreationReport>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            project_key: config.jira.project_key.clone(),
            server_url: config.jira.server_url.clone(),
            issue_type: IssueType::Story,
            title: String::new(),
            labels: String::new(),
            root_cause: String::new(),
            environment: String::new(),
            flows: String::new(),
            focused: FormField::Title,
            status_message: String::new(),
            outcome: None,
            created: Vec::new(),
            should_quit: false,
        }
    }

    pub fn is_enabled(&self, field: FormField) -> bool {
        !field.is_bug_only() || self.issue_type.has_bug_fields()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::IssueType => self.issue_type.as_str(),
            FormField::Title => &self.title,
            FormField::Labels => &self.labels,
            FormField::RootCause => &self.root_cause,
            FormField::Environment => &self.environment,
            FormField::Flows => &self.flows,
            FormField::Submit => "",
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Labels => Some(&mut self.labels),
            FormField::RootCause => Some(&mut self.root_cause),
            FormField::Environment => Some(&mut self.environment),
            FormField::Flows => Some(&mut self.flows),
            FormField::IssueType | FormField::Submit => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(FormField::ALL.len() - 1);
    }

    fn move_focus(&mut self, step: usize) {
        let len = FormField::ALL.len();
        let mut idx = self.focused.index();
        loop {
            idx = (idx + step) % len;
            if self.is_enabled(FormField::ALL[idx]) {
                break;
            }
        }
        self.focused = FormField::ALL[idx];
    }

    pub fn raw_form(&self) -> RawForm {
        RawForm {
            issue_type: self.issue_type.as_str().to_string(),
            title: self.title.clone(),
            labels: self.labels.clone(),
            root_cause: self.root_cause.clone(),
            environment: self.environment.clone(),
            flows: self.flows.clone(),
        }
    }

    pub fn build_request(&self) -> jiraform_core::Result<IssueRequest> {
        IssueRequest::from_form(&self.raw_form())
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        if self.outcome.is_none() {
            self.status_message.clear();
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('s') if self.outcome.is_none() => Action::Submit,
                _ => Action::None,
            };
        }

        if self.outcome.is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                self.dismiss_outcome();
            }
            return Action::None;
        }

        match code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                Action::None
            }
            KeyCode::Enter => {
                if self.focused == FormField::Submit {
                    Action::Submit
                } else {
                    self.focus_next();
                    Action::None
                }
            }
            KeyCode::Left if self.focused == FormField::IssueType => {
                self.issue_type = self.issue_type.previous();
                Action::None
            }
            KeyCode::Right | KeyCode::Char(' ') if self.focused == FormField::IssueType => {
                self.issue_type = self.issue_type.next();
                Action::None
            }
            KeyCode::Char(c) => {
                let focused = self.focused;
                if let Some(value) = self.value_mut(focused) {
                    value.push(c);
                }
                Action::None
            }
            KeyCode::Backspace => {
                let focused = self.focused;
                if let Some(value) = self.value_mut(focused) {
                    value.pop();
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn record_result(&mut self, result: Result<CreationReport, WorkflowError>) {
        match result {
            Ok(report) => {
                tracing::info!(
                    key = %report.issue.key,
                    subtasks = report.subtasks.len(),
                    "Issue created"
                );
                self.status_message = format!("Created {}", report.issue.key);
                self.created.push(report.clone());
                self.outcome = Some(Outcome::Created(report));
            }
            Err(err) => {
                tracing::error!(step = err.step(), "Issue creation failed: {}", err);
                let issue_key = err.created_issue().map(|i| i.key.clone());
                let partial = err.partial_report().cloned();
                self.status_message = match &issue_key {
                    Some(key) => format!("{} created with errors", key),
                    None => "Issue was not created".to_string(),
                };
                self.outcome = Some(Outcome::Failed {
                    message: err.to_string(),
                    issue_key,
                    partial,
                });
            }
        }
    }

    /// Close the result modal, clearing the form after a success
    pub fn dismiss_outcome(&mut self) {
        if let Some(Outcome::Created(_)) = self.outcome.take() {
            self.reset_form();
        }
    }

    pub fn reset_form(&mut self) {
        self.title.clear();
        self.labels.clear();
        self.root_cause.clear();
        self.environment.clear();
        self.flows.clear();
        self.focused = FormField::Title;
    }
}
