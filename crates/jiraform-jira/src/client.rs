//! JIRA REST API client

use crate::auth::JiraAuth;
use crate::tracker::{IssueRef, IssueTracker, NewIssue, NewSubtask};
use crate::types::{
    CreateIssueBody, CreateIssueFields, CreatedIssueResponse, JiraErrorResponse, JiraUser,
    KeyRef, NameRef, UpdateIssueBody,
};
use crate::{Error, Result};
use jiraform_core::models::JiraConfig;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;

const API_PREFIX: &str = "/rest/api/2";

pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig, auth: &JiraAuth) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            auth_header: auth.to_basic_auth(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::AUTHORIZATION, &self.auth_header)
            .header(header::ACCEPT, "application/json")
    }

    /// Turn non-2xx responses into errors
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<JiraErrorResponse>(&body)
            .ok()
            .and_then(|e| e.summary())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Auth(format!(
                "{} ({})",
                message,
                status.as_u16()
            ))),
            _ => Err(Error::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::check(self.authorized(request).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_issue(&self, body: &CreateIssueBody) -> Result<IssueRef> {
        let created: CreatedIssueResponse = self
            .send_json(self.http.post(self.url("/issue")).json(body))
            .await?;
        Ok(IssueRef { key: created.key })
    }

    /// Fetch the authenticated user, useful to check credentials up front
    pub async fn verify_credentials(&self) -> Result<JiraUser> {
        tracing::debug!("Verifying JIRA credentials against {}", self.base_url);
        self.send_json(self.http.get(self.url("/myself"))).await
    }
}

impl IssueTracker for JiraClient {
    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueRef> {
        let body = CreateIssueBody {
            fields: CreateIssueFields {
                project: KeyRef {
                    key: issue.project_key.clone(),
                },
                summary: issue.summary.clone(),
                issue_type: NameRef {
                    name: issue.issue_type.clone(),
                },
                labels: Some(issue.labels.clone()),
                parent: None,
            },
        };
        self.post_issue(&body).await
    }

    async fn update_issue(&self, key: &str, fields: &Map<String, Value>) -> Result<()> {
        let body = UpdateIssueBody {
            fields: fields.clone(),
        };
        let request = self
            .http
            .put(self.url(&format!("/issue/{}", key)))
            .json(&body);
        Self::check(self.authorized(request).send().await?).await?;
        Ok(())
    }

    async fn create_subtask(&self, subtask: &NewSubtask) -> Result<IssueRef> {
        let body = CreateIssueBody {
            fields: CreateIssueFields {
                project: KeyRef {
                    key: subtask.project_key.clone(),
                },
                summary: subtask.component.clone(),
                issue_type: NameRef {
                    name: subtask.issue_type.clone(),
                },
                labels: None,
                parent: Some(KeyRef {
                    key: subtask.parent_key.clone(),
                }),
            },
        };
        self.post_issue(&body).await
    }
}
