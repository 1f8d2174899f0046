use jiraform_core::models::{Config, IssueRequest, IssueType};
use jiraform_jira::{
    Error, IssueTracker, IssueWorkflow, JiraAuth, JiraClient, NewIssue, NewSubtask, WorkflowError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH_HEADER: &str = "Basic amRvZTpzZWNyZXQ="; // jdoe:secret

fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.jira.server_url = format!("{}/", server.uri());
    config.jira.username = "jdoe".to_string();
    config.jira.project_key = "PROJ".to_string();
    config.jira.timeout_secs = 5;
    config
}

fn test_client(config: &Config) -> JiraClient {
    let auth = JiraAuth::new("jdoe".to_string(), "secret".to_string());
    JiraClient::new(&config.jira, &auth).unwrap()
}

fn created(key: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "id": "10000",
        "key": key,
        "self": format!("https://jira.example.com/rest/api/2/issue/{}", key),
    }))
}

async fn mount_subtask(server: &MockServer, summary: &str, key: &str) {
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .and(body_partial_json(json!({
            "fields": {
                "summary": summary,
                "parent": { "key": "PROJ-1" },
                "issuetype": { "name": "Sub-task" }
            }
        })))
        .respond_with(created(key))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_issue_request_shape() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .and(header("authorization", AUTH_HEADER))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({
            "fields": {
                "project": { "key": "PROJ" },
                "summary": "Crash on login",
                "issuetype": { "name": "Bug" },
                "labels": ["auth", "crash"]
            }
        })))
        .respond_with(created("PROJ-1"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&config);
    let issue = client
        .create_issue(&NewIssue {
            project_key: "PROJ".to_string(),
            summary: "Crash on login".to_string(),
            issue_type: "Bug".to_string(),
            labels: vec!["auth".to_string(), "crash".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(issue.key, "PROJ-1");
}

#[tokio::test]
async fn test_create_subtask_request_shape() {
    let server = MockServer::start().await;
    let config = test_config(&server);
    mount_subtask(&server, "login", "PROJ-9").await;

    let client = test_client(&config);
    let subtask = client
        .create_subtask(&NewSubtask {
            project_key: "PROJ".to_string(),
            parent_key: "PROJ-1".to_string(),
            component: "login".to_string(),
            issue_type: "Sub-task".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(subtask.key, "PROJ-9");
}

#[tokio::test]
async fn test_update_issue_accepts_no_content() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("PUT"))
        .and(path("/rest/api/2/issue/PROJ-1"))
        .and(body_partial_json(json!({
            "fields": { "customfield_123": "null pointer" }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&config);
    let mut fields = serde_json::Map::new();
    fields.insert("customfield_123".to_string(), json!("null pointer"));
    client.update_issue("PROJ-1", &fields).await.unwrap();
}

#[tokio::test]
async fn test_api_error_message_from_body() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": [],
            "errors": { "issuetype": "valid issue type is required" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&config);
    let err = client
        .create_issue(&NewIssue {
            project_key: "PROJ".to_string(),
            summary: "Title".to_string(),
            issue_type: "Nope".to_string(),
            labels: vec![],
        })
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "issuetype: valid issue type is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let client = test_client(&config);
    let err = client.verify_credentials().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn test_verify_credentials() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("GET"))
        .and(path("/rest/api/2/myself"))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "jdoe",
            "displayName": "Jane Doe",
            "emailAddress": "jdoe@example.com"
        })))
        .mount(&server)
        .await;

    let client = test_client(&config);
    let user = client.verify_credentials().await.unwrap();
    assert_eq!(user.display_name, "Jane Doe");
    assert_eq!(user.name.as_deref(), Some("jdoe"));
}

#[tokio::test]
async fn test_bug_workflow_against_server() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .and(body_partial_json(json!({
            "fields": { "issuetype": { "name": "Bug" } }
        })))
        .respond_with(created("PROJ-1"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/rest/api/2/issue/PROJ-1"))
        .and(body_partial_json(json!({
            "fields": {
                "customfield_123": "null pointer",
                "customfield_456": "prod"
            }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    for (summary, key) in [
        ("Epic", "PROJ-2"),
        ("Story", "PROJ-3"),
        ("Bug", "PROJ-4"),
        ("login", "PROJ-5"),
        ("signup", "PROJ-6"),
    ] {
        mount_subtask(&server, summary, key).await;
    }

    let workflow = IssueWorkflow::new(test_client(&config), config);
    let request = IssueRequest::new(IssueType::Bug, "Crash on login".to_string())
        .unwrap()
        .with_labels(["auth", "crash"])
        .with_bug_details("null pointer", "prod")
        .with_flows(["login", "signup"]);

    let report = workflow.create_issue(&request).await.unwrap();
    assert_eq!(report.issue.key, "PROJ-1");
    assert_eq!(
        report.subtask_keys(),
        vec!["PROJ-2", "PROJ-3", "PROJ-4", "PROJ-5", "PROJ-6"]
    );
    assert_eq!(
        report.components(),
        vec!["Epic", "Story", "Bug", "login", "signup"]
    );
}

#[tokio::test]
async fn test_workflow_stops_when_parent_rejected() {
    let server = MockServer::start().await;
    let config = test_config(&server);

    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = IssueWorkflow::new(test_client(&config), config);
    let request = IssueRequest::new(IssueType::Task, "Title".to_string())
        .unwrap()
        .with_flows(["login"]);

    let err = workflow.create_issue(&request).await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::RemoteCreateFailed(Error::Api { status: 500, .. })
    ));
}
