//! Background workflow client.
//!
//! Workflows run outside the request cycle. A trigger hands the workflow
//! service a destination URL and a JSON body; the service then calls that
//! URL, retrying on its own schedule.

use serde_json::Value;
use uuid::Uuid;

use crate::config::Config;

/// Workflow client errors.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The request could not be sent.
    #[error("Workflow request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The workflow service answered with a non-success status.
    #[error("Workflow service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// A workflow run to start.
#[derive(Debug, Clone)]
pub struct WorkflowTrigger {
    /// Endpoint that runs the workflow steps.
    pub url: String,
    /// JSON payload handed to the first step.
    pub body: Value,
    /// Retry count for each step, if not the service default.
    pub retries: Option<u32>,
    /// Run ID, generated when absent.
    pub workflow_run_id: Option<String>,
}

impl WorkflowTrigger {
    /// Creates a trigger for `url` with `body`.
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            body,
            retries: None,
            workflow_run_id: None,
        }
    }

    /// Sets the retry count.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }
}

/// A started workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub workflow_run_id: String,
}

/// Handle for the workflow service, built once from configuration.
#[derive(Debug, Clone)]
pub struct WorkflowClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl WorkflowClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Creates a client if the workflow service is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .workflow_endpoint()
            .map(|(url, token)| Self::new(url, token))
    }

    /// Returns the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a workflow run.
    pub async fn trigger(&self, trigger: WorkflowTrigger) -> Result<WorkflowRun, WorkflowError> {
        let workflow_run_id = trigger
            .workflow_run_id
            .unwrap_or_else(|| format!("wfr_{}", Uuid::new_v4()));
        let endpoint = format!("{}/v2/trigger/{}", self.base_url, trigger.url);

        let mut request = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .header("Upstash-Workflow-RunId", &workflow_run_id)
            .header("Upstash-Workflow-Init", "true")
            .json(&trigger.body);
        if let Some(retries) = trigger.retries {
            request = request.header("Upstash-Retries", retries.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                url = %trigger.url,
                "Workflow trigger rejected"
            );
            return Err(rejected(status.as_u16(), response.text().await));
        }

        tracing::info!(
            workflow_run_id = %workflow_run_id,
            url = %trigger.url,
            "Workflow triggered"
        );

        Ok(WorkflowRun { workflow_run_id })
    }
}

/// Builds the error for a non-success answer, keeping a body read failure
/// visible in place of the body.
fn rejected(status: u16, body: reqwest::Result<String>) -> WorkflowError {
    let body = body.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read workflow error body");
        format!("<unreadable body: {}>", e)
    });
    WorkflowError::Status { status, body }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Bytes,
        http::{HeaderMap, StatusCode, Uri},
        Router,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        headers: HeaderMap,
        body: Bytes,
    }

    /// Starts a loopback workflow service answering with `status`.
    async fn fake_service(status: StatusCode) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(Captured {
                    path: uri.path().to_string(),
                    headers,
                    body,
                });
                (status, r#"{"messageId":"msg_1"}"#)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    #[tokio::test]
    async fn test_trigger_posts_to_workflow_service() {
        let (base_url, captured) = fake_service(StatusCode::CREATED).await;
        let client = WorkflowClient::new(format!("{}/", base_url), "qstash-token");

        let run = client
            .trigger(
                WorkflowTrigger::new(
                    "https://library.example.com/api/workflows/welcome",
                    serde_json::json!({ "email": "a@x.com" }),
                )
                .with_retries(3),
            )
            .await
            .unwrap();

        assert!(run.workflow_run_id.starts_with("wfr_"));

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.path.starts_with("/v2/trigger/"));
        assert!(request.path.ends_with("/api/workflows/welcome"));
        assert_eq!(request.headers["authorization"], "Bearer qstash-token");
        assert_eq!(request.headers["upstash-retries"], "3");
        assert_eq!(
            request.headers["upstash-workflow-runid"],
            run.workflow_run_id.as_str()
        );

        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_rejected_trigger_is_an_error() {
        let (base_url, _captured) = fake_service(StatusCode::UNAUTHORIZED).await;
        let client = WorkflowClient::new(base_url, "wrong-token");

        let err = client
            .trigger(WorkflowTrigger::new(
                "https://library.example.com/api/workflows/welcome",
                serde_json::json!({}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_unreadable_error_body_is_reported() {
        let read_error = reqwest::Client::new()
            .get("not a url")
            .send()
            .await
            .unwrap_err();

        let err = rejected(502, Err(read_error));

        match err {
            WorkflowError::Status { status, body } => {
                assert_eq!(status, 502);
                assert!(body.starts_with("<unreadable body: "));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        assert!(WorkflowClient::from_config(&config).is_none());

        config.qstash_url = Some("https://qstash.example.com/".to_string());
        config.qstash_token = Some("token".to_string());
        let client = WorkflowClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://qstash.example.com");
    }
}
