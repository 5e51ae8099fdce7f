use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::InferenceEndpoint;
use crate::domain::{DomainError, JobId, JobStatus, OutputEntry, StatusReport};

/// Default target: the hosted serverless endpoint the client was built for.
pub const DEFAULT_BASE_URL: &str = "https://api.runpod.ai/v2/iwb8t4joxdek0e";
const RUN_PATH: &str = "/run";
const STATUS_PATH: &str = "/status";
/// Bounds a single HTTP exchange; the poll loop has its own timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct RunRequest<'a> {
    input: RunInput<'a>,
}

#[derive(Serialize)]
struct RunInput<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct RunResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    status: Option<String>,
    /// Shape is only trusted once the job is `COMPLETED`.
    #[serde(default)]
    output: Option<serde_json::Value>,
}

/// HTTP client for a job-based inference endpoint.
///
/// `POST {base}/run` with `{"input": {"text": ...}}` creates a job,
/// `GET {base}/status/{id}` reports on it. Both carry the static bearer token.
///
/// Configuration comes from the environment:
///
/// | Variable           | Default                                     |
/// |--------------------|---------------------------------------------|
/// | `JOBCHAT_BASE_URL` | `https://api.runpod.ai/v2/iwb8t4joxdek0e`   |
/// | `JOBCHAT_API_KEY`  | `""` (empty)                                |
pub struct HttpInferenceEndpoint {
    client: reqwest::Client,
    api_key: String,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl HttpInferenceEndpoint {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_with_base_url(Self::configured_base_url())
    }

    /// Like [`Self::from_env`] but with an explicit base URL; the token still
    /// comes from `JOBCHAT_API_KEY`.
    pub fn from_env_with_base_url(base_url: impl Into<String>) -> Self {
        let key = std::env::var("JOBCHAT_API_KEY").unwrap_or_default();
        Self::new(key, base_url)
    }

    /// Return the configured base URL (for logging purposes).
    pub fn configured_base_url() -> String {
        std::env::var("JOBCHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn run_url(&self) -> String {
        format!("{}{}", self.base_url, RUN_PATH)
    }

    fn status_url(&self, job_id: &JobId) -> String {
        format!("{}{}/{}", self.base_url, STATUS_PATH, job_id)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("HttpInferenceEndpoint: endpoint returned {status}: {body}");
        Err(DomainError::transport(format!(
            "HttpInferenceEndpoint: endpoint returned {status}"
        )))
    }
}

#[async_trait]
impl InferenceEndpoint for HttpInferenceEndpoint {
    async fn submit(&self, text: &str) -> Result<JobId, DomainError> {
        let request = RunRequest {
            input: RunInput { text },
        };

        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::transport(format!("HttpInferenceEndpoint: submit failed: {e}"))
            })?;
        let response = Self::check_status(response).await?;

        let run: RunResponse = response.json().await.map_err(|e| {
            DomainError::protocol(format!(
                "HttpInferenceEndpoint: failed to parse run response: {e}"
            ))
        })?;

        match run.id {
            Some(id) if !id.is_empty() => Ok(JobId::new(id)),
            _ => Err(DomainError::protocol(
                "HttpInferenceEndpoint: run response has no job id",
            )),
        }
    }

    async fn poll_once(&self, job_id: &JobId) -> Result<StatusReport, DomainError> {
        let response = self
            .client
            .get(self.status_url(job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                DomainError::transport(format!("HttpInferenceEndpoint: poll failed: {e}"))
            })?;
        let response = Self::check_status(response).await?;

        let body: StatusResponse = response.json().await.map_err(|e| {
            DomainError::protocol(format!(
                "HttpInferenceEndpoint: failed to parse status response: {e}"
            ))
        })?;

        let raw = body.status.unwrap_or_default();
        debug!("HttpInferenceEndpoint: job {job_id} status {raw:?}");

        let status = JobStatus::from_raw(&raw);
        let output = match status {
            JobStatus::Completed => body.output.as_ref().and_then(OutputEntry::list_from_json),
            _ => None,
        };
        Ok(StatusReport::new(status, output))
    }
}
