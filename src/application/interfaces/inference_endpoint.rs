use async_trait::async_trait;

use crate::domain::{DomainError, JobId, StatusReport};

/// A job-based inference service: text goes in as a job, the job is polled
/// until it settles.
///
/// Implementors encapsulate transport, serialization, and authentication.
/// The orchestrator only sees job ids and status reports.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    /// Submit `text` as a new job and return the id the service assigned.
    async fn submit(&self, text: &str) -> Result<JobId, DomainError>;

    /// Fetch the current status of a job once. No retries.
    async fn poll_once(&self, job_id: &JobId) -> Result<StatusReport, DomainError>;
}
