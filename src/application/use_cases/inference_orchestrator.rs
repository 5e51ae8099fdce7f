use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::InferenceEndpoint;
use crate::domain::{
    extract_reply, DomainError, JobId, JobStatus, OutputEntry, PollPolicy, StatusReport,
};

/// Drives one message through the remote job lifecycle:
/// submit, poll at a fixed interval until terminal, extract the reply.
///
/// Polling stops on `COMPLETED` or `FAILED`, when the policy's timeout has
/// elapsed, or when the caller's cancellation token fires. Every other status
/// value, known or not, means one more interval wait.
pub struct InferenceOrchestrator {
    endpoint: Arc<dyn InferenceEndpoint>,
    policy: PollPolicy,
}

impl InferenceOrchestrator {
    pub fn new(endpoint: Arc<dyn InferenceEndpoint>) -> Self {
        Self {
            endpoint,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    pub async fn submit(&self, text: &str) -> Result<JobId, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::invalid_input("message text is empty"));
        }

        let job_id = self.endpoint.submit(text).await?;
        debug!("Submitted inference job {}", job_id);
        Ok(job_id)
    }

    pub async fn poll_once(&self, job_id: &JobId) -> Result<StatusReport, DomainError> {
        self.endpoint.poll_once(job_id).await
    }

    /// Polls `job_id` until it settles and returns the completed output list.
    pub async fn await_completion(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<Vec<OutputEntry>, DomainError> {
        let started = Instant::now();
        let mut polls: u64 = 0;

        loop {
            let report = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(DomainError::cancelled(format!("polling job {}", job_id)));
                }
                report = self.poll_once(job_id) => report?,
            };
            polls += 1;

            let status = report.status().clone();
            match status {
                JobStatus::Completed => {
                    debug!("Job {} completed after {} poll(s)", job_id, polls);
                    return report.into_output().ok_or_else(|| {
                        DomainError::protocol(format!(
                            "job {} completed without an output list",
                            job_id
                        ))
                    });
                }
                JobStatus::Failed => {
                    return Err(DomainError::job_failed(job_id.as_str()));
                }
                JobStatus::Pending(raw) => {
                    debug!("Job {} pending (status {:?}, poll #{})", job_id, raw, polls);
                }
            }

            if let Some(timeout) = self.policy.timeout() {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    return Err(DomainError::timeout(job_id.as_str(), elapsed.as_secs()));
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(DomainError::cancelled(format!("polling job {}", job_id)));
                }
                _ = tokio::time::sleep(self.policy.interval()) => {}
            }
        }
    }

    /// Submits `text`, waits for the job and returns the assistant reply.
    pub async fn run(&self, text: &str, cancel: &CancellationToken) -> Result<String, DomainError> {
        let job_id = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(DomainError::cancelled("submitting message"));
            }
            job_id = self.submit(text) => job_id?,
        };

        let output = self.await_completion(&job_id, cancel).await?;
        Ok(extract_reply(&output))
    }
}
