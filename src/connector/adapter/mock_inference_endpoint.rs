use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::InferenceEndpoint;
use crate::domain::{DomainError, JobId, OutputEntry, StatusReport};

enum Behaviour {
    /// Every submission gets `job_id`; polls replay `script`, repeating the
    /// last report once it is exhausted.
    Scripted {
        job_id: String,
        script: Mutex<VecDeque<StatusReport>>,
        last: Mutex<Option<StatusReport>>,
    },
    /// Each job reports `IN_PROGRESS` `pending_polls` times, then completes
    /// with the submitted text echoed back.
    Echo {
        pending_polls: usize,
        jobs: Mutex<HashMap<String, (String, usize)>>,
    },
    /// Every call fails with a transport error.
    Unreachable(String),
}

/// In-process [`InferenceEndpoint`] for tests and offline use.
pub struct MockInferenceEndpoint {
    behaviour: Behaviour,
    submissions: Mutex<Vec<String>>,
    polls: AtomicUsize,
}

impl MockInferenceEndpoint {
    pub fn scripted(job_id: impl Into<String>, script: Vec<StatusReport>) -> Self {
        Self::with_behaviour(Behaviour::Scripted {
            job_id: job_id.into(),
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
        })
    }

    pub fn echo(pending_polls: usize) -> Self {
        Self::with_behaviour(Behaviour::Echo {
            pending_polls,
            jobs: Mutex::new(HashMap::new()),
        })
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::with_behaviour(Behaviour::Unreachable(reason.into()))
    }

    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            submissions: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        }
    }

    /// Texts received by `submit`, in order.
    pub fn submissions(&self) -> Vec<String> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    fn lock_err<T>(_: T) -> DomainError {
        DomainError::internal("MockInferenceEndpoint: lock poisoned")
    }
}

#[async_trait]
impl InferenceEndpoint for MockInferenceEndpoint {
    async fn submit(&self, text: &str) -> Result<JobId, DomainError> {
        let job_id = match &self.behaviour {
            Behaviour::Unreachable(reason) => {
                return Err(DomainError::transport(format!(
                    "MockInferenceEndpoint: {reason}"
                )));
            }
            Behaviour::Scripted { job_id, .. } => job_id.clone(),
            Behaviour::Echo { jobs, .. } => {
                let mut jobs = jobs.lock().map_err(Self::lock_err)?;
                let id = format!("echo-{}", jobs.len() + 1);
                jobs.insert(id.clone(), (text.to_string(), 0));
                id
            }
        };

        self.submissions
            .lock()
            .map_err(Self::lock_err)?
            .push(text.to_string());

        debug!("MockInferenceEndpoint: accepted job {job_id}");
        Ok(JobId::new(job_id))
    }

    async fn poll_once(&self, job_id: &JobId) -> Result<StatusReport, DomainError> {
        self.polls.fetch_add(1, Ordering::SeqCst);

        match &self.behaviour {
            Behaviour::Scripted { script, last, .. } => {
                let mut last = last.lock().map_err(Self::lock_err)?;
                if let Some(next) = script.lock().map_err(Self::lock_err)?.pop_front() {
                    *last = Some(next);
                }
                last.clone().ok_or_else(|| {
                    DomainError::internal("MockInferenceEndpoint: empty status script")
                })
            }
            Behaviour::Echo {
                pending_polls,
                jobs,
            } => {
                let mut jobs = jobs.lock().map_err(Self::lock_err)?;
                let (text, seen) = jobs.get_mut(job_id.as_str()).ok_or_else(|| {
                    DomainError::transport(format!("MockInferenceEndpoint: unknown job {job_id}"))
                })?;
                if *seen < *pending_polls {
                    *seen += 1;
                    return Ok(StatusReport::pending("IN_PROGRESS"));
                }
                Ok(StatusReport::completed(vec![
                    OutputEntry::new("user", text.clone()),
                    OutputEntry::assistant(format!("echo: {text}")),
                ]))
            }
            Behaviour::Unreachable(reason) => Err(DomainError::transport(format!(
                "MockInferenceEndpoint: {reason}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobStatus;

    #[tokio::test]
    async fn scripted_repeats_last_report() {
        let endpoint =
            MockInferenceEndpoint::scripted("x", vec![StatusReport::pending("IN_QUEUE")]);
        let job = endpoint.submit("hi").await.unwrap();
        assert_eq!(job.as_str(), "x");

        for _ in 0..3 {
            let report = endpoint.poll_once(&job).await.unwrap();
            assert_eq!(report.status(), &JobStatus::Pending("IN_QUEUE".to_string()));
        }
        assert_eq!(endpoint.poll_count(), 3);
    }

    #[tokio::test]
    async fn echo_completes_after_pending_polls() {
        let endpoint = MockInferenceEndpoint::echo(1);
        let job = endpoint.submit("ping").await.unwrap();

        let first = endpoint.poll_once(&job).await.unwrap();
        assert!(!first.status().is_terminal());

        let second = endpoint.poll_once(&job).await.unwrap();
        assert_eq!(second.status(), &JobStatus::Completed);
        assert_eq!(
            second.output().unwrap().last(),
            Some(&OutputEntry::assistant("echo: ping"))
        );
    }

    #[tokio::test]
    async fn echo_rejects_unknown_jobs() {
        let endpoint = MockInferenceEndpoint::echo(0);
        let err = endpoint.poll_once(&JobId::new("nope")).await.unwrap_err();
        assert!(err.is_transport_error());
    }
}
