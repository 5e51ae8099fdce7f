use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::debug;

use crate::application::{InferenceEndpoint, InferenceOrchestrator, SendMessageUseCase};
use crate::connector::{HttpInferenceEndpoint, MockInferenceEndpoint};
use crate::domain::PollPolicy;

/// Polls the echo endpoint reports as pending before completing.
const MOCK_PENDING_POLLS: usize = 2;

pub struct ContainerConfig {
    /// Overrides `JOBCHAT_BASE_URL` when set.
    pub base_url: Option<String>,
    /// Answer locally with the echo endpoint instead of calling the network.
    pub mock: bool,
    pub poll_interval: Duration,
    /// `None` polls until the job settles or the message is cancelled.
    pub timeout: Option<Duration>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            base_url: None,
            mock: false,
            poll_interval: policy.interval(),
            timeout: policy.timeout(),
        }
    }
}

pub struct Container {
    orchestrator: Arc<InferenceOrchestrator>,
    endpoint_label: String,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        if config.poll_interval.is_zero() {
            bail!("poll interval must be greater than zero");
        }

        let (endpoint, endpoint_label): (Arc<dyn InferenceEndpoint>, String) = if config.mock {
            debug!("Using mock echo endpoint");
            let endpoint = MockInferenceEndpoint::echo(MOCK_PENDING_POLLS);
            (
                Arc::new(endpoint) as Arc<dyn InferenceEndpoint>,
                "mock echo endpoint".to_string(),
            )
        } else {
            let endpoint = match config.base_url.as_deref() {
                Some(base_url) => HttpInferenceEndpoint::from_env_with_base_url(base_url),
                None => HttpInferenceEndpoint::from_env(),
            };
            let label = endpoint.base_url().to_string();
            debug!("Using inference endpoint at {}", label);
            (Arc::new(endpoint) as Arc<dyn InferenceEndpoint>, label)
        };

        let policy = PollPolicy::new(config.poll_interval, config.timeout);
        let orchestrator = Arc::new(InferenceOrchestrator::new(endpoint).with_policy(policy));

        Ok(Self {
            orchestrator,
            endpoint_label,
        })
    }

    pub fn send_message_use_case(&self) -> SendMessageUseCase {
        SendMessageUseCase::new(self.orchestrator.clone())
    }

    pub fn orchestrator(&self) -> Arc<InferenceOrchestrator> {
        self.orchestrator.clone()
    }

    pub fn endpoint_label(&self) -> &str {
        &self.endpoint_label
    }
}
