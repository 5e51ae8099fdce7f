use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Timed out waiting for job {job_id} after {elapsed_secs}s")]
    Timeout { job_id: String, elapsed_secs: u64 },

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::ProtocolError(msg.into())
    }

    pub fn job_failed(job_id: impl Into<String>) -> Self {
        Self::JobFailed(job_id.into())
    }

    pub fn timeout(job_id: impl Into<String>, elapsed_secs: u64) -> Self {
        Self::Timeout {
            job_id: job_id.into(),
            elapsed_secs,
        }
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::ProtocolError(_))
    }

    pub fn is_job_failed(&self) -> bool {
        matches!(self, Self::JobFailed(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}
