pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{InferenceEndpoint, InferenceOrchestrator, SendMessageUseCase};

pub use cli::{Commands, OutputFormat};

pub use connector::{HttpInferenceEndpoint, MockInferenceEndpoint, DEFAULT_BASE_URL};

pub use domain::{
    extract_reply, ChatMessage, Conversation, DomainError, JobId, JobStatus, OutputEntry,
    PollPolicy, Sender, StatusReport, FAILURE_REPLY, NO_REPLY_FALLBACK,
};
