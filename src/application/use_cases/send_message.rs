use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::InferenceOrchestrator;
use crate::domain::{ChatMessage, Conversation, FAILURE_REPLY};

/// Use case for sending one user message and recording the bot's reply.
///
/// The user message is appended before anything is awaited. Whatever happens
/// afterwards, exactly one bot message is appended for it: the extracted
/// reply, or the generic failure reply.
pub struct SendMessageUseCase {
    orchestrator: Arc<InferenceOrchestrator>,
}

impl SendMessageUseCase {
    pub fn new(orchestrator: Arc<InferenceOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Returns the bot message appended for `input`, or `None` when the input
    /// was blank and nothing was sent.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        input: &str,
        cancel: &CancellationToken,
    ) -> Option<ChatMessage> {
        let submission = match conversation.begin_submission(input) {
            Some(submission) => submission,
            None => {
                debug!("Ignoring blank input");
                return None;
            }
        };

        let reply = match self.orchestrator.run(input, cancel).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Message #{} failed: {}", submission, e);
                FAILURE_REPLY.to_string()
            }
        };

        Some(conversation.record_reply(submission, reply).clone())
    }
}
