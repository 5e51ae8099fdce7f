use serde::{Deserialize, Serialize};

use super::ChatMessage;

/// The in-memory message list of one chat session.
///
/// Messages are only ever appended. Each accepted user input opens a new
/// submission; the reply for it is recorded later against the same number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    next_submission: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message for `input` and returns its submission number.
    ///
    /// Whitespace-only input is ignored and yields `None`.
    pub fn begin_submission(&mut self, input: &str) -> Option<u64> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let submission = self.next_submission;
        self.next_submission += 1;
        self.messages.push(ChatMessage::user(submission, text));
        Some(submission)
    }

    /// Appends the bot reply for a previously opened submission.
    pub fn record_reply(&mut self, submission: u64, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::bot(submission, text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Submissions that have a user message but no reply yet.
    pub fn pending_submissions(&self) -> Vec<u64> {
        self.messages
            .iter()
            .filter(|m| m.is_from_user())
            .map(|m| m.submission())
            .filter(|s| {
                !self
                    .messages
                    .iter()
                    .any(|m| m.is_from_bot() && m.submission() == *s)
            })
            .collect()
    }

    /// The transcript grouped by submission, each user message followed by its
    /// reply, independent of the order replies were recorded in.
    pub fn ordered_by_submission(&self) -> Vec<&ChatMessage> {
        let mut ordered: Vec<&ChatMessage> = self.messages.iter().collect();
        // Stable sort keeps the user message ahead of its reply.
        ordered.sort_by_key(|m| (m.submission(), m.is_from_bot()));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sender;

    #[test]
    fn whitespace_input_is_ignored() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.begin_submission("   \t\n"), None);
        assert_eq!(conversation.begin_submission(""), None);
        assert!(conversation.is_empty());
    }

    #[test]
    fn submissions_are_numbered_in_order() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.begin_submission("first"), Some(0));
        assert_eq!(conversation.begin_submission("  second  "), Some(1));

        let texts: Vec<_> = conversation.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(conversation
            .messages()
            .iter()
            .all(|m| m.sender() == Sender::User));
    }

    #[test]
    fn pending_tracks_unanswered_submissions() {
        let mut conversation = Conversation::new();
        let a = conversation.begin_submission("a").unwrap();
        let b = conversation.begin_submission("b").unwrap();
        assert_eq!(conversation.pending_submissions(), vec![a, b]);

        conversation.record_reply(b, "reply b");
        assert_eq!(conversation.pending_submissions(), vec![a]);
    }

    #[test]
    fn ordered_by_submission_pairs_out_of_order_replies() {
        let mut conversation = Conversation::new();
        let a = conversation.begin_submission("a").unwrap();
        let b = conversation.begin_submission("b").unwrap();
        conversation.record_reply(b, "reply b");
        conversation.record_reply(a, "reply a");

        // Raw order follows completion order.
        let raw: Vec<_> = conversation.messages().iter().map(|m| m.text()).collect();
        assert_eq!(raw, vec!["a", "b", "reply b", "reply a"]);

        let ordered: Vec<_> = conversation
            .ordered_by_submission()
            .into_iter()
            .map(|m| m.text())
            .collect();
        assert_eq!(ordered, vec!["a", "reply a", "b", "reply b"]);
    }
}
