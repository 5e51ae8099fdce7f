use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable entry of the conversation.
///
/// `submission` is the sequence number of the user message this entry belongs
/// to. A bot reply carries the number of the user message it answers, so the
/// pairing survives replies arriving out of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: String,
    submission: u64,
    text: String,
    sender: Sender,
}

impl ChatMessage {
    pub fn user(submission: u64, text: impl Into<String>) -> Self {
        Self::new(submission, text, Sender::User)
    }

    pub fn bot(submission: u64, text: impl Into<String>) -> Self {
        Self::new(submission, text, Sender::Bot)
    }

    fn new(submission: u64, text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            submission,
            text: text.into(),
            sender,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submission(&self) -> u64 {
        self.submission
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_from_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_get_distinct_ids() {
        let a = ChatMessage::user(0, "hello");
        let b = ChatMessage::user(0, "hello");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn sender_serializes_lowercase() {
        let msg = ChatMessage::bot(3, "hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["submission"], 3);
        assert_eq!(json["text"], "hi");
    }
}
