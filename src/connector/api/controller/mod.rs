pub mod chat_controller;
pub mod send_controller;
pub mod status_controller;

pub use chat_controller::ChatController;
pub use send_controller::SendController;
pub use status_controller::StatusController;

use crate::domain::{ChatMessage, Conversation, Sender};

pub(crate) fn format_message(message: &ChatMessage) -> String {
    let label = match message.sender() {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    format!("{}> {}", label, message.text())
}

pub(crate) fn format_transcript(conversation: &Conversation) -> String {
    conversation
        .ordered_by_submission()
        .into_iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join("\n")
}
