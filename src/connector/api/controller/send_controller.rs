use anyhow::{bail, Result};
use tokio_util::sync::CancellationToken;

use crate::cli::OutputFormat;
use crate::domain::Conversation;

use super::super::Container;
use super::format_transcript;

pub struct SendController<'a> {
    container: &'a Container,
}

impl<'a> SendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn send(&self, text: String, format: OutputFormat) -> Result<String> {
        let use_case = self.container.send_message_use_case();
        let mut conversation = Conversation::new();

        let reply = use_case
            .execute(&mut conversation, &text, &CancellationToken::new())
            .await;
        if reply.is_none() {
            bail!("Nothing to send: the message is blank");
        }

        render(&conversation, format)
    }
}

/// Both formats list messages grouped by submission.
fn render(conversation: &Conversation, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&conversation.ordered_by_submission())?,
        OutputFormat::Text => format_transcript(conversation),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::api::ContainerConfig;

    fn mock_container() -> Container {
        Container::new(ContainerConfig {
            mock: true,
            poll_interval: std::time::Duration::from_millis(1),
            ..ContainerConfig::default()
        })
        .expect("container")
    }

    #[tokio::test]
    async fn send_renders_text_transcript() {
        let container = mock_container();
        let output = SendController::new(&container)
            .send("hello".to_string(), OutputFormat::Text)
            .await
            .expect("send");

        assert_eq!(output, "you> hello\nbot> echo: hello");
    }

    #[tokio::test]
    async fn send_renders_json_messages() {
        let container = mock_container();
        let output = SendController::new(&container)
            .send("hello".to_string(), OutputFormat::Json)
            .await
            .expect("send");

        let messages: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(messages[0]["sender"], "user");
        assert_eq!(messages[1]["sender"], "bot");
        assert_eq!(messages[1]["text"], "echo: hello");
    }

    #[test]
    fn json_and_text_share_submission_order() {
        let mut conversation = Conversation::new();
        let a = conversation.begin_submission("a").unwrap();
        let b = conversation.begin_submission("b").unwrap();
        conversation.record_reply(b, "reply b");
        conversation.record_reply(a, "reply a");

        let text = render(&conversation, OutputFormat::Text).unwrap();
        assert_eq!(text, "you> a\nbot> reply a\nyou> b\nbot> reply b");

        let json = render(&conversation, OutputFormat::Json).unwrap();
        let messages: serde_json::Value = serde_json::from_str(&json).unwrap();
        let texts: Vec<_> = messages
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["a", "reply a", "b", "reply b"]);
    }

    #[tokio::test]
    async fn send_rejects_blank_text() {
        let container = mock_container();
        let result = SendController::new(&container)
            .send("   ".to_string(), OutputFormat::Text)
            .await;

        assert!(result.is_err());
    }
}
