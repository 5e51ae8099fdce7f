use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::application::SendMessageUseCase;
use crate::domain::{ChatMessage, Conversation};

use super::super::Container;
use super::format_message;

const QUIT_COMMAND: &str = "/quit";
const PROMPT: &str = "you> ";

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Line(String),
    /// `/quit` or end of input.
    Quit,
}

/// One interactive conversation fed from a line source.
pub(crate) struct ChatSession<R> {
    use_case: SendMessageUseCase,
    conversation: Conversation,
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> ChatSession<R> {
    pub(crate) fn new(use_case: SendMessageUseCase, reader: R) -> Self {
        Self {
            use_case,
            conversation: Conversation::new(),
            lines: reader.lines(),
        }
    }

    pub(crate) async fn read_input(&mut self) -> Result<Input> {
        match self.lines.next_line().await? {
            Some(line) if line.trim() == QUIT_COMMAND => Ok(Input::Quit),
            Some(line) => Ok(Input::Line(line)),
            None => Ok(Input::Quit),
        }
    }

    /// Sends `line` and returns the bot message, or `None` for a blank line.
    /// A cancelled token only fails this message.
    pub(crate) async fn respond(
        &mut self,
        line: &str,
        cancel: &CancellationToken,
    ) -> Option<ChatMessage> {
        self.use_case
            .execute(&mut self.conversation, line, cancel)
            .await
    }

    pub(crate) fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Runs the interactive session until `/quit`, EOF or Ctrl-C at the prompt.
    ///
    /// Ctrl-C while a reply is pending only cancels that message.
    pub async fn chat(&self) -> Result<String> {
        let mut session = ChatSession::new(
            self.container.send_message_use_case(),
            BufReader::new(tokio::io::stdin()),
        );

        info!("Chatting with {}", self.container.endpoint_label());
        println!("Type a message and press Enter. {QUIT_COMMAND} to leave.");

        loop {
            print!("{PROMPT}");
            std::io::stdout().flush()?;

            let input = tokio::select! {
                input = session.read_input() => input?,
                _ = tokio::signal::ctrl_c() => Input::Quit,
            };
            let Input::Line(line) = input else {
                println!();
                break;
            };

            let cancel = CancellationToken::new();
            let watcher = tokio::spawn({
                let cancel = cancel.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        cancel.cancel();
                    }
                }
            });

            let spinner = thinking_spinner();
            let reply = session.respond(&line, &cancel).await;
            spinner.finish_and_clear();
            watcher.abort();

            match reply {
                Some(message) => println!("{}", format_message(&message)),
                None => debug!("Skipped blank line"),
            }
        }

        Ok(format!(
            "Session ended after {} message(s).",
            session.conversation().len()
        ))
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
