use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, SendController, StatusController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    send_controller: SendController<'a>,
    status_controller: StatusController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            send_controller: SendController::new(container),
            status_controller: StatusController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat => self.chat_controller.chat().await,
            Commands::Send { text, format } => self.send_controller.send(text, format).await,
            Commands::Status { job_id } => self.status_controller.status(job_id).await,
        }
    }
}
