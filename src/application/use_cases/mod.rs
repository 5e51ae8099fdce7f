mod inference_orchestrator;
mod send_message;

pub use inference_orchestrator::*;
pub use send_message::*;
