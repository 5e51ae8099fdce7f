mod chat_message;
mod conversation;
mod job;
mod poll_policy;

pub use chat_message::*;
pub use conversation::*;
pub use job::*;
pub use poll_policy::*;
