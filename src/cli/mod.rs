use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (type /quit or press Ctrl-D to leave)
    Chat,

    /// Send a single message and print the resulting transcript
    Send {
        text: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Poll a job once and print its status
    Status { job_id: String },
}
