use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobchat::connector::api::{Container, ContainerConfig, Router};
use jobchat::Commands;

#[derive(Parser)]
#[command(name = "jobchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Inference endpoint base URL (defaults to JOBCHAT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer with a local echo endpoint instead of the network
    #[arg(long, global = true)]
    mock: bool,

    #[arg(long, global = true, default_value = "1000")]
    poll_interval_ms: u64,

    /// Give up on a job after this many seconds (0 waits indefinitely)
    #[arg(long, global = true, default_value = "600")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,jobchat={level}")));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        base_url: cli.base_url,
        mock: cli.mock,
        poll_interval: Duration::from_millis(cli.poll_interval_ms),
        timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
    })?;

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn defaults_poll_every_second() {
        let cli = Cli::try_parse_from(["jobchat", "chat"]).expect("parse");
        assert_eq!(cli.poll_interval_ms, 1000);
        assert_eq!(cli.timeout_secs, 600);
        assert!(!cli.mock);
        assert!(matches!(cli.command, Commands::Chat));
    }

    #[test]
    fn send_accepts_json_format() {
        let cli = Cli::try_parse_from(["jobchat", "--mock", "send", "hello", "--format", "json"])
            .expect("parse");
        assert!(cli.mock);
        match cli.command {
            Commands::Send { text, format } => {
                assert_eq!(text, "hello");
                assert_eq!(format, jobchat::OutputFormat::Json);
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn status_requires_job_id() {
        assert!(Cli::try_parse_from(["jobchat", "status"]).is_err());
    }
}
