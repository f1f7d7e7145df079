use std::path::PathBuf;

use chat_workflow::{Config, HttpTransport, RequestWorkflow, SubmitOutcome};
use clap::{Parser, Subcommand};

mod logging;
mod session;
mod surface;

use logging::init_logging;

#[derive(Parser)]
#[command(name = "chat-cli")]
#[command(about = "Terminal client for the chat and file upload service")]
#[command(version)]
struct Cli {
    /// Chat service base URL (overrides the config file)
    #[arg(long, env = "CHAT_API_BASE")]
    server_url: Option<String>,

    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Chat,
    /// Send one message and/or a set of files, print the response and exit
    Send {
        /// Message content; sent alongside the files when any are given
        message: Option<String>,

        /// File to upload; repeat for several files
        #[arg(long = "file", short = 'f')]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url {
        config = config.with_api_base(server_url);
    }
    log::debug!("Chat service: {}", config.api_base);

    let transport = HttpTransport::new(&config)?;
    let mut workflow = RequestWorkflow::new(transport);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => session::run_interactive_chat(&mut workflow, &config.api_base).await,
        Commands::Send { message, files } => {
            let outcome =
                session::send_once(&mut workflow, message.unwrap_or_default(), &files).await?;
            if let SubmitOutcome::Failed(_) = outcome {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["chat-cli"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn send_accepts_message_and_repeated_files() {
        let cli = Cli::try_parse_from([
            "chat-cli",
            "--server-url",
            "http://10.0.0.5:5000",
            "send",
            "Summarize these",
            "--file",
            "a.txt",
            "-f",
            "b.pdf",
        ])
        .expect("parse");

        assert_eq!(cli.server_url.as_deref(), Some("http://10.0.0.5:5000"));
        match cli.command {
            Some(Commands::Send { message, files }) => {
                assert_eq!(message.as_deref(), Some("Summarize these"));
                assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b.pdf")]);
            }
            _ => panic!("expected send command"),
        }
    }

    #[test]
    fn send_allows_files_without_message() {
        let cli = Cli::try_parse_from(["chat-cli", "send", "-f", "scan.pdf"]).expect("parse");
        match cli.command {
            Some(Commands::Send { message, files }) => {
                assert!(message.is_none());
                assert_eq!(files.len(), 1);
            }
            _ => panic!("expected send command"),
        }
    }
}
