//! Entry point for the retort binary.
//!
//! Parses arguments, wires up logging, loads configuration, and dispatches
//! to a command handler. All matching and teach logic lives in `chat_core`;
//! this crate is only the terminal front end.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod chat;
mod config;

#[derive(Parser, Debug)]
#[command(
    name = "retort",
    about = "A teachable terminal chatbot over a flat knowledge base",
    version
)]
struct Cli {
    /// Path of the knowledge base JSON file (overrides the config file).
    #[arg(short, long, global = true)]
    knowledge_base: Option<PathBuf>,

    /// Path of the config file.
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat interactively (the default).
    Chat,
    /// Ask a single question and exit.
    Ask { question: String },
    /// Teach a question/answer pair without chatting.
    Teach { question: String, answer: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut config = config::load_config(&cli.config)?;
    if let Some(path) = cli.knowledge_base {
        config.knowledge_base = path;
    }
    tracing::debug!(?config, "resolved configuration");

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run_chat(&config),
        Commands::Ask { question } => chat::run_ask(&config, &question),
        Commands::Teach { question, answer } => chat::run_teach(&config, &question, &answer),
    };

    if let Err(e) = result {
        tracing::error!("command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
