use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

#[derive(Parser)]
#[command(name = "hako", about = "A key-value storage over HTTP.", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the server.
    Run {
        /// Path to a JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { config } => run(config),
    }
}

fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load .env early so RUST_LOG takes effect for the subscriber.
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let config = match &config_path {
        Some(path) => configs::load_from_file(path)
            .with_context(|| format!("failed to parse configuration file {}", path.display()))?,
        None => configs::HakoConfig::default(),
    };

    info!(version = env!("CARGO_PKG_VERSION"), "starting hako server");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(server::run(config))
}
