//! # ARMADA Sample Bot
//!
//! Connects the [`Walls`] bot to a game server and plays until the server
//! closes the connection.
//!
//! ```bash
//! RUST_LOG=info sample_bot --config walls.toml
//! SERVER_URL=ws://localhost:7654 sample_bot
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use armada::bots::Walls;
use armada::prelude::*;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sample_bot")]
#[command(about = "Run the Walls sample bot against an arena server")]
struct Args {
    /// Bot configuration file (TOML). Defaults apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server address, overriding the configuration.
    #[arg(short, long)]
    url: Option<String>,
}

fn load_config(args: &Args) -> BotResult<BotConfig> {
    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => {
            let mut config = BotConfig::default();
            config.apply_env();
            config
        }
    };
    if let Some(url) = &args.url {
        config.server.url.clone_from(url);
    }
    config.validate()?;
    Ok(config)
}

fn play(args: &Args) -> BotResult<()> {
    let config = load_config(args)?;
    let url = config.server.url.clone();
    info!(bot = %config.bot.name, url = %url, "connecting");

    let (reader, writer) = connect_tcp(&url)?;
    match Connection::new(url, reader, writer).run(Walls::new(), config)? {
        Some(_) => info!("game over"),
        None => error!("bot thread panicked during play"),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match play(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "sample bot failed");
            ExitCode::FAILURE
        }
    }
}
