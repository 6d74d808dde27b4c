//! tubecast - cast YouTube videos, playlists and channels
//!
//! Features:
//! - Play or enqueue any mix of video, playlist and channel references
//! - Per-source and whole-playlist shuffle/limit
//! - Pause, resume and stop a device
//! - Cast device discovery on the local network

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tubecast_core::{Config, PlaybackAction, PostProcessConfig, ResolveOptions};

mod commands;
mod output;

use commands::ControlCommand;
use output::OutputFormat;

/// Exit status after SIGINT/SIGTERM/SIGQUIT
const INTERRUPTED: u8 = 130;

/// tubecast - YouTube casting toolkit
#[derive(Parser)]
#[command(name = "tubecast")]
#[command(version)]
#[command(about = "Cast YouTube videos, playlists and channels to a device", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metadata extractor program (overrides the config file)
    #[arg(long)]
    extractor: Option<String>,

    /// Cast controller program (overrides the config file)
    #[arg(long)]
    controller: Option<String>,

    /// Resolve and log what would be sent without touching a device
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the first video and queue the rest
    Play(PlaylistArgs),

    /// Queue everything into a new session
    Enqueue(PlaylistArgs),

    /// Pause playback
    Pause {
        /// Device name or address
        device: String,
    },

    /// Resume playback
    Resume {
        /// Device name or address
        device: String,
    },

    /// Stop playback
    Stop {
        /// Device name or address
        device: String,
    },

    /// List cast devices on the local network
    List,
}

#[derive(Args)]
struct PlaylistArgs {
    /// Device name or address
    device: String,

    /// Video, playlist or channel URLs or IDs
    #[arg(required = true)]
    refs: Vec<String>,

    /// Shuffle the merged playlist
    #[arg(short = 'S', long)]
    shuffle: bool,

    /// Keep at most N videos of the merged playlist (-1 = all)
    #[arg(short = 'L', long, default_value_t = -1, allow_negative_numbers = true)]
    limit: i64,

    /// Shuffle each source before it is merged
    #[arg(short = 's', long)]
    fetch_shuffle: bool,

    /// Keep at most N videos from each source (-1 = all)
    #[arg(short = 'l', long, default_value_t = -1, allow_negative_numbers = true)]
    fetch_limit: i64,
}

impl PlaylistArgs {
    fn options(&self) -> ResolveOptions {
        ResolveOptions::new(
            PostProcessConfig::new(self.fetch_limit, self.fetch_shuffle),
            PostProcessConfig::new(self.limit, self.shuffle),
        )
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            Config::from_file(path).with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(program) = &cli.extractor {
        config.extractor.program = program.clone();
    }
    if let Some(program) = &cli.controller {
        config.controller.program = program.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let format = OutputFormat::from(cli.format.as_str());

    match cli.command {
        Commands::Play(args) => {
            let options = args.options();
            commands::cast(PlaybackAction::Play, &config, &args.device, args.refs, options, cli.dry_run, format)
                .await?;
        }
        Commands::Enqueue(args) => {
            let options = args.options();
            commands::cast(PlaybackAction::Enqueue, &config, &args.device, args.refs, options, cli.dry_run, format)
                .await?;
        }
        Commands::Pause { device } => {
            commands::control(ControlCommand::Pause, &config, &device, cli.dry_run).await?;
        }
        Commands::Resume { device } => {
            commands::control(ControlCommand::Resume, &config, &device, cli.dry_run).await?;
        }
        Commands::Stop { device } => {
            commands::control(ControlCommand::Stop, &config, &device, cli.dry_run).await?;
        }
        Commands::List => {
            commands::list(&config, format).await?;
        }
    }

    Ok(())
}

/// Resolves with the name of the first termination signal received
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut terminate), Ok(mut quit)) = (signal(SignalKind::terminate()), signal(SignalKind::quit())) else {
        warn!("Failed to install SIGTERM/SIGQUIT handlers");
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        return "SIGINT";
    };

    tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = load_config(&cli)?;

    // The command future is dropped before the handler runs, which kills
    // any extractor or controller process it still owns
    tokio::select! {
        result = run(cli, config) => result.map(|()| ExitCode::SUCCESS),
        signal = shutdown_signal() => {
            warn!(signal, "Interrupted");
            Ok(ExitCode::from(INTERRUPTED))
        }
    }
}
