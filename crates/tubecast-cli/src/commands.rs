//! CLI command implementations

use crate::output::{self, OutputFormat};
use tracing::info;
use tubecast_core::{
    discover_devices, find_device, CommandSink, Config, Coordinator, PlaybackAction, PlaybackDriver,
    PlaybackSink, PlaylistResolver, RecordingSink, ResolveOptions, YtDlpExtractor,
};

/// Single-shot player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Pause,
    Resume,
    Stop,
}

impl std::fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlCommand::Pause => write!(f, "pause"),
            ControlCommand::Resume => write!(f, "resume"),
            ControlCommand::Stop => write!(f, "stop"),
        }
    }
}

/// Find `device` and build a sink for it
async fn connect(config: &Config, device: &str, dry_run: bool) -> tubecast_core::Result<Box<dyn PlaybackSink>> {
    if dry_run {
        info!(device, "Dry run, commands are logged only");
        return Ok(Box::new(RecordingSink::new(device)));
    }

    let found = find_device(&config.discovery, device).await?;
    info!(device = %found, "Device found");
    Ok(Box::new(CommandSink::new(&config.controller, found.address)))
}

/// Resolve `refs` and play or enqueue them on `device`
pub async fn cast(
    action: PlaybackAction,
    config: &Config,
    device: &str,
    refs: Vec<String>,
    options: ResolveOptions,
    dry_run: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let resolver = PlaylistResolver::new(YtDlpExtractor::from_config(&config.extractor));
    let driver = PlaybackDriver::new(config.pacing, config.controller.session_name.clone());
    let coordinator = Coordinator::new(resolver, driver);

    let playlist = coordinator
        .run(action, refs, options, connect(config, device, dry_run))
        .await?;

    info!(%action, device, videos = playlist.len(), "Done");
    if format != OutputFormat::Text || dry_run {
        println!("{}", output::render_playlist(&playlist, format)?);
    }
    Ok(())
}

/// Send a single player command to `device`
pub async fn control(command: ControlCommand, config: &Config, device: &str, dry_run: bool) -> anyhow::Result<()> {
    let sink = connect(config, device, dry_run).await?;

    info!(device, %command, "Sending command");
    match command {
        ControlCommand::Pause => sink.pause().await?,
        ControlCommand::Resume => sink.resume().await?,
        ControlCommand::Stop => sink.stop().await?,
    }
    Ok(())
}

/// List cast devices on the local network
pub async fn list(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let devices = discover_devices(&config.discovery).await?;
    println!("{}", output::render_devices(&devices, format)?);
    Ok(())
}
