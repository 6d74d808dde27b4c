//! Sink backed by a cast controller program (catt-compatible CLI)

use super::PlaybackSink;
use crate::{classify::watch_url, config::ControllerConfig, types::PlayerState, Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Issues one controller invocation per sink call
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    device: String,
}

impl CommandSink {
    /// `device` is anything the controller accepts after `-d` (name or address)
    pub fn new(config: &ControllerConfig, device: impl Into<String>) -> Self {
        Self {
            program: config.program.clone(),
            device: device.into(),
        }
    }

    /// Full argument list for a controller subcommand
    pub fn args(&self, command: &[&str]) -> Vec<String> {
        ["-d", self.device.as_str()]
            .iter()
            .chain(command.iter())
            .map(|s| s.to_string())
            .collect()
    }

    #[instrument(skip(self), fields(device = %self.device))]
    async fn run(&self, command: &[&str]) -> Result<String> {
        let args = self.args(command);
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::SinkSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::SinkCommand {
                command: command.join(" "),
                reason: match stderr.trim() {
                    "" => output.status.to_string(),
                    msg => msg.to_string(),
                },
            });
        }

        debug!(command = %command.join(" "), "Controller command ok");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pick the `player_state` line out of controller `info` output
pub fn parse_player_state(info: &str) -> PlayerState {
    info.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "player_state")
        .map(|(_, value)| PlayerState::parse(value))
        .unwrap_or(PlayerState::Idle)
}

#[async_trait]
impl PlaybackSink for CommandSink {
    async fn play_video(&self, video_id: &str) -> Result<()> {
        self.run(&["cast", &watch_url(video_id)]).await.map(drop)
    }

    async fn add_to_queue(&self, video_id: &str) -> Result<()> {
        self.run(&["add", &watch_url(video_id)]).await.map(drop)
    }

    async fn pause(&self) -> Result<()> {
        self.run(&["pause"]).await.map(drop)
    }

    async fn resume(&self) -> Result<()> {
        self.run(&["play"]).await.map(drop)
    }

    async fn stop(&self) -> Result<()> {
        self.run(&["stop"]).await.map(drop)
    }

    async fn start_new_session(&self, name: &str) -> Result<()> {
        // The controller has no named sessions; clearing the queue starts afresh
        debug!(session = name, "Starting new session");
        self.run(&["clear"]).await.map(drop)
    }

    async fn player_state(&self) -> Result<PlayerState> {
        let info = self.run(&["info"]).await?;
        Ok(parse_player_state(&info))
    }
}
