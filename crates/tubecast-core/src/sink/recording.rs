//! In-memory sink

use super::PlaybackSink;
use crate::{types::PlayerState, Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::info;

/// A call made against a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    PlayVideo(String),
    AddToQueue(String),
    Pause,
    Resume,
    Stop,
    StartNewSession(String),
    PlayerState,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<SinkCall>,
    states: VecDeque<PlayerState>,
}

/// Records every call and replays scripted player states.
///
/// Once the script runs out the sink reports [`PlayerState::Idle`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    label: String,
    inner: Mutex<Inner>,
}

impl RecordingSink {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inner: Mutex::default(),
        }
    }

    /// States returned by successive `player_state` calls
    pub fn with_states(self, states: impl IntoIterator<Item = PlayerState>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.states.extend(states);
        }
        self
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.inner.lock().map(|i| i.calls.clone()).unwrap_or_default()
    }

    /// Calls other than state polls
    pub fn commands(&self) -> Vec<SinkCall> {
        self.calls()
            .into_iter()
            .filter(|c| *c != SinkCall::PlayerState)
            .collect()
    }

    fn record(&self, call: SinkCall) -> Result<()> {
        info!(device = %self.label, call = ?call, "Sink call");
        self.inner
            .lock()
            .map_err(|_| Error::Internal("recording sink poisoned".into()))?
            .calls
            .push(call);
        Ok(())
    }
}

#[async_trait]
impl PlaybackSink for RecordingSink {
    async fn play_video(&self, video_id: &str) -> Result<()> {
        self.record(SinkCall::PlayVideo(video_id.to_string()))
    }

    async fn add_to_queue(&self, video_id: &str) -> Result<()> {
        self.record(SinkCall::AddToQueue(video_id.to_string()))
    }

    async fn pause(&self) -> Result<()> {
        self.record(SinkCall::Pause)
    }

    async fn resume(&self) -> Result<()> {
        self.record(SinkCall::Resume)
    }

    async fn stop(&self) -> Result<()> {
        self.record(SinkCall::Stop)
    }

    async fn start_new_session(&self, name: &str) -> Result<()> {
        self.record(SinkCall::StartNewSession(name.to_string()))
    }

    async fn player_state(&self) -> Result<PlayerState> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| Error::Internal("recording sink poisoned".into()))?;
        inner.calls.push(SinkCall::PlayerState);
        Ok(inner.states.pop_front().unwrap_or(PlayerState::Idle))
    }
}
