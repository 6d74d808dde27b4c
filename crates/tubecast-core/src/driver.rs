//! Playback driver
//!
//! Walks a resolved playlist onto a sink: the first video is played, the
//! rest are queued one at a time with a fixed delay between calls.

use crate::{
    config::PacingConfig,
    sink::PlaybackSink,
    types::{ResolvedPlaylist, VideoEntry},
    Result,
};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Sequences playlist entries onto a sink
#[derive(Debug, Clone, Default)]
pub struct PlaybackDriver {
    pacing: PacingConfig,
    session_name: String,
}

impl PlaybackDriver {
    pub fn new(pacing: PacingConfig, session_name: impl Into<String>) -> Self {
        Self {
            pacing,
            session_name: session_name.into(),
        }
    }

    /// Play the first entry, then queue the rest.
    ///
    /// Before each enqueue the sink is polled until it leaves the buffering
    /// state. There is no timeout on that wait.
    #[instrument(skip_all, fields(entries = playlist.len()))]
    pub async fn play<S: PlaybackSink + ?Sized>(&self, sink: &S, playlist: ResolvedPlaylist) -> Result<()> {
        let mut entries = playlist.into_iter();
        let Some(first) = entries.next() else {
            info!("Empty playlist - nothing to do");
            return Ok(());
        };

        info!(id = %first.id, "Streaming {}", first.title);
        sink.play_video(&first.id).await?;

        for entry in entries {
            self.wait_while_buffering(sink).await?;
            self.enqueue(sink, &entry).await?;
            sleep(self.pacing.enqueue_delay()).await;
        }
        Ok(())
    }

    /// Start a fresh remote session and queue every entry.
    ///
    /// Unlike [`play`](Self::play) this does not wait out buffering.
    #[instrument(skip_all, fields(entries = playlist.len()))]
    pub async fn enqueue_all<S: PlaybackSink + ?Sized>(&self, sink: &S, playlist: ResolvedPlaylist) -> Result<()> {
        if playlist.is_empty() {
            info!("Empty playlist - nothing to do");
            return Ok(());
        }

        sink.start_new_session(&self.session_name).await?;
        for entry in playlist {
            self.enqueue(sink, &entry).await?;
            sleep(self.pacing.enqueue_delay()).await;
        }
        Ok(())
    }

    async fn enqueue<S: PlaybackSink + ?Sized>(&self, sink: &S, entry: &VideoEntry) -> Result<()> {
        info!(id = %entry.id, "Enqueue {}", entry.title);
        sink.add_to_queue(&entry.id).await
    }

    async fn wait_while_buffering<S: PlaybackSink + ?Sized>(&self, sink: &S) -> Result<()> {
        while sink.player_state().await?.is_buffering() {
            debug!("Sink buffering, waiting");
            sleep(self.pacing.buffering_poll()).await;
        }
        Ok(())
    }
}
