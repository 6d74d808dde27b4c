//! Playback sinks
//!
//! The driver only ever talks to a [`PlaybackSink`]. [`CommandSink`] forwards
//! calls to an external cast controller program; [`RecordingSink`] keeps
//! them in memory for dry runs and tests.

mod command;
mod recording;

pub use command::{parse_player_state, CommandSink};
pub use recording::{RecordingSink, SinkCall};

use crate::{types::PlayerState, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Remote playback capability
#[async_trait]
pub trait PlaybackSink: Send + Sync {
    /// Replace whatever is playing with `video_id`
    async fn play_video(&self, video_id: &str) -> Result<()>;

    /// Append `video_id` to the remote queue
    async fn add_to_queue(&self, video_id: &str) -> Result<()>;

    async fn pause(&self) -> Result<()>;

    async fn resume(&self) -> Result<()>;

    async fn stop(&self) -> Result<()>;

    /// Start an empty remote session
    async fn start_new_session(&self, name: &str) -> Result<()>;

    /// Current remote player state
    async fn player_state(&self) -> Result<PlayerState>;
}

macro_rules! forward_sink {
    ($wrapper:ident) => {
        #[async_trait]
        impl<T: PlaybackSink + ?Sized> PlaybackSink for $wrapper<T> {
            async fn play_video(&self, video_id: &str) -> Result<()> {
                (**self).play_video(video_id).await
            }

            async fn add_to_queue(&self, video_id: &str) -> Result<()> {
                (**self).add_to_queue(video_id).await
            }

            async fn pause(&self) -> Result<()> {
                (**self).pause().await
            }

            async fn resume(&self) -> Result<()> {
                (**self).resume().await
            }

            async fn stop(&self) -> Result<()> {
                (**self).stop().await
            }

            async fn start_new_session(&self, name: &str) -> Result<()> {
                (**self).start_new_session(name).await
            }

            async fn player_state(&self) -> Result<PlayerState> {
                (**self).player_state().await
            }
        }
    };
}

forward_sink!(Arc);
forward_sink!(Box);
