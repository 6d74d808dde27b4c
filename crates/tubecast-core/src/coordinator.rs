//! Resolution coordinator
//!
//! Overlaps playlist resolution with sink setup. Resolution runs on a
//! spawned task and delivers its result exactly once through a oneshot
//! channel; the caller sets up the sink, then waits for the playlist and
//! hands it to the driver.

use crate::{
    driver::PlaybackDriver,
    extractor::MetadataExtractor,
    resolver::{PlaylistResolver, ResolveOptions},
    sink::PlaybackSink,
    types::ResolvedPlaylist,
    Error, Result,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// What to do with the resolved playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Play the first entry, queue the rest
    Play,
    /// Queue everything into a new session
    Enqueue,
}

impl std::fmt::Display for PlaybackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackAction::Play => write!(f, "play"),
            PlaybackAction::Enqueue => write!(f, "enqueue"),
        }
    }
}

/// A playlist being resolved in the background
pub struct PendingPlaylist {
    rx: oneshot::Receiver<Result<ResolvedPlaylist>>,
    handle: JoinHandle<()>,
}

impl PendingPlaylist {
    /// Start resolving `tokens` on a new task
    pub fn spawn<E>(resolver: Arc<PlaylistResolver<E>>, tokens: Vec<String>, options: ResolveOptions) -> Self
    where
        E: MetadataExtractor + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = resolver.resolve(tokens.as_slice(), &options).await;
            if tx.send(result).is_err() {
                debug!("Playlist receiver dropped before resolution finished");
            }
        });
        Self { rx, handle }
    }

    /// Wait for the resolver to deliver its result
    pub async fn wait(mut self) -> Result<ResolvedPlaylist> {
        match (&mut self.rx).await {
            Ok(result) => result,
            Err(_) => Err(Error::Internal("playlist resolution ended without a result".into())),
        }
    }
}

impl Drop for PendingPlaylist {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs resolution alongside sink setup, then drives playback
pub struct Coordinator<E> {
    resolver: Arc<PlaylistResolver<E>>,
    driver: PlaybackDriver,
}

impl<E: MetadataExtractor + 'static> Coordinator<E> {
    pub fn new(resolver: PlaylistResolver<E>, driver: PlaybackDriver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            driver,
        }
    }

    /// Resolve `tokens` while `setup` produces the sink, then play or enqueue.
    ///
    /// Nothing reaches the sink unless both resolution and setup succeed.
    #[instrument(skip(self, tokens, options, setup), fields(sources = tokens.len()))]
    pub async fn run<S, F>(
        &self,
        action: PlaybackAction,
        tokens: Vec<String>,
        options: ResolveOptions,
        setup: F,
    ) -> Result<ResolvedPlaylist>
    where
        S: PlaybackSink,
        F: Future<Output = Result<S>>,
    {
        let pending = PendingPlaylist::spawn(Arc::clone(&self.resolver), tokens, options);

        let sink = setup.await?;
        info!("Controller is ready");

        let playlist = pending.wait().await?;
        let summary = playlist.clone();

        match action {
            PlaybackAction::Play => self.driver.play(&sink, playlist).await?,
            PlaybackAction::Enqueue => self.driver.enqueue_all(&sink, playlist).await?,
        }
        Ok(summary)
    }
}
