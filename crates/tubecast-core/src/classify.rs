//! Reference classification
//!
//! Turns whatever the user typed (watch URL, channel URL, playlist ID,
//! channel ID or bare video ID) into a canonical URL the extractor accepts.

use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Base of every canonical URL
pub const YOUTUBE_URL: &str = "https://www.youtube.com/";

static WATCH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.youtube\.com/watch\?.*(v=[A-Za-z0-9_-]+|list=[A-Za-z0-9_-]+)")
        .expect("watch url pattern")
});
static CHANNEL_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://www\.youtube\.com/channel/").expect("channel url pattern"));
static PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(PL|LL|UU)[A-Za-z0-9_-]+$").expect("playlist id pattern"));
static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]+$").expect("channel id pattern"));
static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("video id pattern"));

/// Shape of a user-supplied reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    WatchUrl,
    ChannelUrl,
    PlaylistId,
    ChannelId,
    VideoId,
}

impl ReferenceKind {
    /// Detect the reference shape; order matters, later patterns accept
    /// strings that earlier ones also accept
    pub fn detect(token: &str) -> Option<Self> {
        if WATCH_URL.is_match(token) {
            Some(ReferenceKind::WatchUrl)
        } else if CHANNEL_URL.is_match(token) {
            Some(ReferenceKind::ChannelUrl)
        } else if PLAYLIST_ID.is_match(token) {
            Some(ReferenceKind::PlaylistId)
        } else if CHANNEL_ID.is_match(token) {
            Some(ReferenceKind::ChannelId)
        } else if VIDEO_ID.is_match(token) {
            Some(ReferenceKind::VideoId)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::WatchUrl => write!(f, "watch url"),
            ReferenceKind::ChannelUrl => write!(f, "channel url"),
            ReferenceKind::PlaylistId => write!(f, "playlist id"),
            ReferenceKind::ChannelId => write!(f, "channel id"),
            ReferenceKind::VideoId => write!(f, "video id"),
        }
    }
}

/// Map a reference to its canonical URL
pub fn classify(token: &str) -> Result<String> {
    let kind = ReferenceKind::detect(token)
        .ok_or_else(|| Error::InvalidReference(token.to_string()))?;

    let url = match kind {
        ReferenceKind::WatchUrl | ReferenceKind::ChannelUrl => token.to_string(),
        ReferenceKind::PlaylistId => format!("{}watch?list={}", YOUTUBE_URL, token),
        ReferenceKind::ChannelId => format!("{}channel/{}", YOUTUBE_URL, token),
        ReferenceKind::VideoId => format!("{}watch?v={}", YOUTUBE_URL, token),
    };

    tracing::debug!(reference = token, kind = %kind, url = %url, "Reference classified");
    Ok(url)
}

/// Watch URL for a single video id
pub fn watch_url(video_id: &str) -> String {
    format!("{}watch?v={}", YOUTUBE_URL, video_id)
}
