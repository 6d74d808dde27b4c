//! Core types for tubecast

use serde::{Deserialize, Serialize};

/// One playable video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Platform video identifier, the deduplication key
    pub id: String,
    /// Display title
    pub title: String,
}

impl VideoEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl std::fmt::Display for VideoEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

/// Ordered, deduplicated result of resolving a set of references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedPlaylist {
    entries: Vec<VideoEntry>,
}

impl ResolvedPlaylist {
    pub fn new(entries: Vec<VideoEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VideoEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<VideoEntry> {
        self.entries
    }

    /// Video ids in playback order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

impl IntoIterator for ResolvedPlaylist {
    type Item = VideoEntry;
    type IntoIter = std::vec::IntoIter<VideoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Vec<VideoEntry>> for ResolvedPlaylist {
    fn from(entries: Vec<VideoEntry>) -> Self {
        Self::new(entries)
    }
}

/// Shuffle and length limit applied to a sequence of entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostProcessConfig {
    /// Maximum length, `None` = unlimited
    pub limit: Option<usize>,
    /// Permute the whole sequence before truncating
    pub shuffle: bool,
}

impl PostProcessConfig {
    /// Build from command-line style values where a negative limit means unlimited
    pub fn new(limit: i64, shuffle: bool) -> Self {
        Self {
            limit: usize::try_from(limit).ok(),
            shuffle,
        }
    }

    /// No shuffle, no limit
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn is_passthrough(&self) -> bool {
        self.limit.is_none() && !self.shuffle
    }
}

/// Remote player state as reported by a playback sink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded
    Idle,
    /// Loading; not ready for another enqueue
    Buffering,
    /// Content is playing
    Playing,
    /// Playback paused
    Paused,
    /// Anything the controller reported that we do not model
    Unknown(String),
}

impl PlayerState {
    /// Parse a controller-reported state name, case-insensitively
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_uppercase().as_str() {
            "IDLE" | "UNKNOWN" | "" => PlayerState::Idle,
            "BUFFERING" | "LOADING" => PlayerState::Buffering,
            "PLAYING" => PlayerState::Playing,
            "PAUSED" => PlayerState::Paused,
            _ => PlayerState::Unknown(value.to_string()),
        }
    }

    pub fn is_buffering(&self) -> bool {
        matches!(self, PlayerState::Buffering)
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Unknown(s) => write!(f, "unknown ({})", s),
        }
    }
}

/// A cast target found on the local network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Friendly name, as shown in the device's setup app
    pub name: String,
    /// Model name (may be empty)
    pub model: String,
    /// IPv4 address
    pub address: String,
    /// Cast control port
    pub port: u16,
}

impl std::fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.address, self.port)
    }
}
