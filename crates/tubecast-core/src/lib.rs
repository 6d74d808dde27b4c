//! tubecast core - playlist resolution and paced playback
//!
//! This crate turns a list of video references into a playlist and feeds it
//! to a remote player:
//! - Reference classification (watch/channel URLs, playlist, channel and video IDs)
//! - Flat-playlist extraction through yt-dlp, with nested playlists expanded in place
//! - Per-source and whole-playlist shuffle/limit
//! - First-seen deduplication across sources
//! - Background resolution overlapped with device setup
//! - Paced play/enqueue onto a playback sink
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          tubecast core                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │  Reference   │  │   Metadata   │  │     Post     │           │
//! │  │  Classifier  │  │  Extractor   │  │  processor   │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │  Playlist   │                              │
//! │                    │  Resolver   │                              │
//! │                    └──────┬──────┘                              │
//! │                           │ oneshot                             │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐            │
//! │  │   Device     │─▶│ Coordinator │─▶│   Playback   │─▶ sink     │
//! │  │  Discovery   │  │             │  │    Driver    │            │
//! │  └──────────────┘  └─────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod classify;
pub mod extractor;
pub mod postprocess;
pub mod resolver;
pub mod sink;
pub mod driver;
pub mod coordinator;
pub mod discovery;

pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, ControllerConfig, DiscoveryConfig, ExtractorConfig, PacingConfig};
pub use classify::{classify, ReferenceKind};
pub use extractor::{FlatPlaylistExtractor, MemorySource, MetadataExtractor, ProcessSource};
pub use postprocess::{postprocess, postprocess_with_rng};
pub use resolver::{PlaylistResolver, ResolveOptions};
pub use sink::{CommandSink, PlaybackSink, RecordingSink, SinkCall};
pub use driver::PlaybackDriver;
pub use coordinator::{Coordinator, PendingPlaylist, PlaybackAction};
pub use discovery::{discover_devices, find_device};

/// Extractor backed by the external yt-dlp process
pub type YtDlpExtractor = FlatPlaylistExtractor<ProcessSource>;
