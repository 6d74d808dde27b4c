//! Playlist resolution
//!
//! Classifies each reference, extracts it, applies the fetch-level
//! post-processing per source, merges with first-seen deduplication and
//! finally applies the play-level post-processing to the merged list.

use crate::{
    classify::classify,
    extractor::MetadataExtractor,
    postprocess::postprocess,
    types::{PostProcessConfig, ResolvedPlaylist, VideoEntry},
    Result,
};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Post-processing for both stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Applied to each source on its own
    pub fetch: PostProcessConfig,
    /// Applied once to the merged result
    pub play: PostProcessConfig,
}

impl ResolveOptions {
    pub fn new(fetch: PostProcessConfig, play: PostProcessConfig) -> Self {
        Self { fetch, play }
    }
}

/// Keeps the first entry seen for every id
#[derive(Debug, Default)]
struct DedupAccumulator {
    seen: HashSet<String>,
    entries: Vec<VideoEntry>,
}

impl DedupAccumulator {
    /// Returns false when the id was already present
    fn push(&mut self, entry: VideoEntry) -> bool {
        if self.seen.contains(&entry.id) {
            return false;
        }
        self.seen.insert(entry.id.clone());
        self.entries.push(entry);
        true
    }

    fn into_entries(self) -> Vec<VideoEntry> {
        self.entries
    }
}

/// Resolves references into a playlist using an extractor
pub struct PlaylistResolver<E> {
    extractor: E,
}

impl<E: MetadataExtractor> PlaylistResolver<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Resolve every reference; the first failure aborts the whole run
    #[instrument(skip(self, tokens), fields(sources = tokens.len()))]
    pub async fn resolve<T: AsRef<str>>(
        &self,
        tokens: &[T],
        options: &ResolveOptions,
    ) -> Result<ResolvedPlaylist> {
        let mut merged = DedupAccumulator::default();

        for token in tokens {
            let url = classify(token.as_ref())?;
            let raw = self.extractor.extract(&url).await?;
            let per_source = postprocess(raw, &options.fetch);

            let offered = per_source.len();
            let mut added = 0usize;
            for entry in per_source {
                if merged.push(entry) {
                    added += 1;
                }
            }
            debug!(url = %url, offered, added, "Source merged");
        }

        let playlist = postprocess(merged.into_entries(), &options.play);
        info!(entries = playlist.len(), "Playlist resolved");
        Ok(ResolvedPlaylist::new(playlist))
    }
}
