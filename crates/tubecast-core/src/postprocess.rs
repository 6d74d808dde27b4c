//! Shuffle and limit
//!
//! Applied once per source (fetch level) and once to the merged playlist
//! (play level). Shuffling happens before truncation, so a shuffled and
//! limited sequence is a uniform sample without replacement.

use crate::types::PostProcessConfig;
use rand::seq::SliceRandom;
use rand::Rng;

/// Apply `config` using the thread-local RNG
pub fn postprocess<T>(entries: Vec<T>, config: &PostProcessConfig) -> Vec<T> {
    if config.is_passthrough() {
        return entries;
    }
    postprocess_with_rng(entries, config, &mut rand::rng())
}

/// Apply `config` with a caller-supplied RNG
pub fn postprocess_with_rng<T, R>(mut entries: Vec<T>, config: &PostProcessConfig, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if config.shuffle {
        entries.shuffle(rng);
    }
    if let Some(limit) = config.limit {
        entries.truncate(limit);
    }
    entries
}
