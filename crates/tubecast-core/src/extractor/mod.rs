//! Metadata extraction
//!
//! A [`RecordSource`] opens a line stream of flat-playlist JSON records for a
//! URL. [`FlatPlaylistExtractor`] walks those streams, expanding records that
//! point at further playlists in place, and produces the flat list of
//! playable entries.
//!
//! ```text
//!   extract(url)
//!      │
//!      ▼
//!   ┌───────┐  line  ┌──────────────┐  entry   ┌─────────┐
//!   │ stack │ ─────▶ │ parse_record │ ───────▶ │ entries │
//!   └───────┘        └──────┬───────┘          └─────────┘
//!      ▲                    │ _type == "url"
//!      └──── open(nested) ──┘
//! ```

mod memory;
mod process;

pub use memory::MemorySource;
pub use process::{ProcessSource, ProcessStream};

use crate::{config::ExtractorConfig, types::VideoEntry, Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Anything that can turn a canonical URL into playable entries
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Vec<VideoEntry>>;
}

/// Opens a stream of raw metadata lines for a URL
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn open(&self, url: &str) -> Result<Box<dyn RecordStream>>;
}

/// Line-by-line view of one extraction
#[async_trait]
pub trait RecordStream: Send {
    /// Next output line, `None` once the stream is exhausted
    async fn next_line(&mut self) -> Result<Option<String>>;

    /// Called after the last line; reports how the extraction ended
    async fn finish(self: Box<Self>) -> Result<()>;
}

/// One parsed output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Points at another playlist or channel
    Nested(String),
    /// A playable video
    Entry(VideoEntry),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "_type")]
    kind: Option<String>,
    id: Option<String>,
    title: Option<String>,
    fulltitle: Option<String>,
    url: Option<String>,
}

/// Parse one JSON line emitted for `url`
pub fn parse_record(url: &str, line: &str) -> Result<Record> {
    let raw: RawRecord =
        serde_json::from_str(line).map_err(|e| Error::malformed(url, e.to_string()))?;

    if raw.kind.as_deref() == Some("url") {
        return match raw.url {
            Some(nested) if !nested.is_empty() => Ok(Record::Nested(nested)),
            _ => Err(Error::malformed(url, "url record without a url field")),
        };
    }

    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::malformed(url, "entry without an id"))?;
    let title = raw
        .fulltitle
        .or(raw.title)
        .ok_or_else(|| Error::malformed(url, format!("entry {} has no title", id)))?;

    Ok(Record::Entry(VideoEntry { id, title }))
}

struct Frame {
    url: String,
    stream: Box<dyn RecordStream>,
    found: usize,
}

/// Expands flat-playlist output into entries, following nested playlists
pub struct FlatPlaylistExtractor<S> {
    source: S,
    max_depth: usize,
}

impl<S: RecordSource> FlatPlaylistExtractor<S> {
    pub fn new(source: S, max_depth: usize) -> Self {
        Self { source, max_depth }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn open_frame(&self, url: String) -> Result<Frame> {
        info!(url = %url, "Fetch info");
        let stream = self.source.open(&url).await?;
        Ok(Frame {
            url,
            stream,
            found: 0,
        })
    }
}

impl FlatPlaylistExtractor<ProcessSource> {
    /// Extractor backed by the configured external program
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(ProcessSource::new(config.clone()), config.max_depth)
    }
}

#[async_trait]
impl<S: RecordSource> MetadataExtractor for FlatPlaylistExtractor<S> {
    #[instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<Vec<VideoEntry>> {
        let mut entries = Vec::new();
        let mut stack = vec![self.open_frame(url.to_string()).await?];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            let Some(line) = frame.stream.next_line().await? else {
                if let Some(done) = stack.pop() {
                    debug!(url = %done.url, entries = done.found, depth = stack.len(), "Source exhausted");
                    done.stream.finish().await?;
                }
                continue;
            };

            match parse_record(&frame.url, &line)? {
                Record::Entry(entry) => {
                    frame.found += 1;
                    entries.push(entry);
                }
                Record::Nested(nested) => {
                    if stack.len() > self.max_depth {
                        return Err(Error::NestingTooDeep {
                            url: nested,
                            max_depth: self.max_depth,
                        });
                    }
                    let child = self.open_frame(nested).await?;
                    stack.push(child);
                }
            }
        }

        info!(url = %url, entries = entries.len(), "{} videos found", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(source: MemorySource) -> FlatPlaylistExtractor<MemorySource> {
        FlatPlaylistExtractor::new(source, 50)
    }

    #[test]
    fn test_parse_entry_prefers_fulltitle() {
        let record = parse_record(
            "u",
            r#"{"_type": "video", "id": "v1", "fulltitle": "Full", "title": "Short"}"#,
        )
        .unwrap();
        assert_eq!(record, Record::Entry(VideoEntry::new("v1", "Full")));

        let record = parse_record("u", r#"{"id": "v2", "title": "Short"}"#).unwrap();
        assert_eq!(record, Record::Entry(VideoEntry::new("v2", "Short")));
    }

    #[test]
    fn test_parse_nested() {
        let record = parse_record("u", r#"{"_type": "url", "url": "https://x/list"}"#).unwrap();
        assert_eq!(record, Record::Nested("https://x/list".to_string()));
    }

    #[test]
    fn test_parse_malformed() {
        for line in [
            "not json",
            r#"[1, 2]"#,
            r#"{"_type": "url"}"#,
            r#"{"_type": "video", "title": "no id"}"#,
            r#"{"_type": "video", "id": "", "title": "empty id"}"#,
            r#"{"_type": "video", "id": "x"}"#,
        ] {
            let err = parse_record("src", line).unwrap_err();
            assert!(matches!(err, Error::MalformedMetadata { .. }), "{line}");
        }
    }

    #[tokio::test]
    async fn test_extract_flat() {
        let source = MemorySource::new().with_entries("root", &[("a", "A"), ("b", "B")]);
        let entries = extractor(source).extract("root").await.unwrap();
        assert_eq!(entries, vec![VideoEntry::new("a", "A"), VideoEntry::new("b", "B")]);
    }

    #[tokio::test]
    async fn test_nested_spliced_in_place() {
        let source = MemorySource::new()
            .with_lines(
                "root",
                vec![
                    r#"{"_type": "video", "id": "a", "title": "A"}"#.to_string(),
                    r#"{"_type": "url", "url": "inner"}"#.to_string(),
                    r#"{"_type": "video", "id": "d", "title": "D"}"#.to_string(),
                ],
            )
            .with_entries("inner", &[("b", "B"), ("c", "C")]);

        let entries = extractor(source).extract("root").await.unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_blank_line_is_malformed() {
        for blank in ["", "   "] {
            let source = MemorySource::new().with_lines(
                "root",
                vec![r#"{"id": "a", "title": "A"}"#.to_string(), blank.to_string()],
            );
            let err = extractor(source).extract("root").await.unwrap_err();
            assert!(matches!(err, Error::MalformedMetadata { ref url, .. } if url == "root"), "{blank:?}");
        }
    }

    #[tokio::test]
    async fn test_depth_ceiling() {
        let mut source = MemorySource::new();
        for level in 0..10 {
            source = source.with_nested(&format!("level{}", level), &[&format!("level{}", level + 1)]);
        }
        source = source.with_entries("level10", &[("deep", "Deep")]);

        let shallow = FlatPlaylistExtractor::new(source.clone(), 5);
        let err = shallow.extract("level0").await.unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { max_depth: 5, .. }));
        assert!(err.is_extraction());

        let deep = FlatPlaylistExtractor::new(source, 10);
        let entries = deep.extract("level0").await.unwrap();
        assert_eq!(entries, vec![VideoEntry::new("deep", "Deep")]);
    }

    #[tokio::test]
    async fn test_failed_source_aborts() {
        let source = MemorySource::new()
            .with_nested("root", &["missing"])
            .with_entries("other", &[("a", "A")]);
        let err = extractor(source).extract("root").await.unwrap_err();
        assert!(matches!(err, Error::ExtractorExit { .. }));
    }

    #[tokio::test]
    async fn test_malformed_line_aborts() {
        let source = MemorySource::new().with_lines(
            "root",
            vec![r#"{"id": "a", "title": "A"}"#.to_string(), "{oops".to_string()],
        );
        let err = extractor(source).extract("root").await.unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { .. }));
    }
}
