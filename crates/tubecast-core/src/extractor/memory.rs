//! In-memory record source

use super::{RecordSource, RecordStream};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Serves canned extractor output per URL.
///
/// URLs without canned output behave like an extractor that exits non-zero.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: HashMap<String, Vec<String>>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw output lines for `url`
    pub fn with_lines(mut self, url: &str, lines: Vec<String>) -> Self {
        self.pages.insert(url.to_string(), lines);
        self
    }

    /// Playable entries for `url`
    pub fn with_entries(self, url: &str, entries: &[(&str, &str)]) -> Self {
        let lines = entries
            .iter()
            .map(|(id, title)| {
                serde_json::json!({ "_type": "video", "id": id, "title": title })
                    .to_string()
            })
            .collect();
        self.with_lines(url, lines)
    }

    /// Pointers from `url` to other playlists
    pub fn with_nested(self, url: &str, targets: &[&str]) -> Self {
        let lines = targets
            .iter()
            .map(|target| serde_json::json!({ "_type": "url", "url": target }).to_string())
            .collect();
        self.with_lines(url, lines)
    }

    /// URLs opened so far, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn open(&self, url: &str) -> Result<Box<dyn RecordStream>> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
        Ok(Box::new(MemoryStream {
            url: url.to_string(),
            lines: self.pages.get(url).cloned().map(VecDeque::from),
        }))
    }
}

struct MemoryStream {
    url: String,
    lines: Option<VecDeque<String>>,
}

#[async_trait]
impl RecordStream for MemoryStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.as_mut().and_then(VecDeque::pop_front))
    }

    async fn finish(self: Box<Self>) -> Result<()> {
        match self.lines {
            Some(_) => Ok(()),
            None => Err(Error::ExtractorExit {
                url: self.url,
                status: "exit status: 1".to_string(),
            }),
        }
    }
}
