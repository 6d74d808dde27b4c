//! yt-dlp (or youtube-dl) subprocess source

use super::{RecordSource, RecordStream};
use crate::{config::ExtractorConfig, Error, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::debug;

/// Arguments selecting flat-playlist JSON-lines output
const FLAT_PLAYLIST_ARGS: [&str; 3] = ["--flat-playlist", "--yes-playlist", "-j"];

/// Runs the extractor program once per URL
#[derive(Debug, Clone)]
pub struct ProcessSource {
    config: ExtractorConfig,
}

impl ProcessSource {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Full argument list for `url`
    pub fn args(&self, url: &str) -> Vec<String> {
        FLAT_PLAYLIST_ARGS
            .iter()
            .map(|s| s.to_string())
            .chain(self.config.extra_args.iter().cloned())
            .chain(std::iter::once(url.to_string()))
            .collect()
    }
}

#[async_trait]
impl RecordSource for ProcessSource {
    async fn open(&self, url: &str) -> Result<Box<dyn RecordStream>> {
        let args = self.args(url);
        debug!(program = %self.config.program, ?args, "Spawning extractor");

        let mut child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::ExtractorSpawn {
                program: self.config.program.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Internal("extractor stdout not captured".into()))?;

        Ok(Box::new(ProcessStream {
            url: url.to_string(),
            child,
            lines: BufReader::new(stdout).lines(),
        }))
    }
}

/// Live stdout of one extractor run
pub struct ProcessStream {
    url: String,
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

#[async_trait]
impl RecordStream for ProcessStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        self.lines.next_line().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => Error::malformed(&self.url, e.to_string()),
            _ => Error::Io(e),
        })
    }

    async fn finish(mut self: Box<Self>) -> Result<()> {
        let status = self.child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ExtractorExit {
                url: self.url,
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(program: &str) -> ProcessSource {
        ProcessSource::new(ExtractorConfig {
            program: program.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_args_order() {
        let source = ProcessSource::new(ExtractorConfig {
            extra_args: vec!["--no-warnings".to_string()],
            ..Default::default()
        });
        assert_eq!(
            source.args("https://www.youtube.com/watch?v=x"),
            vec![
                "--flat-playlist",
                "--yes-playlist",
                "-j",
                "--no-warnings",
                "https://www.youtube.com/watch?v=x",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = source("tubecast-no-such-extractor")
            .open("https://www.youtube.com/watch?v=x")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, Error::ExtractorSpawn { .. }));
        assert!(err.is_extraction());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit() {
        let mut stream = source("false").open("u").await.unwrap();
        assert_eq!(stream.next_line().await.unwrap(), None);
        let err = stream.finish().await.unwrap_err();
        assert!(matches!(err, Error::ExtractorExit { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_streams_stdout_lines() {
        // echo prints its arguments, i.e. the flat-playlist flags and the url
        let mut stream = source("echo").open("u").await.unwrap();
        assert_eq!(
            stream.next_line().await.unwrap().as_deref(),
            Some("--flat-playlist --yes-playlist -j u")
        );
        assert_eq!(stream.next_line().await.unwrap(), None);
        stream.finish().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_output_is_malformed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("bad-extractor");
        std::fs::write(&script, "#!/bin/sh\nprintf '\\377\\n'\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut stream = source(script.to_str().unwrap()).open("u").await.unwrap();
        let err = stream.next_line().await.unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata { ref url, .. } if url == "u"));
        assert_eq!(err.error_code(), "MALFORMED_METADATA");
    }
}
