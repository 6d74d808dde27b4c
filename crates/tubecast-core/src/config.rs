//! Runtime configuration
//!
//! Every section has defaults matching the stock yt-dlp / catt setup, so an
//! empty JSON object is a valid config file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest accepted discovery window (one minute)
pub const MAX_DISCOVERY_WINDOW_MS: u64 = 60_000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub controller: ControllerConfig,
    pub pacing: PacingConfig,
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.extractor.program.trim().is_empty() {
            return Err(Error::InvalidConfig("extractor.program is empty".into()));
        }
        if self.extractor.max_depth == 0 {
            return Err(Error::InvalidConfig("extractor.max_depth must be at least 1".into()));
        }
        if self.controller.program.trim().is_empty() {
            return Err(Error::InvalidConfig("controller.program is empty".into()));
        }
        if self.discovery.window_ms == 0 {
            return Err(Error::InvalidConfig("discovery.window_ms must be positive".into()));
        }
        if self.discovery.window_ms > MAX_DISCOVERY_WINDOW_MS {
            return Err(Error::InvalidConfig(format!(
                "discovery.window_ms must be at most {}",
                MAX_DISCOVERY_WINDOW_MS
            )));
        }
        Ok(())
    }
}

/// Metadata extractor process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Program name or path
    pub program: String,
    /// Extra arguments, inserted before the URL
    pub extra_args: Vec<String>,
    /// Maximum playlist nesting depth
    pub max_depth: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            extra_args: Vec::new(),
            max_depth: 50,
        }
    }
}

/// Cast controller process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Program name or path
    pub program: String,
    /// Name passed when starting a new remote session
    pub session_name: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            program: "catt".to_string(),
            session_name: " ".to_string(),
        }
    }
}

/// Timing of playback driver calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Interval between player state polls while buffering
    pub buffering_poll_ms: u64,
    /// Delay after each enqueue
    pub enqueue_delay_ms: u64,
}

impl PacingConfig {
    pub fn buffering_poll(&self) -> Duration {
        Duration::from_millis(self.buffering_poll_ms)
    }

    pub fn enqueue_delay(&self) -> Duration {
        Duration::from_millis(self.enqueue_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            buffering_poll_ms: 100,
            enqueue_delay_ms: 500,
        }
    }
}

/// mDNS device discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Service type to browse
    pub service_type: String,
    /// How long to collect answers
    pub window_ms: u64,
}

impl DiscoveryConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            service_type: "_googlecast._tcp.local.".to_string(),
            window_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extractor.program, "yt-dlp");
        assert_eq!(config.extractor.max_depth, 50);
        assert_eq!(config.controller.program, "catt");
        assert_eq!(config.pacing.buffering_poll(), Duration::from_millis(100));
        assert_eq!(config.pacing.enqueue_delay(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"extractor": {{"program": "youtube-dl"}}, "pacing": {{"enqueue_delay_ms": 250}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.extractor.program, "youtube-dl");
        assert_eq!(config.extractor.max_depth, 50);
        assert_eq!(config.pacing.enqueue_delay_ms, 250);
        assert_eq!(config.pacing.buffering_poll_ms, 100);
        assert_eq!(config.controller, ControllerConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut config = Config::default();
        config.extractor.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.controller.program = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_discovery_window() {
        let mut config = Config::default();
        config.discovery.window_ms = MAX_DISCOVERY_WINDOW_MS;
        assert!(config.validate().is_ok());

        config.discovery.window_ms = u64::MAX;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_window_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"discovery": {{"window_ms": {}}}}}"#, u64::MAX).unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
