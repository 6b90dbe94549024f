//! Configuration file parser for `newsfeed-mcp.toml`.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings since they are
//! usually typos.
use crate::feed::FeedSettings;
use crate::http::FetchOptions;
use crate::util::NetworkPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Largest feed document accepted.
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Top-level server configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind: String,

    /// User-Agent sent with article requests. Defaults to a browser-compatible
    /// string naming this server.
    pub user_agent: Option<String>,

    /// Allow feed and article URLs that resolve to loopback or private
    /// addresses. Off by default.
    pub allow_private_networks: bool,

    /// JSON source list used when no environment override is set.
    pub sources_file: Option<PathBuf>,

    pub timeouts: Timeouts,

    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            user_agent: None,
            allow_private_networks: false,
            sources_file: None,
            timeouts: Timeouts::default(),
            limits: Limits::default(),
        }
    }
}

/// Per-request timeouts in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub feed_secs: u64,
    pub article_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            feed_secs: 30,
            article_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Sources fetched per category request; the rest are skipped.
    pub max_sources_per_category: usize,
    /// Items kept by the feed extractor.
    pub max_feed_items: usize,
    /// `max_items_per_source` when a category request omits it.
    pub default_items_per_source: usize,
    /// `max_items` when a by-source request omits it.
    pub default_items_per_source_name: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_sources_per_category: 5,
            max_feed_items: 10,
            default_items_per_source: 5,
            default_items_per_source_name: 10,
        }
    }
}

const KNOWN_KEYS: &[&str] = &[
    "bind",
    "user_agent",
    "allow_private_networks",
    "sources_file",
    "timeouts",
    "limits",
];
const KNOWN_TIMEOUT_KEYS: &[&str] = &["feed_secs", "article_secs"];
const KNOWN_LIMIT_KEYS: &[&str] = &[
    "max_sources_per_category",
    "max_feed_items",
    "default_items_per_source",
    "default_items_per_source_name",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Zero timeout or zero limit → `Err(ConfigError::Invalid)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check size before reading so a huge file is never loaded
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), bind = %config.bind, "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates TOML text. Blank input yields the defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeouts.feed_secs == 0 || self.timeouts.article_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeouts must be at least 1 second".to_string(),
            ));
        }

        let limits = [
            ("max_sources_per_category", self.limits.max_sources_per_category),
            ("max_feed_items", self.limits.max_feed_items),
            ("default_items_per_source", self.limits.default_items_per_source),
            (
                "default_items_per_source_name",
                self.limits.default_items_per_source_name,
            ),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!(
                "limits.{name} must be at least 1"
            )));
        }
        Ok(())
    }

    pub fn network_policy(&self) -> NetworkPolicy {
        if self.allow_private_networks {
            NetworkPolicy::AllowPrivate
        } else {
            NetworkPolicy::PublicOnly
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.feed_secs)
    }

    pub fn article_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.article_secs)
    }

    /// Configured User-Agent, or `Mozilla/5.0 (compatible; newsfeed-mcp/<version>)`.
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "Mozilla/5.0 (compatible; {}/{})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )
        })
    }

    /// Feed retrieval settings derived from the timeouts and limits.
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            options: FetchOptions::new(self.feed_timeout(), MAX_FEED_SIZE),
            policy: self.network_policy(),
            max_items: self.limits.max_feed_items,
        }
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    for key in raw.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
        }
    }

    for (section, known) in [("timeouts", KNOWN_TIMEOUT_KEYS), ("limits", KNOWN_LIMIT_KEYS)] {
        if let Some(table) = raw.get(section).and_then(|v| v.as_table()) {
            for key in table.keys() {
                if !known.contains(&key.as_str()) {
                    tracing::warn!(section, key = %key, "Unknown key in config file, ignoring");
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
