//! Curated news source catalog.
//!
//! The catalog is built once at startup and shared read-only afterwards
//! (`Arc<Catalog>`). Sources come from the first of these that yields a
//! non-empty list:
//!
//! 1. `NEWS_SOURCES_JSON`: inline JSON array
//! 2. `NEWS_SOURCES_FILE`: path to a JSON file
//! 3. `sources_file` from the config file
//! 4. The built-in list in [`builtin`]
//!
//! A malformed override is logged and skipped; it never prevents startup.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding an inline JSON source list.
pub const ENV_SOURCES_JSON: &str = "NEWS_SOURCES_JSON";
/// Environment variable holding a path to a JSON source list.
pub const ENV_SOURCES_FILE: &str = "NEWS_SOURCES_FILE";

/// Upper bound for an override file; anything larger is rejected unread.
const MAX_SOURCES_FILE_SIZE: u64 = 4 * 1_048_576;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read sources file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sources JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sources file too large: {0} bytes")]
    TooLarge(u64),

    #[error("Source list is empty")]
    Empty,
}

/// A named, categorized feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique display name, e.g. "BBC News - Top Stories"
    pub name: String,
    /// RSS/Atom feed URL
    pub url: String,
    pub category: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub verified: bool,
}

fn default_language() -> String {
    "en".to_string()
}

/// Read-only source catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: Vec<Source>,
}

impl Catalog {
    /// Builds a catalog from an explicit list.
    ///
    /// Entries with an empty name or URL are dropped, and later entries that
    /// reuse an earlier name are dropped so that `name` stays a unique key.
    pub fn new(sources: Vec<Source>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(sources.len());

        for source in sources {
            if source.name.trim().is_empty() || source.url.trim().is_empty() {
                tracing::warn!(name = %source.name, "Dropping source with empty name or URL");
                continue;
            }
            if !seen.insert(source.name.clone()) {
                tracing::warn!(name = %source.name, "Dropping duplicate source name");
                continue;
            }
            kept.push(source);
        }

        Self { sources: kept }
    }

    /// The built-in catalog shipped with the binary.
    pub fn builtin() -> Self {
        let sources = builtin::BUILTIN_SOURCES
            .iter()
            .map(|&(name, url, category, language)| Source {
                name: name.to_string(),
                url: url.to_string(),
                category: category.to_string(),
                language: language.to_string(),
                verified: true,
            })
            .collect();
        Self::new(sources)
    }

    /// Parses a JSON array of sources.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let sources: Vec<Source> = serde_json::from_str(json)?;
        let catalog = Self::new(sources);
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    /// Reads a JSON array of sources from a file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_SOURCES_FILE_SIZE {
            return Err(CatalogError::TooLarge(meta.len()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads the catalog using the override chain described in the module docs.
    pub fn load(config_file: Option<&Path>) -> Self {
        let inline = std::env::var(ENV_SOURCES_JSON).ok();
        let env_file = std::env::var(ENV_SOURCES_FILE).ok().map(PathBuf::from);
        Self::load_from(inline.as_deref(), env_file.as_deref(), config_file)
    }

    /// Override chain with the environment already read. Split out so tests
    /// don't need to mutate process-wide env vars.
    pub fn load_from(
        inline_json: Option<&str>,
        env_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Self {
        if let Some(json) = inline_json.filter(|s| !s.trim().is_empty()) {
            match Self::from_json(json) {
                Ok(catalog) => {
                    tracing::info!(
                        count = catalog.len(),
                        origin = ENV_SOURCES_JSON,
                        "Loaded news sources from environment"
                    );
                    return catalog;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to parse {}, falling back", ENV_SOURCES_JSON);
                }
            }
        }

        for path in [env_file, config_file].into_iter().flatten() {
            match Self::from_file(path) {
                Ok(catalog) => {
                    tracing::info!(
                        count = catalog.len(),
                        path = %path.display(),
                        "Loaded news sources from file"
                    );
                    return catalog;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        path = %path.display(),
                        "Failed to load sources file, falling back"
                    );
                }
            }
        }

        let catalog = Self::builtin();
        tracing::info!(count = catalog.len(), "Using built-in news sources");
        catalog
    }

    pub fn all(&self) -> &[Source] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources whose category matches exactly, in catalog order.
    pub fn list_by_category(&self, category: &str) -> Vec<&Source> {
        self.sources
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Exact, case-sensitive name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Distinct categories in first-seen order.
    pub fn all_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sources
            .iter()
            .map(|s| s.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
