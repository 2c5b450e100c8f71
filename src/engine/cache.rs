//! Parser cache decisions
//!
//! The parser product is reused between runs unless a rebuild is forced or
//! the persisted settings changed since the product was written.

use std::path::PathBuf;

use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::configuration::ParserConfiguration;
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No fingerprint recorded yet.
    Missing,
    /// Settings unchanged; the product can be reused.
    Fresh,
    /// Settings changed since the product was written.
    Stale,
    /// The rebuild flag is set.
    Forced,
}

impl CacheStatus {
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, CacheStatus::Fresh)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Missing => "missing",
            CacheStatus::Fresh => "fresh",
            CacheStatus::Stale => "stale",
            CacheStatus::Forced => "forced",
        }
    }
}

/// Hash of the persisted settings. The rebuild flag does not contribute.
pub fn fingerprint(config: &ParserConfiguration) -> u64 {
    // serde_json maps are key-ordered, so the encoding is stable.
    let doc = schema::encode(config).to_string();
    xxh3_64(doc.as_bytes())
}

pub fn cache_status(config: &ParserConfiguration, previous: Option<u64>) -> CacheStatus {
    if config.should_rebuild_cache() {
        return CacheStatus::Forced;
    }

    let status = match previous {
        None => CacheStatus::Missing,
        Some(fp) if fp == fingerprint(config) => CacheStatus::Fresh,
        Some(_) => CacheStatus::Stale,
    };
    debug!("Parser cache is {}", status.as_str());
    status
}

/// Location of the parser product, falling back to `default_dir` when no
/// target is configured.
pub fn cache_location(config: &ParserConfiguration, default_dir: impl Into<PathBuf>) -> PathBuf {
    config
        .target()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_dir.into())
}
