//! Parser Engine Module
//!
//! Interprets a [`ParserConfiguration`] for a parsing run: which files to
//! read, which visibilities to keep, which markers to report, which package
//! to fall back to and whether the cache can be reused.

pub mod cache;
pub mod markers;
pub mod visibility;
pub mod walker;

pub use cache::{cache_location, cache_status, fingerprint, CacheStatus};
pub use markers::{FileMarkers, Marker, MarkerScanner};
pub use visibility::{Visibility, VisibilityFilter};
pub use walker::SourceWalker;

use crate::configuration::ParserConfiguration;
use crate::error::Result;

/// Everything a parsing run derives from the configuration up front.
pub struct ParseSettings {
    pub visibility: VisibilityFilter,
    pub walker: SourceWalker,
    pub markers: MarkerScanner,
    default_package: String,
}

impl ParseSettings {
    pub fn from_config(config: &ParserConfiguration) -> Result<Self> {
        Ok(Self {
            visibility: VisibilityFilter::parse(config.visibility()),
            walker: SourceWalker::from_config(config),
            markers: MarkerScanner::new(config.markers())?.with_encoding(config.encoding()),
            default_package: config.default_package_name().to_string(),
        })
    }

    /// Package for an element: its own when declared, otherwise the default.
    pub fn package_for<'a>(&'a self, declared: Option<&'a str>) -> &'a str {
        match declared.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.default_package,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_defaults() {
        let settings = ParseSettings::from_config(&ParserConfiguration::default()).unwrap();

        assert_eq!(settings.visibility.allowed().len(), 3);
        assert_eq!(settings.markers.encoding().name(), "UTF-8");
        assert!(settings.walker.is_supported(std::path::Path::new("a.phtml")));
        assert_eq!(settings.markers.scan("// TODO: x").len(), 1);
    }

    #[test]
    fn test_package_fallback() {
        let settings = ParseSettings::from_config(&ParserConfiguration::default()).unwrap();

        assert_eq!(settings.package_for(Some("Vendor\\App")), "Vendor\\App");
        assert_eq!(settings.package_for(Some("  ")), "global");
        assert_eq!(settings.package_for(None), "global");
    }

    #[test]
    fn test_package_fallback_uses_configured_name() {
        let config = ParserConfiguration::builder()
            .default_package_name("Default")
            .build();
        let settings = ParseSettings::from_config(&config).unwrap();

        assert_eq!(settings.package_for(None), "Default");
    }

    #[test]
    fn test_settings_read_files_in_configured_encoding() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.php");
        std::fs::write(&path, b"<?php\n// TODO: caf\xe9\n").unwrap();

        let mut config = ParserConfiguration::default();
        config.set_encoding("iso-8859-1");
        let settings = ParseSettings::from_config(&config).unwrap();

        let found = settings.markers.scan_file(&path).unwrap();

        assert_eq!(found.markers[0].description, "caf\u{e9}");
    }
}
