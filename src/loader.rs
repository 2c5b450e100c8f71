//! Configuration loader
//!
//! Builds a [`ParserConfiguration`] from explicitly named sources, applied
//! in order on top of the defaults. Later layers win.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::configuration::ParserConfiguration;
use crate::error::Result;
use crate::merge::{apply_layer, MergePolicies};
use crate::schema::{DocumentFormat, Field, MergePolicy};

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Document { name: String, doc: Value },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    sources: Vec<Source>,
    policies: MergePolicies,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file layer. The format is taken from the file extension.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources
            .extend(paths.into_iter().map(|p| Source::File(p.into())));
        self
    }

    /// Add an in-memory layer, e.g. overrides collected from the command line.
    pub fn with_document(mut self, name: impl Into<String>, doc: Value) -> Self {
        self.sources.push(Source::Document {
            name: name.into(),
            doc,
        });
        self
    }

    pub fn with_policy(mut self, field: Field, policy: MergePolicy) -> Self {
        self.policies.set(field, policy);
        self
    }

    pub fn load(&self) -> Result<ParserConfiguration> {
        self.load_onto(ParserConfiguration::default())
    }

    pub fn load_onto(&self, mut config: ParserConfiguration) -> Result<ParserConfiguration> {
        for source in &self.sources {
            match source {
                Source::File(path) => {
                    let doc = read_document(path)?;
                    let applied = apply_layer(&mut config, &doc, &self.policies)?;
                    debug!("Applied {} setting(s) from {}", applied, path.display());
                }
                Source::Document { name, doc } => {
                    let applied = apply_layer(&mut config, doc, &self.policies)?;
                    debug!("Applied {} setting(s) from {}", applied, name);
                }
            }
        }

        info!("Loaded parser configuration from {} layer(s)", self.sources.len());
        Ok(config)
    }
}

/// Read and parse a single configuration file.
pub fn read_document(path: &Path) -> Result<Value> {
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    format.parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, ParserConfiguration::default());
    }

    #[test]
    fn test_later_layers_win() {
        let temp_dir = TempDir::new().unwrap();
        let base = create_file(
            temp_dir.path(),
            "base.toml",
            "encoding = \"latin1\"\nvisibility = \"public\"\n",
        );
        let local = create_file(
            temp_dir.path(),
            "local.json",
            r#"{ "visibility": "public,protected" }"#,
        );

        let config = ConfigLoader::new().with_files([base, local]).load().unwrap();

        assert_eq!(config.encoding(), "latin1");
        assert_eq!(config.visibility(), "public,protected");
    }

    #[test]
    fn test_list_layers_replace() {
        let temp_dir = TempDir::new().unwrap();
        let base = create_file(
            temp_dir.path(),
            "base.yaml",
            "markers:\n  item: [TODO, FIXME, XXX]\n",
        );
        let local = create_file(temp_dir.path(), "local.yml", "markers:\n  item: [HACK]\n");

        let config = ConfigLoader::new()
            .with_file(base)
            .with_file(local)
            .load()
            .unwrap();

        assert_eq!(config.markers(), ["HACK"]);
    }

    #[test]
    fn test_list_layers_append_with_override() {
        let config = ConfigLoader::new()
            .with_document("one", json!({ "markers": ["A"] }))
            .with_document("two", json!({ "markers": ["B"] }))
            .with_policy(Field::Markers, MergePolicy::Append)
            .load()
            .unwrap();

        assert_eq!(config.markers(), ["TODO", "FIXME", "A", "B"]);
    }

    #[test]
    fn test_load_onto_keeps_rebuild_flag() {
        let mut base = ParserConfiguration::default();
        base.set_should_rebuild_cache(true);

        let config = ConfigLoader::new()
            .with_document("cli", json!({ "target": "/tmp/cache" }))
            .load_onto(base)
            .unwrap();

        assert!(config.should_rebuild_cache());
        assert_eq!(config.target(), Some("/tmp/cache"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::new()
            .with_file(temp_dir.path().join("absent.json"))
            .load();

        assert!(matches!(result, Err(crate::error::ConfigError::Io(_))));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_file(temp_dir.path(), "phpdoc.xml", "<phpdoc/>");

        let result = ConfigLoader::new().with_file(path).load();

        assert!(matches!(
            result,
            Err(crate::error::ConfigError::UnsupportedFormat(_))
        ));
    }
}
