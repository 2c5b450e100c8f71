use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::configuration::ParserConfiguration;
use crate::error::{ConfigError, Result};

/// Collects the source files whose extension is listed in the configuration.
pub struct SourceWalker {
    extensions: Vec<String>,
}

impl SourceWalker {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
        }
    }

    pub fn from_config(config: &ParserConfiguration) -> Self {
        Self::new(config.extensions())
    }

    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(ConfigError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("source path not found: {}", root.display()),
            )));
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.is_supported(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}
