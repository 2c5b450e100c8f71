use std::path::Path;

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Text formats a configuration document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Toml => "toml",
        }
    }

    pub fn parse(&self, text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        let doc: Value = match self {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
            DocumentFormat::Toml => toml::from_str(text)?,
        };
        Ok(doc)
    }

    pub fn render(&self, doc: &Value) -> Result<String> {
        let text = match self {
            DocumentFormat::Json => serde_json::to_string_pretty(doc)?,
            DocumentFormat::Yaml => serde_yaml::to_string(doc)?,
            DocumentFormat::Toml => toml::to_string_pretty(doc)?,
        };
        Ok(text)
    }
}
