use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML render error: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("Marker pattern error: {0}")]
    Marker(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
