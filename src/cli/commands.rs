use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::{info, warn};

use parser_config::engine::{cache_status, fingerprint, FileMarkers, ParseSettings};
use parser_config::schema::{self, DocumentFormat};
use parser_config::{ConfigError, ConfigLoader, ParserConfiguration, Result};

#[derive(Parser)]
#[command(name = "parser-config")]
#[command(about = "Inspect and apply the documentation parser configuration")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Print the default configuration
    parser-config show

    # Layer two files and print the result as YAML
    parser-config -c phpdoc.toml -c local.yaml show --format yaml

    # List the files the parser would read
    parser-config files ./src

    # Markers report as JSON
    parser-config markers ./src --format json

    # Check whether a cache written with fingerprint 8a1f... is reusable
    parser-config fingerprint --previous 8a1f0c2d9e4b7a65
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to apply (repeatable, later files win)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration document
    Show {
        /// Output format: json, yaml or toml
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// List source files matching the configured extensions
    Files {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Report markers found in comments
    Markers {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the configuration fingerprint and cache status
    Fingerprint {
        /// Fingerprint recorded with the existing cache (hex)
        #[arg(long)]
        previous: Option<String>,

        /// Force a cache rebuild
        #[arg(long)]
        rebuild_cache: bool,
    },
}

pub fn load_config(files: &[PathBuf]) -> Result<ParserConfiguration> {
    ConfigLoader::new().with_files(files.iter().cloned()).load()
}

pub fn show_config(config: &ParserConfiguration, format: &str) -> Result<()> {
    let format = DocumentFormat::from_name(format)
        .ok_or_else(|| ConfigError::UnsupportedFormat(format.to_string()))?;
    let text = format.render(&schema::encode(config))?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn list_files(config: &ParserConfiguration, path: &Path) -> Result<()> {
    let settings = ParseSettings::from_config(config)?;
    let files = settings.walker.walk(path)?;

    for file in &files {
        println!("{}", file.display());
    }
    info!("{} file(s) match extensions [{}]", files.len(), config.extensions().join(", "));
    Ok(())
}

pub fn report_markers(config: &ParserConfiguration, path: &Path, format: &str) -> Result<()> {
    let settings = ParseSettings::from_config(config)?;
    let files = settings.walker.walk(path)?;

    let mut reports: Vec<FileMarkers> = files
        .par_iter()
        .filter_map(|file| match settings.markers.scan_file(file) {
            Ok(report) if !report.markers.is_empty() => Some(report),
            Ok(_) => None,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                None
            }
        })
        .collect();
    reports.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        "text" => {
            for report in &reports {
                for marker in &report.markers {
                    println!(
                        "{}:{}: {} {}",
                        report.file_path.display(),
                        marker.line,
                        marker.name,
                        marker.description
                    );
                }
            }
        }
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    }

    let total: usize = reports.iter().map(|r| r.markers.len()).sum();
    info!("{} marker(s) in {} file(s)", total, reports.len());
    Ok(())
}

pub fn show_fingerprint(config: &ParserConfiguration, previous: Option<&str>) -> Result<()> {
    let previous = previous
        .map(|hex| {
            u64::from_str_radix(hex.trim_start_matches("0x"), 16).map_err(|_| {
                ConfigError::InvalidValue {
                    key: "previous".to_string(),
                    expected: "a hexadecimal fingerprint",
                }
            })
        })
        .transpose()?;

    let status = cache_status(config, previous);
    println!("fingerprint: {:016x}", fingerprint(config));
    println!("cache: {}", status.as_str());
    println!("rebuild: {}", status.needs_rebuild());
    Ok(())
}
