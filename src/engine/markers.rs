//! Markers report
//!
//! Finds configured codes (`TODO`, `FIXME`, ...) directly after an inline
//! comment opener and collects the rest of the line as the description.

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub name: String,
    pub line: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileMarkers {
    pub file_path: PathBuf,
    pub markers: Vec<Marker>,
}

pub struct MarkerScanner {
    pattern: Option<Regex>,
    encoding: &'static Encoding,
}

impl MarkerScanner {
    /// Build a scanner for `markers`. Matching is case-sensitive; an empty
    /// list yields a scanner that never matches. Files are read as UTF-8
    /// until [`with_encoding`](Self::with_encoding) says otherwise.
    pub fn new(markers: &[String]) -> Result<Self> {
        let names: Vec<String> = markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| regex::escape(m))
            .collect();
        if names.is_empty() {
            return Ok(Self {
                pattern: None,
                encoding: UTF_8,
            });
        }

        // Applied to the text starting at the comment opener.
        let pattern = format!(
            r"^(?://|#|/\*+)\s*(?P<name>{})(?::|\s|$)\s*(?P<desc>.*?)\s*(?:\*/)?\s*$",
            names.join("|")
        );
        let regex = Regex::new(&pattern).map_err(|e| ConfigError::Marker(e.to_string()))?;

        Ok(Self {
            pattern: Some(regex),
            encoding: UTF_8,
        })
    }

    /// Decode files with the charset named by `label`. Unknown labels fall
    /// back to UTF-8 with a warning.
    pub fn with_encoding(mut self, label: &str) -> Self {
        self.encoding = match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => encoding,
            None => {
                warn!("Unknown encoding '{}', reading files as UTF-8", label);
                UTF_8
            }
        };
        self
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn scan(&self, source: &str) -> Vec<Marker> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        source
            .lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let comment = &line[comment_start(line)?..];
                pattern.captures(comment).map(|caps| Marker {
                    name: caps["name"].to_string(),
                    line: idx as u32 + 1,
                    description: caps["desc"].to_string(),
                })
            })
            .collect()
    }

    /// Scan a file decoded with the scanner's encoding. A byte order mark
    /// overrides it; malformed sequences are replaced, not rejected.
    pub fn scan_file(&self, path: &Path) -> Result<FileMarkers> {
        let bytes = std::fs::read(path)?;
        let (source, _, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            warn!(
                "{} is not valid {}; replaced malformed bytes",
                path.display(),
                self.encoding.name()
            );
        }

        Ok(FileMarkers {
            file_path: path.to_path_buf(),
            markers: self.scan(&source),
        })
    }
}

/// Byte offset of the first `//`, `#` or `/*` outside a quoted string.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'#' => return Some(i),
                b'/' if matches!(bytes.get(i + 1), Some(b'/') | Some(b'*')) => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_scanner() -> MarkerScanner {
        MarkerScanner::new(&["TODO".to_string(), "FIXME".to_string()]).unwrap()
    }

    #[test]
    fn test_scan_line_comment_with_colon() {
        let markers = default_scanner().scan("<?php\n// TODO: This is a marker\n");

        assert_eq!(
            markers,
            vec![Marker {
                name: "TODO".to_string(),
                line: 2,
                description: "This is a marker".to_string(),
            }]
        );
    }

    #[test]
    fn test_scan_hash_and_block_comments() {
        let source = "$a = 1; # FIXME handle null\n/* TODO tidy up */\n";
        let markers = default_scanner().scan(source);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "FIXME");
        assert_eq!(markers[0].description, "handle null");
        assert_eq!(markers[1].name, "TODO");
        assert_eq!(markers[1].description, "tidy up");
    }

    #[test]
    fn test_scan_is_case_sensitive() {
        assert!(default_scanner().scan("// todo: lowercase\n").is_empty());
    }

    #[test]
    fn test_scan_requires_word_boundary() {
        assert!(default_scanner().scan("// TODOS are listed elsewhere\n").is_empty());
    }

    #[test]
    fn test_scan_marker_without_description() {
        let markers = default_scanner().scan("// FIXME\n");

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].description, "");
    }

    #[test]
    fn test_scan_ignores_code_outside_comments() {
        assert!(default_scanner().scan("$TODO = 'x';\n").is_empty());
    }

    #[test]
    fn test_empty_marker_list_never_matches() {
        let scanner = MarkerScanner::new(&[]).unwrap();
        assert!(scanner.scan("// TODO: nothing\n").is_empty());
    }

    #[test]
    fn test_markers_with_regex_characters() {
        let scanner = MarkerScanner::new(&["@todo".to_string(), "C++".to_string()]).unwrap();
        let markers = scanner.scan("// @todo: one\n# C++ two\n");

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[1].name, "C++");
    }

    #[test]
    fn test_scan_file_lossy() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.php");
        std::fs::write(&path, b"<?php\n// TODO: caf\xe9\n").unwrap();

        let found = default_scanner().scan_file(&path).unwrap();

        assert_eq!(found.markers.len(), 1);
        assert!(found.markers[0].description.starts_with("caf"));
    }

    #[test]
    fn test_scan_skips_openers_inside_strings() {
        let source = "$a = 'a # TODO b';\n$url = \"http://x\"; // FIXME: real one\n";
        let markers = default_scanner().scan(source);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "FIXME");
        assert_eq!(markers[0].line, 2);
        assert_eq!(markers[0].description, "real one");
    }

    #[test]
    fn test_scan_handles_escaped_quotes() {
        let source = "$s = \"say \\\"hi\\\" # TODO no\"; # TODO yes\n";
        let markers = default_scanner().scan(source);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].description, "yes");
    }

    #[test]
    fn test_comment_start() {
        assert_eq!(comment_start("// x"), Some(0));
        assert_eq!(comment_start("$a = 1; # x"), Some(8));
        assert_eq!(comment_start("$a = 'x/*y';"), None);
        assert_eq!(comment_start("$a = 4 / 2;"), None);
    }

    #[test]
    fn test_scan_file_latin1() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.php");
        std::fs::write(&path, b"<?php\n// TODO: caf\xe9\n").unwrap();

        let scanner = default_scanner().with_encoding("iso-8859-1");
        let found = scanner.scan_file(&path).unwrap();

        assert_eq!(found.markers.len(), 1);
        assert_eq!(found.markers[0].description, "caf\u{e9}");
    }

    #[test]
    fn test_unknown_encoding_falls_back_to_utf8() {
        let scanner = default_scanner().with_encoding("klingon-8");
        assert_eq!(scanner.encoding(), UTF_8);

        let scanner = default_scanner().with_encoding(" UTF-8 ");
        assert_eq!(scanner.encoding(), UTF_8);
    }
}
