//! Configuration Schema Module
//!
//! Static descriptor table that maps the fields of [`ParserConfiguration`]
//! to their external document keys, value shapes and merge policies. The
//! record itself carries no serialization attributes; everything the codec
//! and loader need about the persisted form is declared here.
//!
//! [`ParserConfiguration`]: crate::configuration::ParserConfiguration

pub mod codec;
pub mod format;

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub use codec::{decode, encode, extract, read_field, write_field, FieldValue};
pub use format::DocumentFormat;

/// Persisted fields of the parser configuration.
///
/// The cache rebuild flag is runtime-only and has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DefaultPackageName,
    Target,
    Visibility,
    Encoding,
    Markers,
    Extensions,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        descriptor(*self).key
    }
}

/// Shape of a field inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar,
    /// Ordered list written under a wrapping key, one `item` tag per entry.
    List { item: &'static str },
}

/// How a layer's value combines with the value already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Layer value overwrites the current value wholesale.
    Replace,
    /// List entries are added after the current ones. Scalars fall back to replace.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub key: &'static str,
    pub shape: FieldShape,
    pub merge: MergePolicy,
}

pub static PARSER_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor {
        field: Field::DefaultPackageName,
        key: "default-package-name",
        shape: FieldShape::Scalar,
        merge: MergePolicy::Replace,
    },
    FieldDescriptor {
        field: Field::Target,
        key: "target",
        shape: FieldShape::Scalar,
        merge: MergePolicy::Replace,
    },
    FieldDescriptor {
        field: Field::Visibility,
        key: "visibility",
        shape: FieldShape::Scalar,
        merge: MergePolicy::Replace,
    },
    FieldDescriptor {
        field: Field::Encoding,
        key: "encoding",
        shape: FieldShape::Scalar,
        merge: MergePolicy::Replace,
    },
    FieldDescriptor {
        field: Field::Markers,
        key: "markers",
        shape: FieldShape::List { item: "item" },
        merge: MergePolicy::Replace,
    },
    FieldDescriptor {
        field: Field::Extensions,
        key: "extensions",
        shape: FieldShape::List { item: "extension" },
        merge: MergePolicy::Replace,
    },
];

static BY_KEY: Lazy<HashMap<&'static str, &'static FieldDescriptor>> =
    Lazy::new(|| PARSER_FIELDS.iter().map(|d| (d.key, d)).collect());

pub fn descriptor(field: Field) -> &'static FieldDescriptor {
    // Table order follows the enum declaration.
    &PARSER_FIELDS[field as usize]
}

/// Find the descriptor for an external document key.
pub fn lookup(key: &str) -> Option<&'static FieldDescriptor> {
    BY_KEY.get(key).copied()
}

/// Closest known key for a misspelled one, if reasonably similar.
pub fn suggest(key: &str) -> Option<&'static str> {
    PARSER_FIELDS
        .iter()
        .map(|d| (d.key, strsim::jaro_winkler(key, d.key)))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k)
}
