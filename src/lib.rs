pub mod configuration;
pub mod engine;
pub mod error;
pub mod loader;
pub mod merge;
pub mod schema;

pub use configuration::{ParserConfiguration, ParserConfigurationBuilder};
pub use engine::{
    cache_location, cache_status, fingerprint, CacheStatus, FileMarkers, Marker, MarkerScanner,
    ParseSettings, SourceWalker, Visibility, VisibilityFilter,
};
pub use error::{ConfigError, Result};
pub use loader::ConfigLoader;
pub use merge::{apply_layer, MergePolicies};
pub use schema::{DocumentFormat, Field, FieldDescriptor, FieldShape, FieldValue, MergePolicy};
