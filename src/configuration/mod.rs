//! Parser Configuration Record
//!
//! Plain settings carrier for the parsing phase. Holds values only: loading,
//! layering and interpretation live in `schema`, `loader` and `engine`.

pub mod builder;

pub use builder::ParserConfigurationBuilder;

pub const DEFAULT_PACKAGE_NAME: &str = "global";
pub const DEFAULT_VISIBILITY: &str = "public,protected,private";
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_MARKERS: [&str; 2] = ["TODO", "FIXME"];
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["php", "php3", "phtml"];

/// Settings consumed by the parser for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfiguration {
    default_package_name: String,
    target: Option<String>,
    visibility: String,
    encoding: String,
    markers: Vec<String>,
    extensions: Vec<String>,
    should_rebuild_cache: bool,
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self {
            default_package_name: DEFAULT_PACKAGE_NAME.to_string(),
            target: None,
            visibility: DEFAULT_VISIBILITY.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            should_rebuild_cache: false,
        }
    }
}

impl ParserConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ParserConfigurationBuilder {
        ParserConfigurationBuilder::new()
    }

    /// Package name given to elements that have no package of their own,
    /// neither declared nor inherited.
    pub fn default_package_name(&self) -> &str {
        &self.default_package_name
    }

    /// Path the parser writes its product (the cache) to.
    ///
    /// The product holds the settings and descriptors built while parsing and
    /// is reused by later runs so only changed files are processed again.
    /// Since it is not part of the generated documentation, it may live in a
    /// central location apart from the rendered output.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Comma-separated visibilities to include in the documentation:
    /// any of `public`, `protected` and `private`.
    pub fn visibility(&self) -> &str {
        &self.visibility
    }

    /// Character encoding of the files to parse.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Codes scanned for in inline comments to build the markers report.
    ///
    /// A marker is the word directly following the comment opener; the rest
    /// of the line is its description. A colon right after the marker is
    /// optional and ignored:
    ///
    /// ```text
    /// // TODO: This is a marker
    /// ```
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// File extensions, without leading dot, that the parser interprets.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether the cache must be discarded and rebuilt. Never persisted.
    pub fn should_rebuild_cache(&self) -> bool {
        self.should_rebuild_cache
    }

    pub fn set_default_package_name(&mut self, default_package_name: impl Into<String>) {
        self.default_package_name = default_package_name.into();
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn set_visibility(&mut self, visibility: impl Into<String>) {
        self.visibility = visibility.into();
    }

    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    pub fn set_markers<I, S>(&mut self, markers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers = markers.into_iter().map(Into::into).collect();
    }

    pub fn set_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
    }

    pub fn set_should_rebuild_cache(&mut self, should_rebuild_cache: bool) {
        self.should_rebuild_cache = should_rebuild_cache;
    }
}
