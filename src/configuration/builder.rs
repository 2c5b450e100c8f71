use super::ParserConfiguration;

/// Chained construction of a [`ParserConfiguration`], starting from defaults.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigurationBuilder {
    config: ParserConfiguration,
}

impl ParserConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_package_name(mut self, name: impl Into<String>) -> Self {
        self.config.set_default_package_name(name);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.config.set_target(target);
        self
    }

    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.config.set_visibility(visibility);
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.config.set_encoding(encoding);
        self
    }

    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_markers(markers);
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_extensions(extensions);
        self
    }

    pub fn rebuild_cache(mut self, rebuild: bool) -> Self {
        self.config.set_should_rebuild_cache(rebuild);
        self
    }

    pub fn build(self) -> ParserConfiguration {
        self.config
    }
}
