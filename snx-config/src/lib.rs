//! Shared configuration loader for the snx toolchain.
//!
//! `defaults/snx.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`SnxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use snx_babel::SerializeOptions;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/snx.default.toml");

/// Top-level configuration consumed by snx applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SnxConfig {
    pub formatting: FormattingConfig,
    pub network: NetworkConfig,
}

/// Mirrors the knobs exposed by the XML pretty-printer.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub indent_string: String,
    pub wrap_column: usize,
    pub separator: String,
}

impl FormattingConfig {
    /// Serializer options carrying these knobs.
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions::default()
            .with_indent_string(&self.indent_string)
            .with_wrap_column(self.wrap_column)
            .with_separator(&self.separator)
    }
}

/// Knobs for the follow-graph queries.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub suggest_limit: usize,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SnxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SnxConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.formatting.indent_string, "    ");
        assert_eq!(config.formatting.wrap_column, 80);
        assert_eq!(config.formatting.separator, "\n");
        assert_eq!(config.network.suggest_limit, 5);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("formatting.indent_string", "\t")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.formatting.indent_string, "\t");
    }

    #[test]
    fn maps_formatting_onto_serializer_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options = config.formatting.serialize_options();
        assert!(options.indent);
        assert_eq!(options.indent_string, "    ");
        assert_eq!(options.wrap_column, 80);
    }
}
