//! Shared configuration loader for the novel-md toolchain.
//!
//! `defaults/novel-md.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`NovelMdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use novel_md::formats::editor::EditorFormat;
use novel_md::formats::markdown::MarkdownFormat;
use novel_md::{FormatRegistry, HtmlToMarkdownOptions, MarkdownToHtmlOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/novel-md.default.toml");

/// Top-level configuration consumed by novel-md applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NovelMdConfig {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
    pub editor: EditorConfig,
}

impl NovelMdConfig {
    /// Registry of the default formats, configured from this config
    pub fn registry(&self) -> FormatRegistry {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(MarkdownFormat::new(
            (&self.markdown).into(),
            (&self.html).into(),
        ));
        registry.register(EditorFormat::new(self.editor.pretty));
        registry
    }
}

/// HTML → Markdown output style.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_marker: char,
    pub strong_delimiter: String,
    pub em_delimiter: String,
    pub strike_delimiter: String,
    pub code_fence: String,
}

impl From<MarkdownConfig> for HtmlToMarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        HtmlToMarkdownOptions {
            bullet_marker: config.bullet_marker,
            strong_delimiter: config.strong_delimiter,
            em_delimiter: config.em_delimiter,
            strike_delimiter: config.strike_delimiter,
            code_fence: config.code_fence,
        }
    }
}

impl From<&MarkdownConfig> for HtmlToMarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        HtmlToMarkdownOptions {
            bullet_marker: config.bullet_marker,
            strong_delimiter: config.strong_delimiter.clone(),
            em_delimiter: config.em_delimiter.clone(),
            strike_delimiter: config.strike_delimiter.clone(),
            code_fence: config.code_fence.clone(),
        }
    }
}

/// Markdown → HTML rendering extensions.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HtmlConfig {
    pub strikethrough: bool,
    pub table: bool,
    pub autolink: bool,
}

impl From<&HtmlConfig> for MarkdownToHtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        MarkdownToHtmlOptions {
            strikethrough: config.strikethrough,
            table: config.table,
            autolink: config.autolink,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EditorConfig {
    pub pretty: bool,
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
    pub fn build(self) -> Result<NovelMdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NovelMdConfig, ConfigError> {
    Loader::new().build()
}
