//! Collector configuration.
//!
//! `CollectConfig` holds the knobs shared by the collection strategies:
//! which fonts width measurement uses per writing system, how the rich-text
//! collector separates paragraphs, whether the emptiness probe registers
//! dependencies for empty properties, and the log level used by
//! [`crate::logging::init`].
//!
//! `CollectConfig` provides defaults via [`Default`], a fluent
//! [`CollectConfig::builder()`] with validation, and
//! [`CollectConfig::from_json`] for hosts that keep settings in a file.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use gosub_collect::config::CollectConfig;
//! let cfg = CollectConfig::default();
//! assert_eq!(cfg.default_font.size_px, 16);
//! assert_eq!(cfg.paragraph_separator, ' ');
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use gosub_collect::config::CollectConfig;
//! use gosub_collect::text::FontSpec;
//! use gosub_collect::types::WritingSystem;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = CollectConfig::builder()
//!     .default_font(FontSpec::new("Charis SIL", 14))
//!     .writing_system_font(WritingSystem(2), FontSpec::new("Noto Sans Arabic", 16))
//!     .paragraph_separator('\u{2029}')
//!     .note_empty_dependencies(true)
//!     .build()?;
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Validation returns [`ConfigError`] when a font size is zero or the
//! paragraph separator is a control character other than `'\n'`.

use crate::errors::ConfigError;
use crate::text::FontSpec;
use crate::types::WritingSystem;
use serde::Deserialize;
use std::collections::HashMap;

/// Verbosity of the crate's log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    pub default_font: FontSpec,
    pub writing_system_fonts: HashMap<WritingSystem, FontSpec>,
    pub paragraph_separator: char,
    pub note_empty_dependencies: bool,
    pub log_level: LogLevel,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            default_font: FontSpec::default(),
            writing_system_fonts: HashMap::new(),
            paragraph_separator: ' ',
            note_empty_dependencies: false,
            log_level: LogLevel::default(),
        }
    }
}

impl CollectConfig {
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: CollectConfig = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate(&cfg)?;
        Ok(cfg)
    }

    /// Font used to measure text in writing system `ws`.
    pub fn font_for(&self, ws: WritingSystem) -> &FontSpec {
        self.writing_system_fonts.get(&ws).unwrap_or(&self.default_font)
    }
}

/// Builder for [`CollectConfig`].
#[derive(Debug, Clone, Default)]
pub struct CollectConfigBuilder {
    inner: CollectConfig,
}

impl CollectConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut CollectConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn default_font(self, font: FontSpec) -> Self { self.map(|c| c.default_font = font) }
    pub fn writing_system_font(self, ws: WritingSystem, font: FontSpec) -> Self { self.map(|c| { c.writing_system_fonts.insert(ws, font); }) }
    pub fn paragraph_separator(self, sep: char) -> Self { self.map(|c| c.paragraph_separator = sep) }
    pub fn note_empty_dependencies(self, on: bool) -> Self { self.map(|c| c.note_empty_dependencies = on) }
    pub fn log_level(self, level: LogLevel) -> Self { self.map(|c| c.log_level = level) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut CollectConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<CollectConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

fn validate(c: &CollectConfig) -> Result<(), ConfigError> {
    if c.default_font.size_px == 0 || c.writing_system_fonts.values().any(|f| f.size_px == 0) {
        return Err(ConfigError::ZeroFontSize);
    }
    if c.paragraph_separator.is_control() && c.paragraph_separator != '\n' {
        return Err(ConfigError::InvalidSeparator(c.paragraph_separator));
    }
    Ok(())
}
