//! Core `Config` struct definition.
//!
//! - [`persistence`] - `load` / `save` and XDG path helpers

mod persistence;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{FontRange, LogLevel};

/// Configuration for the shaper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Fonts
    // ========================================================================
    /// Primary font family
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Font size in pixels
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: f32,

    /// Font used when no fallback font covers a character
    #[serde(default = "crate::defaults::last_resort_family")]
    pub last_resort_family: String,

    /// Extra fallback families, tried in order before the built-in chain
    #[serde(default = "crate::defaults::fallback_families")]
    pub fallback_families: Vec<String>,

    /// Unicode range-specific fonts, offered before any other fallback
    #[serde(default = "crate::defaults::font_ranges")]
    pub font_ranges: Vec<FontRange>,

    // ========================================================================
    // Shaping
    // ========================================================================
    /// Fallback fonts tried per range before the last-resort font
    #[serde(default = "crate::defaults::max_fallback_fonts")]
    pub max_fallback_fonts: usize,

    /// Shaped runs kept in the engine's LRU cache (0 disables caching)
    #[serde(default = "crate::defaults::shape_cache_size")]
    pub shape_cache_size: usize,

    /// Enable standard, contextual and discretionary ligatures
    #[serde(default = "crate::defaults::bool_true")]
    pub enable_ligatures: bool,

    /// Enable kerning adjustments
    #[serde(default = "crate::defaults::bool_true")]
    pub enable_kerning: bool,

    /// Enable contextual alternates
    #[serde(default = "crate::defaults::bool_true")]
    pub enable_contextual_alternates: bool,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Log level written to the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_family: crate::defaults::font_family(),
            font_size: crate::defaults::font_size(),
            last_resort_family: crate::defaults::last_resort_family(),
            fallback_families: crate::defaults::fallback_families(),
            font_ranges: crate::defaults::font_ranges(),
            max_fallback_fonts: crate::defaults::max_fallback_fonts(),
            shape_cache_size: crate::defaults::shape_cache_size(),
            enable_ligatures: crate::defaults::bool_true(),
            enable_kerning: crate::defaults::bool_true(),
            enable_contextual_alternates: crate::defaults::bool_true(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Check field values that parse fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Validation(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font_family must not be empty".to_string(),
            ));
        }
        if self.max_fallback_fonts == 0 {
            return Err(ConfigError::Validation(
                "max_fallback_fonts must be at least 1".to_string(),
            ));
        }
        for range in &self.font_ranges {
            if range.start > range.end {
                return Err(ConfigError::Validation(format!(
                    "font range U+{:04X}-U+{:04X} for '{}' is inverted",
                    range.start, range.end, range.font_family
                )));
            }
        }
        Ok(())
    }

    /// Copy with the primary family and size replaced where given.
    pub fn with_font(mut self, family: Option<&str>, size: Option<f32>) -> Self {
        if let Some(family) = family {
            self.font_family = family.to_string();
        }
        if let Some(size) = size {
            self.font_size = size;
        }
        self
    }
}
