//! Configuration system for the par-shape text shaper.
//!
//! This crate provides configuration loading, saving, and default values
//! for the shaping pipeline. It includes:
//!
//! - Font selection: primary family, size, fallback families, range fonts
//! - Fallback limits and shape cache sizing
//! - OpenType feature toggles passed to the shaping engine
//! - Debug log level

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{FontRange, LogLevel};
