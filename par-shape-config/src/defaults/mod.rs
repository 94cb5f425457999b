//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod font;
mod shaping;

// ── Fonts ──────────────────────────────────────────────────────────────────
pub use font::{fallback_families, font_family, font_ranges, font_size, last_resort_family};

// ── Shaping ────────────────────────────────────────────────────────────────
pub use shaping::{bool_true, max_fallback_fonts, shape_cache_size};
