//! Font management and text shaping backend for par-shape.
//!
//! This crate provides:
//! - Font discovery through `fontdb` with per-script fallback chains
//! - Unicode range-specific font mappings (e.g., CJK, emoji)
//! - Coverage checks via `swash` charmaps
//! - HarfBuzz-based text shaping via rustybuzz
//!
//! # Architecture
//!
//! The `FontManager` implements the kernel's font fallback service. Candidate
//! fonts for a hint are offered in this order:
//! 1. Unicode range fonts whose range contains a hint character
//! 2. Script or emoji/symbol group fonts for the hint
//! 3. Configured fallback families
//! 4. The built-in general fallback list
//!
//! The `TextShaper` implements the kernel's shaping engine on top of the
//! same `FontManager`, with an LRU cache of shaped runs.

pub mod font_manager;
pub mod text_shaper;

// Re-export main types for convenience
pub use font_manager::{
    FALLBACK_FAMILIES, FallbackGroup, FontData, FontManager, FontManagerOptions, UnicodeRangeFont,
};
pub use text_shaper::{ShapingOptions, TextShaper};
