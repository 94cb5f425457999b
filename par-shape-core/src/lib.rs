//! Text shaping kernel for par-shape.
//!
//! This crate provides:
//! - Run segmentation by Unicode script and font-fallback priority
//! - A lazy, capability-checked font fallback iterator
//! - `ShapeResult`, an ordered glyph-run accumulator with full-coverage checks
//! - `Shaper`, which drives the segment / shape / fallback loop
//!
//! # Architecture
//!
//! The kernel never parses fonts or computes glyph metrics itself. It talks to
//! three collaborators through traits so any platform backend can be plugged in:
//! 1. [`CharacterProperties`] - script and fallback-priority lookup
//! 2. [`ShapingEngine`] - turns a character range + font into positioned glyphs
//! 3. [`FontFallbackService`] - candidate fonts, coverage checks, last resort
//!
//! `par-shape-fonts` provides the fontdb/rustybuzz implementations.

pub mod engine;
pub mod error;
pub mod fallback;
pub mod font;
pub mod properties;
pub mod segmenter;
pub mod shape_result;
pub mod shaper;
pub mod text;

// Re-export main types for convenience
pub use engine::{EngineGlyph, EngineRun, NOTDEF_GLYPH, ShapeRequest, ShapingEngine};
pub use error::{EngineError, FontLookupError, ShapeError};
pub use fallback::{FallbackHint, FontFallbackIterator, FontFallbackService};
pub use font::{Font, FontId};
pub use properties::{CharacterProperties, EmojiTable, FontFallbackPriority, UnicodeProperties};
pub use segmenter::{RunSegmenter, RunSegmenterRange};
pub use shape_result::{Glyph, GlyphOffset, GlyphRun, ShapeResult};
pub use shaper::{Shaper, ShaperOptions};
pub use text::{TextBuffer, TextDirection};
pub use unicode_script::Script;
