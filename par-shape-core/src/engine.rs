//! Interface to the external shaping engine.

use unicode_script::Script;

use crate::error::EngineError;
use crate::font::Font;
use crate::shape_result::GlyphOffset;
use crate::text::{TextBuffer, TextDirection};

/// Glyph id engines use for "this font has no glyph for the cluster".
pub const NOTDEF_GLYPH: u32 = 0;

/// One shaping call: characters `[start, end)` of `text` with one font.
///
/// The full buffer is passed so engines can use surrounding characters as
/// shaping context.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRequest<'a> {
    pub text: TextBuffer<'a>,
    pub start: usize,
    pub end: usize,
    pub font: &'a Font,
    pub direction: TextDirection,
    pub script: Script,
}

impl ShapeRequest<'_> {
    pub fn chars(&self) -> &[char] {
        self.text.slice(self.start, self.end)
    }
}

/// A positioned glyph as produced by an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineGlyph {
    pub glyph_id: u32,
    /// Absolute index into the text buffer of the first character of the
    /// glyph's cluster.
    pub cluster: usize,
    /// Horizontal advance in pixels.
    pub advance: f32,
    pub offset: GlyphOffset,
}

impl EngineGlyph {
    pub fn is_notdef(&self) -> bool {
        self.glyph_id == NOTDEF_GLYPH
    }
}

/// Engine output for one request, glyphs in visual order.
///
/// For right-to-left requests the first glyph is the leftmost one, which maps
/// to the logically last cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineRun {
    pub glyphs: Vec<EngineGlyph>,
}

/// External shaping capability.
///
/// Implementations must be deterministic for identical inputs and must not
/// perform I/O inside `shape_range`; font data is expected to be loaded.
pub trait ShapingEngine: Send + Sync {
    fn shape_range(&self, request: &ShapeRequest<'_>) -> Result<EngineRun, EngineError>;
}
