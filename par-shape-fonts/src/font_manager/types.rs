//! Font data types and structures for font management.

use std::sync::Arc;

use par_shape_core::FontId;
use swash::FontRef;

/// Owned font bytes plus the face index inside them.
///
/// Parsing is checked once on construction; [`FontData::font_ref`] borrows a
/// fresh `FontRef` for glyph lookups.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    /// Face index within the font data (0 for single-face fonts)
    pub face_index: u32,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// # Returns
    /// `Some(FontData)` if the font data is valid, `None` otherwise.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: u32) -> Option<Self> {
        FontRef::from_index(&data, face_index as usize)?;
        Some(FontData {
            data: Arc::new(data),
            face_index,
        })
    }

    /// Swash font reference for charmap and metrics lookups.
    pub fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index as usize)
    }

    /// Whether the font maps `c` to a real glyph.
    pub fn has_glyph(&self, c: char) -> bool {
        self.font_ref()
            .is_some_and(|font| font.charmap().map(c) != 0)
    }
}

/// Font mapping for a specific Unicode range.
///
/// This allows configuring specific fonts for certain character ranges,
/// such as CJK characters, emoji, or special symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeRangeFont {
    /// Start of Unicode range (inclusive)
    pub start: u32,
    /// End of Unicode range (inclusive)
    pub end: u32,
    /// Registered face for this range
    pub font_id: FontId,
}

impl UnicodeRangeFont {
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}
