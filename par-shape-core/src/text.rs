//! Borrowed text buffer and run direction.

/// Writing direction of a shaped run.
///
/// Only run-level direction is consumed; paragraph-level bidi reordering is
/// the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_ltr(self) -> bool {
        self == TextDirection::Ltr
    }

    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}

/// Immutable view of the codepoints being shaped.
///
/// All character indices used by the kernel (segment bounds, hole bounds,
/// glyph `character_index`) are codepoint indices into this buffer.
#[derive(Debug, Clone, Copy)]
pub struct TextBuffer<'a> {
    chars: &'a [char],
}

impl<'a> TextBuffer<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters in `[start, end)`.
    ///
    /// # Panics
    /// Panics if the range is out of bounds; callers validate ranges first.
    pub fn slice(&self, start: usize, end: usize) -> &'a [char] {
        &self.chars[start..end]
    }
}
