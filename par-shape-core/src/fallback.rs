//! Font fallback candidate iteration.
//!
//! A [`FontFallbackIterator`] hands out fonts for one range of text: the
//! primary font first, then whatever the [`FontFallbackService`] proposes for
//! the characters that are still missing. Each candidate is checked against
//! those characters before it is returned, and no face is returned twice.

use std::collections::HashSet;

use unicode_script::Script;

use crate::error::FontLookupError;
use crate::font::{Font, FontId};
use crate::properties::FontFallbackPriority;

/// What the characters still lacking glyphs look like.
#[derive(Debug, Clone, Copy)]
pub struct FallbackHint<'a> {
    /// Distinct codepoints from the hole being filled.
    pub chars: &'a [char],
    pub priority: FontFallbackPriority,
    pub script: Script,
}

/// Platform font enumeration and last-resort provider.
///
/// Implementations may cache internally but must be safe to query from
/// several threads at once.
pub trait FontFallbackService: Send + Sync {
    /// Candidate fonts for `hint`, best first.
    fn candidates_for(&self, primary: &Font, hint: &FallbackHint<'_>) -> Vec<Font>;

    /// Whether `font` maps `c` to a real glyph.
    fn covers(&self, font: &Font, c: char) -> Result<bool, FontLookupError>;

    /// A font that always yields some glyph, even if only a placeholder box.
    fn last_resort_font(&self, primary: &Font) -> Font;
}

/// Ordered, lazy sequence of fonts to try for one range.
///
/// Cloning the iterator forks its state: both copies remember every face
/// returned so far and continue independently.
#[derive(Debug, Clone)]
pub struct FontFallbackIterator {
    primary: Font,
    priority: FontFallbackPriority,
    script: Script,
    rejected: HashSet<FontId>,
    /// Number of fonts returned, the primary included.
    depth: usize,
    max_fallback_fonts: usize,
    exhausted: bool,
}

impl FontFallbackIterator {
    /// # Arguments
    /// * `primary` - Font returned first
    /// * `priority` - Fallback priority of the range being shaped
    /// * `script` - Resolved script of the range
    /// * `max_fallback_fonts` - Fonts returned in total, the primary included
    pub fn new(
        primary: Font,
        priority: FontFallbackPriority,
        script: Script,
        max_fallback_fonts: usize,
    ) -> Self {
        Self {
            primary,
            priority,
            script,
            rejected: HashSet::new(),
            depth: 0,
            max_fallback_fonts,
            exhausted: false,
        }
    }

    /// Fonts returned so far, the primary included.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn primary(&self) -> &Font {
        &self.primary
    }

    /// Next font to try for `hint_chars`, or `None` once the list is used up.
    ///
    /// A candidate whose coverage cannot be determined is logged and skipped;
    /// it never aborts iteration.
    pub fn next(&mut self, service: &dyn FontFallbackService, hint_chars: &[char]) -> Option<Font> {
        if self.exhausted {
            return None;
        }

        if self.depth == 0 {
            self.depth = 1;
            self.rejected.insert(self.primary.id());
            return Some(self.primary.clone());
        }

        if self.depth >= self.max_fallback_fonts {
            self.exhausted = true;
            return None;
        }

        let hint = FallbackHint {
            chars: hint_chars,
            priority: self.priority,
            script: self.script,
        };
        for candidate in service.candidates_for(&self.primary, &hint) {
            if self.rejected.contains(&candidate.id()) {
                continue;
            }
            match contributes(service, &candidate, hint_chars) {
                Ok(true) => {
                    self.rejected.insert(candidate.id());
                    self.depth += 1;
                    log::debug!(
                        "Fallback depth {}: '{}' for {:?}",
                        self.depth - 1,
                        candidate.family(),
                        hint_chars
                    );
                    return Some(candidate);
                }
                Ok(false) => {
                    log::trace!("'{}' covers none of {:?}", candidate.family(), hint_chars);
                }
                Err(e) => {
                    log::warn!("Skipping fallback font '{}': {}", candidate.family(), e);
                    self.rejected.insert(candidate.id());
                }
            }
        }

        log::debug!("Font fallback exhausted for {:?}", hint_chars);
        self.exhausted = true;
        None
    }
}

/// A font contributes if it covers at least one hint character.
///
/// With no hint characters every font qualifies.
fn contributes(
    service: &dyn FontFallbackService,
    font: &Font,
    hint_chars: &[char],
) -> Result<bool, FontLookupError> {
    if hint_chars.is_empty() {
        return Ok(true);
    }
    for &c in hint_chars {
        if service.covers(font, c)? {
            return Ok(true);
        }
    }
    Ok(false)
}
