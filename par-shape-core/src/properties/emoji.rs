//! Emoji property lookups backed by ICU4X compiled Unicode data.
//!
//! [`EmojiTable::shared`] resolves the property sets once, on first use, and
//! hands out a shared read-only reference that any number of threads may
//! query.

use std::fmt;
use std::sync::{Arc, OnceLock};

use icu_properties::props::{Emoji, EmojiModifier, EmojiModifierBase, EmojiPresentation, RegionalIndicator};
use icu_properties::{CodePointSetData, CodePointSetDataBorrowed};

pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
pub const VARIATION_SELECTOR_TEXT: char = '\u{FE0E}';
pub const VARIATION_SELECTOR_EMOJI: char = '\u{FE0F}';
pub const COMBINING_ENCLOSING_KEYCAP: char = '\u{20E3}';

static SHARED: OnceLock<Arc<EmojiTable>> = OnceLock::new();

/// Read-only emoji classification table.
#[derive(Clone, Copy)]
pub struct EmojiTable {
    emoji: CodePointSetDataBorrowed<'static>,
    presentation: CodePointSetDataBorrowed<'static>,
    modifier: CodePointSetDataBorrowed<'static>,
    modifier_base: CodePointSetDataBorrowed<'static>,
    regional_indicator: CodePointSetDataBorrowed<'static>,
}

impl fmt::Debug for EmojiTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmojiTable").finish_non_exhaustive()
    }
}

impl EmojiTable {
    /// Build a fresh table. Prefer [`EmojiTable::shared`].
    pub fn new() -> Self {
        Self {
            emoji: CodePointSetData::new::<Emoji>(),
            presentation: CodePointSetData::new::<EmojiPresentation>(),
            modifier: CodePointSetData::new::<EmojiModifier>(),
            modifier_base: CodePointSetData::new::<EmojiModifierBase>(),
            regional_indicator: CodePointSetData::new::<RegionalIndicator>(),
        }
    }

    /// Process-wide table, initialized on first call.
    pub fn shared() -> Arc<EmojiTable> {
        Arc::clone(SHARED.get_or_init(|| {
            log::debug!("Initializing emoji property table");
            Arc::new(EmojiTable::new())
        }))
    }

    pub fn is_emoji(&self, c: char) -> bool {
        self.emoji.contains(c)
    }

    /// Emoji that render as text unless followed by U+FE0F.
    pub fn is_emoji_text_default(&self, c: char) -> bool {
        self.emoji.contains(c) && !self.presentation.contains(c)
    }

    /// Emoji that render as color emoji by default.
    pub fn is_emoji_emoji_default(&self, c: char) -> bool {
        self.presentation.contains(c)
    }

    pub fn is_emoji_modifier_base(&self, c: char) -> bool {
        self.modifier_base.contains(c)
    }

    /// Fitzpatrick skin tone modifiers.
    pub fn is_emoji_modifier(&self, c: char) -> bool {
        self.modifier.contains(c)
    }

    /// Characters that only become emoji when followed by U+FE0F or U+20E3.
    pub fn is_emoji_keycap_base(&self, c: char) -> bool {
        c.is_ascii_digit() || c == '#' || c == '*'
    }

    pub fn is_regional_indicator(&self, c: char) -> bool {
        self.regional_indicator.contains(c)
    }
}

impl Default for EmojiTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_presentation() {
        let table = EmojiTable::new();
        assert!(table.is_emoji_emoji_default('\u{1F600}'));
        assert!(table.is_emoji('\u{1F600}'));
        assert!(!table.is_emoji_text_default('\u{1F600}'));
    }

    #[test]
    fn test_recent_emoji_have_emoji_presentation() {
        let table = EmojiTable::new();
        // Smiling face with hearts, adult, exploding head, melting face
        for c in ['\u{1F970}', '\u{1F9D1}', '\u{1F92F}', '\u{1FAE0}'] {
            assert!(table.is_emoji_emoji_default(c), "{c:?} should be emoji");
        }
    }

    #[test]
    fn test_text_default_emoji() {
        let table = EmojiTable::new();
        // COPYRIGHT SIGN and BLACK SUN WITH RAYS render as text by default
        assert!(table.is_emoji_text_default('\u{00A9}'));
        assert!(table.is_emoji_text_default('\u{2600}'));
        assert!(!table.is_emoji_emoji_default('\u{2600}'));
    }

    #[test]
    fn test_plain_text_is_not_emoji() {
        let table = EmojiTable::new();
        for c in ['A', 'z', ' ', '\u{05D0}', '\u{4E00}'] {
            assert!(!table.is_emoji(c), "{c:?} should not be emoji");
        }
    }

    #[test]
    fn test_keycap_and_regional_indicators() {
        let table = EmojiTable::new();
        assert!(table.is_emoji_keycap_base('7'));
        assert!(table.is_emoji_keycap_base('#'));
        assert!(!table.is_emoji_keycap_base('A'));
        assert!(table.is_regional_indicator('\u{1F1FA}'));
        assert!(!table.is_regional_indicator('\u{1F600}'));
    }

    #[test]
    fn test_modifiers() {
        let table = EmojiTable::new();
        assert!(table.is_emoji_modifier_base('\u{1F44B}'));
        assert!(!table.is_emoji_modifier_base('\u{1F600}'));
        assert!(table.is_emoji_modifier('\u{1F3FD}'));
        assert!(!table.is_emoji_modifier('\u{1F600}'));
    }

    #[test]
    fn test_shared_table_is_reused() {
        let a = EmojiTable::shared();
        let b = EmojiTable::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
