//! Unicode script and font-fallback-priority lookup.
//!
//! The segmenter asks two questions of every codepoint: which script it
//! belongs to and which fallback ordering it needs. Both answers come from a
//! [`CharacterProperties`] implementation so tests and platforms can supply
//! their own tables.

mod emoji;

use std::sync::Arc;

use unicode_script::{Script, UnicodeScript};

pub use emoji::{
    COMBINING_ENCLOSING_KEYCAP, EmojiTable, VARIATION_SELECTOR_EMOJI, VARIATION_SELECTOR_TEXT,
    ZERO_WIDTH_JOINER,
};

/// Which family of fallback fonts a run should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFallbackPriority {
    /// Regular text; use the primary font, then script fallbacks.
    #[default]
    Text,
    /// Private-use characters; prefer icon / symbol fonts.
    Symbols,
    /// Emoji with text presentation; prefer monochrome symbol fonts.
    EmojiText,
    /// Emoji with emoji presentation; prefer color emoji fonts.
    EmojiEmoji,
}

impl FontFallbackPriority {
    pub fn is_emoji(self) -> bool {
        matches!(
            self,
            FontFallbackPriority::EmojiText | FontFallbackPriority::EmojiEmoji
        )
    }
}

/// Pure per-codepoint property lookups used by the run segmenter.
pub trait CharacterProperties: Send + Sync {
    fn script_of(&self, c: char) -> Script;

    fn fallback_priority_of(&self, c: char) -> FontFallbackPriority;

    /// Emoji table used for cluster-level presentation decisions.
    fn emoji(&self) -> &EmojiTable;
}

/// [`CharacterProperties`] backed by `unicode-script` and an [`EmojiTable`].
#[derive(Debug, Clone)]
pub struct UnicodeProperties {
    emoji: Arc<EmojiTable>,
}

impl UnicodeProperties {
    pub fn new(emoji: Arc<EmojiTable>) -> Self {
        Self { emoji }
    }
}

impl Default for UnicodeProperties {
    fn default() -> Self {
        Self::new(EmojiTable::shared())
    }
}

impl CharacterProperties for UnicodeProperties {
    fn script_of(&self, c: char) -> Script {
        c.script()
    }

    fn fallback_priority_of(&self, c: char) -> FontFallbackPriority {
        if self.emoji.is_emoji_emoji_default(c) {
            FontFallbackPriority::EmojiEmoji
        } else if self.emoji.is_emoji_text_default(c) && !self.emoji.is_emoji_keycap_base(c) {
            FontFallbackPriority::EmojiText
        } else if is_private_use(c) {
            FontFallbackPriority::Symbols
        } else {
            FontFallbackPriority::Text
        }
    }

    fn emoji(&self) -> &EmojiTable {
        &self.emoji
    }
}

/// Private Use Area in the BMP and supplementary planes 15-16.
pub fn is_private_use(c: char) -> bool {
    matches!(c as u32,
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD
    )
}

/// Scripts that merge into whatever run surrounds them.
pub fn is_weak_script(script: Script) -> bool {
    matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_lookup() {
        let props = UnicodeProperties::default();
        assert_eq!(props.script_of('A'), Script::Latin);
        assert_eq!(props.script_of('\u{05D0}'), Script::Hebrew);
        assert_eq!(props.script_of('\u{4E00}'), Script::Han);
        assert_eq!(props.script_of(' '), Script::Common);
    }

    #[test]
    fn test_fallback_priority() {
        let props = UnicodeProperties::default();
        assert_eq!(props.fallback_priority_of('A'), FontFallbackPriority::Text);
        assert_eq!(
            props.fallback_priority_of('\u{1F600}'),
            FontFallbackPriority::EmojiEmoji
        );
        assert_eq!(
            props.fallback_priority_of('\u{2600}'),
            FontFallbackPriority::EmojiText
        );
        assert_eq!(
            props.fallback_priority_of('\u{E0B0}'),
            FontFallbackPriority::Symbols
        );
    }

    #[test]
    fn test_keycap_base_digits_stay_text() {
        let props = UnicodeProperties::default();
        assert_eq!(props.fallback_priority_of('7'), FontFallbackPriority::Text);
        assert_eq!(props.fallback_priority_of('#'), FontFallbackPriority::Text);
    }

    #[test]
    fn test_weak_scripts() {
        assert!(is_weak_script(Script::Common));
        assert!(is_weak_script(Script::Inherited));
        assert!(!is_weak_script(Script::Latin));
    }
}
