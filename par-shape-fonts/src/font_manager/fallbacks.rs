//! Font fallback chain configuration.
//!
//! Fallback families are grouped by what they are good for. A hint's script
//! and fallback priority pick the groups to try first; [`FALLBACK_FAMILIES`]
//! is the general list tried after them.

use par_shape_core::{FontFallbackPriority, Script};

/// General fallback font families in priority order.
///
/// Searched after range fonts, group fonts and configured families.
pub const FALLBACK_FAMILIES: &[&str] = &[
    // Nerd Fonts (icon/symbol support)
    "JetBrainsMono Nerd Font",
    "FiraCode Nerd Font",
    "Hack Nerd Font",
    // Standard fonts
    "JetBrains Mono",
    "Fira Code",
    "Noto Sans",
    "DejaVu Sans",
    "Segoe UI",
    "Helvetica Neue",
    "Arial Unicode MS",
    "Arial",
    "Liberation Sans",
];

const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK JP",
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Hiragino Sans",
    "PingFang SC",
    "Microsoft YaHei",
    "MS Gothic",
    "SimHei",
];

const HANGUL_FAMILIES: &[&str] = &[
    "Noto Sans CJK KR",
    "Apple SD Gothic Neo",
    "Malgun Gothic",
];

const ARABIC_FAMILIES: &[&str] = &[
    "Noto Sans Arabic",
    "Noto Naskh Arabic",
    "Geeza Pro",
    "Segoe UI",
    "Tahoma",
];

const HEBREW_FAMILIES: &[&str] = &[
    "Noto Sans Hebrew",
    "Arial Hebrew",
    "David",
    "Segoe UI",
];

const INDIC_FAMILIES: &[&str] = &[
    "Noto Sans Devanagari",
    "Noto Sans Bengali",
    "Noto Sans Tamil",
    "Kohinoor Devanagari",
    "Nirmala UI",
    "Mangal",
];

const THAI_FAMILIES: &[&str] = &[
    "Noto Sans Thai",
    "Noto Sans Lao",
    "Thonburi",
    "Leelawadee UI",
    "Tahoma",
];

// Monochrome symbol fonts (outline rendering for dingbats and icons)
const SYMBOL_FAMILIES: &[&str] = &[
    "Symbols Nerd Font",
    "Apple Symbols",
    "Zapf Dingbats",
    "STIX Two Math",
    "Segoe UI Symbol",
    "Noto Sans Symbols",
    "Noto Sans Symbols 2",
    "Symbola",
];

// Color emoji fonts (flags, pictographs)
const EMOJI_FAMILIES: &[&str] = &["Noto Color Emoji", "Apple Color Emoji", "Segoe UI Emoji"];

/// A named group of fallback families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackGroup {
    Cjk,
    Hangul,
    Arabic,
    Hebrew,
    Indic,
    Thai,
    Symbols,
    Emoji,
}

impl FallbackGroup {
    pub const ALL: [FallbackGroup; 8] = [
        FallbackGroup::Cjk,
        FallbackGroup::Hangul,
        FallbackGroup::Arabic,
        FallbackGroup::Hebrew,
        FallbackGroup::Indic,
        FallbackGroup::Thai,
        FallbackGroup::Symbols,
        FallbackGroup::Emoji,
    ];

    /// Family names in this group, best first.
    pub fn families(self) -> &'static [&'static str] {
        match self {
            FallbackGroup::Cjk => CJK_FAMILIES,
            FallbackGroup::Hangul => HANGUL_FAMILIES,
            FallbackGroup::Arabic => ARABIC_FAMILIES,
            FallbackGroup::Hebrew => HEBREW_FAMILIES,
            FallbackGroup::Indic => INDIC_FAMILIES,
            FallbackGroup::Thai => THAI_FAMILIES,
            FallbackGroup::Symbols => SYMBOL_FAMILIES,
            FallbackGroup::Emoji => EMOJI_FAMILIES,
        }
    }

    /// Script-specific group, if the script has one.
    pub fn for_script(script: Script) -> Option<FallbackGroup> {
        match script {
            Script::Han | Script::Hiragana | Script::Katakana | Script::Bopomofo => {
                Some(FallbackGroup::Cjk)
            }
            Script::Hangul => Some(FallbackGroup::Hangul),
            Script::Arabic | Script::Syriac | Script::Thaana => Some(FallbackGroup::Arabic),
            Script::Hebrew => Some(FallbackGroup::Hebrew),
            Script::Devanagari
            | Script::Bengali
            | Script::Gurmukhi
            | Script::Gujarati
            | Script::Oriya
            | Script::Tamil
            | Script::Telugu
            | Script::Kannada
            | Script::Malayalam => Some(FallbackGroup::Indic),
            Script::Thai | Script::Lao => Some(FallbackGroup::Thai),
            _ => None,
        }
    }
}

/// Groups to try, in order, for a run with `priority` and `script`.
pub fn groups_for(priority: FontFallbackPriority, script: Script) -> Vec<FallbackGroup> {
    match priority {
        FontFallbackPriority::Text => FallbackGroup::for_script(script).into_iter().collect(),
        FontFallbackPriority::Symbols => vec![FallbackGroup::Symbols],
        FontFallbackPriority::EmojiText => vec![FallbackGroup::Symbols, FallbackGroup::Emoji],
        FontFallbackPriority::EmojiEmoji => vec![FallbackGroup::Emoji, FallbackGroup::Symbols],
    }
}
