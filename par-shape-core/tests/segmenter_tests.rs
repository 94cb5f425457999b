//! Integration tests for run segmentation.

use par_shape_core::{
    CharacterProperties, EmojiTable, FontFallbackPriority, RunSegmenter, RunSegmenterRange, Script,
    UnicodeProperties,
};

fn segments(text: &str) -> Vec<RunSegmenterRange> {
    let chars: Vec<char> = text.chars().collect();
    let props = UnicodeProperties::default();
    RunSegmenter::new(&chars, &props).collect()
}

fn summary(text: &str) -> Vec<(usize, usize, Script, FontFallbackPriority)> {
    segments(text)
        .into_iter()
        .map(|r| (r.start, r.end, r.script, r.font_fallback_priority))
        .collect()
}

#[test]
fn test_latin_then_han() {
    assert_eq!(
        summary("abc \u{4F60}\u{597D}"),
        vec![
            (0, 4, Script::Latin, FontFallbackPriority::Text),
            (4, 6, Script::Han, FontFallbackPriority::Text),
        ]
    );
}

#[test]
fn test_combining_mark_stays_with_base() {
    // e + combining acute, then Greek
    let ranges = summary("e\u{0301}\u{03B1}");
    assert_eq!(ranges[0].0..ranges[0].1, 0..2);
    assert_eq!(ranges[0].2, Script::Latin);
    assert_eq!(ranges[1].2, Script::Greek);
}

#[test]
fn test_private_use_is_symbols() {
    let ranges = summary("git \u{E0A0} main");
    let priorities: Vec<FontFallbackPriority> = ranges.iter().map(|r| r.3).collect();
    assert_eq!(
        priorities,
        vec![
            FontFallbackPriority::Text,
            FontFallbackPriority::Symbols,
            FontFallbackPriority::Text,
        ]
    );
}

#[test]
fn test_skin_tone_sequence_is_one_emoji_run() {
    let ranges = summary("\u{1F44B}\u{1F3FD}");
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].1, 2);
    assert_eq!(ranges[0].3, FontFallbackPriority::EmojiEmoji);
}

#[test]
fn test_recent_emoji_starts_emoji_run() {
    // U+1F970 SMILING FACE WITH HEARTS (Unicode 11)
    let ranges = summary("A\u{1F970}");
    assert_eq!(ranges.len(), 2, "emoji must not merge into the Latin run");
    assert_eq!((ranges[0].0, ranges[0].1), (0, 1));
    assert_eq!(ranges[0].3, FontFallbackPriority::Text);
    assert_eq!((ranges[1].0, ranges[1].1), (1, 2));
    assert_eq!(ranges[1].3, FontFallbackPriority::EmojiEmoji);
}

#[test]
fn test_recent_emoji_are_emoji_presentation() {
    let props = UnicodeProperties::default();
    for c in ['\u{1F970}', '\u{1F9D1}', '\u{1F92F}', '\u{1FAE0}'] {
        assert_eq!(
            props.fallback_priority_of(c),
            FontFallbackPriority::EmojiEmoji,
            "{c:?} should prefer color emoji fonts"
        );
    }
}

#[test]
fn test_flag_is_one_emoji_cluster() {
    // Regional indicators U and S
    let ranges = summary("a\u{1F1FA}\u{1F1F8}");
    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[1].0, ranges[1].1), (1, 3));
    assert_eq!(ranges[1].3, FontFallbackPriority::EmojiEmoji);
}

#[test]
fn test_text_default_emoji_with_selector() {
    // U+2764 HEAVY BLACK HEART defaults to text presentation
    assert_eq!(
        summary("\u{2764}")[0].3,
        FontFallbackPriority::EmojiText
    );
    assert_eq!(
        summary("\u{2764}\u{FE0F}")[0].3,
        FontFallbackPriority::EmojiEmoji
    );
}

#[test]
fn test_plain_digits_are_text() {
    assert_eq!(summary("2024"), vec![(0, 4, Script::Common, FontFallbackPriority::Text)]);
}

#[test]
fn test_ranges_are_maximal() {
    let ranges = segments("one two three \u{05D0}\u{05D1} four");
    for pair in ranges.windows(2) {
        let same = pair[0].script == pair[1].script
            && pair[0].font_fallback_priority == pair[1].font_fallback_priority;
        assert!(!same, "adjacent ranges {:?} and {:?} should have merged", pair[0], pair[1]);
    }
}

#[test]
fn test_custom_properties() {
    /// Treats every character as Greek text.
    struct AllGreek(std::sync::Arc<EmojiTable>);

    impl CharacterProperties for AllGreek {
        fn script_of(&self, _c: char) -> Script {
            Script::Greek
        }

        fn fallback_priority_of(&self, _c: char) -> FontFallbackPriority {
            FontFallbackPriority::Text
        }

        fn emoji(&self) -> &EmojiTable {
            &self.0
        }
    }

    let chars: Vec<char> = "abc \u{05D0}".chars().collect();
    let props = AllGreek(EmojiTable::shared());
    let ranges: Vec<RunSegmenterRange> = RunSegmenter::new(&chars, &props).collect();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].script, Script::Greek);
}
