//! Run segmentation by script and font-fallback priority.
//!
//! The segmenter walks the text once, one extended grapheme cluster at a time,
//! and yields maximal ranges that can be shaped with a single script and a
//! single fallback ordering. Boundaries never fall inside a grapheme cluster,
//! so a base character always stays with its combining marks, variation
//! selectors and ZWJ continuations.
//!
//! Script resolution follows the usual run-merging rules:
//! - `Common` / `Inherited` characters join the run they appear in
//! - a run that starts with weak characters adopts the first real script
//! - a closing bracket takes the script of its matching opening bracket

use unicode_script::Script;
use unicode_segmentation::UnicodeSegmentation;

use crate::properties::{
    COMBINING_ENCLOSING_KEYCAP, CharacterProperties, FontFallbackPriority,
    VARIATION_SELECTOR_EMOJI, VARIATION_SELECTOR_TEXT, ZERO_WIDTH_JOINER, is_weak_script,
};

/// Deepest bracket nesting tracked for script pairing.
const MAX_BRACKET_DEPTH: usize = 32;

/// Paired brackets whose closing half inherits the opening half's script.
const BRACKET_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{2329}', '\u{232A}'),
    ('\u{3008}', '\u{3009}'),
    ('\u{300A}', '\u{300B}'),
    ('\u{300C}', '\u{300D}'),
    ('\u{300E}', '\u{300F}'),
    ('\u{3010}', '\u{3011}'),
    ('\u{FF08}', '\u{FF09}'),
    ('\u{FF3B}', '\u{FF3D}'),
];

/// A maximal range of text sharing script and fallback priority.
///
/// `start` and `end` are codepoint indices relative to the text handed to the
/// segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSegmenterRange {
    pub start: usize,
    pub end: usize,
    pub script: Script,
    pub font_fallback_priority: FontFallbackPriority,
}

impl RunSegmenterRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The same range shifted by `offset` characters.
    pub fn offset_by(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    closing: char,
    script: Script,
}

/// Lazy iterator over [`RunSegmenterRange`]s.
///
/// Once consumed it cannot be resumed; build a new segmenter to start over.
pub struct RunSegmenter<'a> {
    text: &'a [char],
    properties: &'a dyn CharacterProperties,
    /// Cluster boundaries as codepoint indices, including 0 and `text.len()`.
    boundaries: Vec<usize>,
    next_cluster: usize,
    pending: Option<RunSegmenterRange>,
    brackets: Vec<OpenBracket>,
}

impl<'a> RunSegmenter<'a> {
    pub fn new(text: &'a [char], properties: &'a dyn CharacterProperties) -> Self {
        Self {
            text,
            properties,
            boundaries: cluster_boundaries(text),
            next_cluster: 0,
            pending: None,
            brackets: Vec::new(),
        }
    }

    /// Resolve the script of one cluster, applying bracket pairing.
    fn cluster_script(&mut self, cluster: &[char], run_script: Option<Script>) -> Script {
        let script = cluster
            .iter()
            .map(|&c| self.properties.script_of(c))
            .find(|&s| !is_weak_script(s))
            .unwrap_or(Script::Common);

        if !is_weak_script(script) || cluster.len() != 1 {
            return script;
        }

        let c = cluster[0];
        if let Some(&(_, closing)) = BRACKET_PAIRS.iter().find(|(open, _)| *open == c) {
            if self.brackets.len() == MAX_BRACKET_DEPTH {
                self.brackets.remove(0);
            }
            self.brackets.push(OpenBracket {
                closing,
                script: run_script.unwrap_or(Script::Common),
            });
        } else if let Some(pos) = self.brackets.iter().rposition(|b| b.closing == c) {
            let paired = self.brackets[pos].script;
            self.brackets.truncate(pos);
            return paired;
        }
        Script::Common
    }

    /// Brackets opened while the run was still weak belong to the run's
    /// eventual script.
    fn resolve_open_brackets(&mut self, script: Script) {
        for bracket in self.brackets.iter_mut() {
            if is_weak_script(bracket.script) {
                bracket.script = script;
            }
        }
    }

    fn cluster_priority(&self, cluster: &[char]) -> FontFallbackPriority {
        let emoji = self.properties.emoji();
        let Some(&base) = cluster.first() else {
            return FontFallbackPriority::Text;
        };

        if cluster.contains(&VARIATION_SELECTOR_TEXT) {
            return if emoji.is_emoji(base) {
                FontFallbackPriority::EmojiText
            } else {
                self.properties.fallback_priority_of(base)
            };
        }

        let emoji_variant =
            cluster.contains(&VARIATION_SELECTOR_EMOJI) || cluster.contains(&COMBINING_ENCLOSING_KEYCAP);
        if emoji.is_emoji_keycap_base(base) {
            return if emoji_variant {
                FontFallbackPriority::EmojiEmoji
            } else {
                FontFallbackPriority::Text
            };
        }
        if emoji_variant && emoji.is_emoji(base) {
            return FontFallbackPriority::EmojiEmoji;
        }
        if cluster.len() > 1
            && cluster.contains(&ZERO_WIDTH_JOINER)
            && cluster.iter().any(|&c| emoji.is_emoji(c))
        {
            return FontFallbackPriority::EmojiEmoji;
        }
        if emoji.is_emoji_modifier_base(base) && cluster[1..].iter().any(|&c| emoji.is_emoji_modifier(c)) {
            return FontFallbackPriority::EmojiEmoji;
        }
        // Flag: a pair of regional indicators
        if cluster.len() == 2 && cluster.iter().all(|&c| emoji.is_regional_indicator(c)) {
            return FontFallbackPriority::EmojiEmoji;
        }
        self.properties.fallback_priority_of(base)
    }
}

impl Iterator for RunSegmenter<'_> {
    type Item = RunSegmenterRange;

    fn next(&mut self) -> Option<RunSegmenterRange> {
        while self.next_cluster + 1 < self.boundaries.len() {
            let start = self.boundaries[self.next_cluster];
            let end = self.boundaries[self.next_cluster + 1];
            self.next_cluster += 1;

            let text = self.text;
            let cluster = &text[start..end];
            let priority = self.cluster_priority(cluster);
            let run_script = self.pending.map(|run| run.script);
            let script = self.cluster_script(cluster, run_script);

            let Some(mut run) = self.pending else {
                self.pending = Some(RunSegmenterRange {
                    start,
                    end,
                    script,
                    font_fallback_priority: priority,
                });
                continue;
            };

            let mergeable = run.font_fallback_priority == priority
                && (is_weak_script(script) || is_weak_script(run.script) || script == run.script);
            if mergeable {
                if is_weak_script(run.script) && !is_weak_script(script) {
                    run.script = script;
                    self.resolve_open_brackets(script);
                }
                run.end = end;
                self.pending = Some(run);
                continue;
            }

            self.pending = Some(RunSegmenterRange {
                start,
                end,
                script,
                font_fallback_priority: priority,
            });
            return Some(run);
        }
        self.pending.take()
    }
}

/// Extended grapheme cluster boundaries of `text`, in codepoint indices.
fn cluster_boundaries(text: &[char]) -> Vec<usize> {
    if text.is_empty() {
        return Vec::new();
    }
    let joined: String = text.iter().collect();
    let mut boundaries = Vec::with_capacity(text.len() + 1);
    let mut index = 0;
    boundaries.push(0);
    for grapheme in joined.graphemes(true) {
        index += grapheme.chars().count();
        boundaries.push(index);
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::UnicodeProperties;

    fn segments(text: &str) -> Vec<RunSegmenterRange> {
        let chars: Vec<char> = text.chars().collect();
        let props = UnicodeProperties::default();
        RunSegmenter::new(&chars, &props).collect()
    }

    #[test]
    fn test_empty_text_has_no_ranges() {
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_single_char() {
        let ranges = segments("A");
        assert_eq!(ranges.len(), 1);
        assert_eq!((ranges[0].start, ranges[0].end), (0, 1));
        assert_eq!(ranges[0].script, Script::Latin);
    }

    #[test]
    fn test_latin_with_spaces_is_one_run() {
        let ranges = segments("Hello, world 42!");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, 16);
        assert_eq!(ranges[0].font_fallback_priority, FontFallbackPriority::Text);
    }

    #[test]
    fn test_leading_common_adopts_script() {
        let ranges = segments("  abc");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].script, Script::Latin);
    }

    #[test]
    fn test_script_change_splits() {
        let ranges = segments("abc\u{05D0}\u{05D1}");
        assert_eq!(ranges.len(), 2);
        assert_eq!((ranges[0].start, ranges[0].end), (0, 3));
        assert_eq!(ranges[0].script, Script::Latin);
        assert_eq!((ranges[1].start, ranges[1].end), (3, 5));
        assert_eq!(ranges[1].script, Script::Hebrew);
    }

    #[test]
    fn test_closing_bracket_returns_to_opening_script() {
        // a (אב) b
        let ranges = segments("a (\u{05D0}\u{05D1}) b");
        let scripts: Vec<_> = ranges.iter().map(|r| (r.start, r.end, r.script)).collect();
        assert_eq!(
            scripts,
            vec![
                (0, 3, Script::Latin),
                (3, 5, Script::Hebrew),
                (5, 8, Script::Latin),
            ]
        );
    }

    #[test]
    fn test_emoji_splits_priority() {
        let ranges = segments("A\u{1F600}");
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].font_fallback_priority, FontFallbackPriority::Text);
        assert_eq!(
            ranges[1].font_fallback_priority,
            FontFallbackPriority::EmojiEmoji
        );
    }

    #[test]
    fn test_keycap_sequence_is_emoji() {
        let ranges = segments("1\u{FE0F}\u{20E3}");
        assert_eq!(ranges.len(), 1);
        assert_eq!(
            ranges[0].font_fallback_priority,
            FontFallbackPriority::EmojiEmoji
        );
    }

    #[test]
    fn test_text_presentation_selector() {
        let ranges = segments("\u{1F600}\u{FE0E}");
        assert_eq!(ranges.len(), 1);
        assert_eq!(
            ranges[0].font_fallback_priority,
            FontFallbackPriority::EmojiText
        );
    }

    #[test]
    fn test_zwj_sequence_is_not_split() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let ranges = segments(family);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, 5);
    }

    #[test]
    fn test_ranges_cover_text() {
        let text = "Hi \u{05E9}\u{05DC}\u{05D5}\u{05DD} \u{4F60}\u{597D} \u{1F44B}\u{1F3FD}!";
        let ranges = segments(text);
        let mut expected_start = 0;
        for range in &ranges {
            assert_eq!(range.start, expected_start);
            assert!(range.end > range.start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, text.chars().count());
    }
}
