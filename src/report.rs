//! Human and JSON reports for the CLI.

use par_shape_core::{
    CharacterProperties, Font, FontFallbackPriority, Glyph, GlyphRun, RunSegmenter, ShapeResult,
    TextDirection,
};
use serde::Serialize;

/// Everything `par-shape shape` knows about one shaped range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeReport {
    pub text: String,
    pub direction: &'static str,
    pub start: usize,
    pub end: usize,
    pub width: f32,
    pub num_glyphs: usize,
    /// Runs in visual order
    pub runs: Vec<RunReport>,
    /// Families used besides the primary font
    pub fallback_fonts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub font: String,
    pub font_size: f32,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub script: &'static str,
    pub width: f32,
    pub glyphs: Vec<GlyphReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlyphReport {
    pub glyph_id: u32,
    pub character_index: usize,
    pub advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub cluster_start: bool,
}

impl From<&Glyph> for GlyphReport {
    fn from(glyph: &Glyph) -> Self {
        Self {
            glyph_id: glyph.glyph_id,
            character_index: glyph.character_index,
            advance: glyph.advance,
            x_offset: glyph.offset.x,
            y_offset: glyph.offset.y,
            cluster_start: glyph.cluster_start,
        }
    }
}

impl RunReport {
    fn new(chars: &[char], run: &GlyphRun) -> Self {
        Self {
            font: run.font().family().to_string(),
            font_size: run.font().size(),
            start: run.start(),
            end: run.end(),
            text: chars[run.start()..run.end()].iter().collect(),
            script: run.script().full_name(),
            width: run.width(),
            glyphs: run.glyphs().iter().map(GlyphReport::from).collect(),
        }
    }
}

impl ShapeReport {
    /// Build a report for `result`, shaped from `chars` with `primary` first.
    pub fn new(chars: &[char], result: &ShapeResult, primary: &Font) -> Self {
        Self {
            text: chars[result.start()..result.end()].iter().collect(),
            direction: direction_name(result.direction()),
            start: result.start(),
            end: result.end(),
            width: result.width(),
            num_glyphs: result.num_glyphs(),
            runs: result
                .runs()
                .iter()
                .map(|run| RunReport::new(chars, run))
                .collect(),
            fallback_fonts: result
                .fallback_fonts(primary)
                .into_iter()
                .map(|font| font.family().to_string())
                .collect(),
        }
    }

    /// Plain-text table, one line per run.
    pub fn to_table(&self) -> String {
        let mut out = format!(
            "Shaped {} characters into {} glyphs, width {:.2}px ({})\n",
            self.end - self.start,
            self.num_glyphs,
            self.width,
            self.direction
        );
        out.push_str(&format!(
            "{:<4} {:<10} {:<24} {:<12} {:>6} {:>10}\n",
            "RUN", "RANGE", "FONT", "SCRIPT", "GLYPHS", "WIDTH"
        ));
        for (index, run) in self.runs.iter().enumerate() {
            out.push_str(&format!(
                "{:<4} {:<10} {:<24} {:<12} {:>6} {:>10.2}\n",
                index,
                format!("{}..{}", run.start, run.end),
                run.font,
                run.script,
                run.glyphs.len(),
                run.width
            ));
        }
        if !self.fallback_fonts.is_empty() {
            out.push_str(&format!(
                "Fallback fonts: {}\n",
                self.fallback_fonts.join(", ")
            ));
        }
        out
    }
}

/// One run from the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub script: &'static str,
    pub priority: &'static str,
}

/// Segment `chars` and describe every range.
pub fn segment_report(chars: &[char], properties: &dyn CharacterProperties) -> Vec<SegmentReport> {
    RunSegmenter::new(chars, properties)
        .map(|range| SegmentReport {
            start: range.start,
            end: range.end,
            text: chars[range.start..range.end].iter().collect(),
            script: range.script.full_name(),
            priority: priority_name(range.font_fallback_priority),
        })
        .collect()
}

/// Plain-text table of segment ranges.
pub fn segments_table(segments: &[SegmentReport]) -> String {
    let mut out = format!(
        "{:<10} {:<12} {:<12} {}\n",
        "RANGE", "SCRIPT", "PRIORITY", "TEXT"
    );
    for segment in segments {
        out.push_str(&format!(
            "{:<10} {:<12} {:<12} {}\n",
            format!("{}..{}", segment.start, segment.end),
            segment.script,
            segment.priority,
            segment.text
        ));
    }
    out
}

pub fn direction_name(direction: TextDirection) -> &'static str {
    match direction {
        TextDirection::Ltr => "ltr",
        TextDirection::Rtl => "rtl",
    }
}

pub fn priority_name(priority: FontFallbackPriority) -> &'static str {
    match priority {
        FontFallbackPriority::Text => "text",
        FontFallbackPriority::Symbols => "symbols",
        FontFallbackPriority::EmojiText => "emoji-text",
        FontFallbackPriority::EmojiEmoji => "emoji-emoji",
    }
}
