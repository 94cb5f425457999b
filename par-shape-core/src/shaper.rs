//! Segment, shape and fall back.
//!
//! [`Shaper::shape`] splits the requested range into script / priority runs,
//! shapes each run with the caller's font and then re-shapes only the
//! characters that came back without glyphs ("holes") with fallback fonts
//! until everything is covered. Holes are processed from an explicit FIFO
//! worklist; every hole carries its own copy of the fallback iterator so two
//! holes in the same segment can end up with different fonts.

use std::collections::{BTreeMap, VecDeque};

use crate::engine::{EngineGlyph, EngineRun, ShapeRequest, ShapingEngine};
use crate::error::{EngineError, ShapeError};
use crate::fallback::{FontFallbackIterator, FontFallbackService};
use crate::font::Font;
use crate::properties::{
    CharacterProperties, VARIATION_SELECTOR_EMOJI, VARIATION_SELECTOR_TEXT, ZERO_WIDTH_JOINER,
};
use crate::segmenter::{RunSegmenter, RunSegmenterRange};
use crate::shape_result::{Glyph, GlyphRun, ShapeResult};
use crate::text::{TextBuffer, TextDirection};

/// Default number of fallback fonts tried per hole before the last resort.
pub const DEFAULT_MAX_FALLBACK_FONTS: usize = 32;

/// Default cap on distinct characters passed to the fallback service.
pub const DEFAULT_MAX_HINT_CHARS: usize = 16;

/// Tunables for [`Shaper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaperOptions {
    pub max_fallback_fonts: usize,
    pub max_hint_chars: usize,
}

impl Default for ShaperOptions {
    fn default() -> Self {
        Self {
            max_fallback_fonts: DEFAULT_MAX_FALLBACK_FONTS,
            max_hint_chars: DEFAULT_MAX_HINT_CHARS,
        }
    }
}

/// A range of a segment still waiting for glyphs.
#[derive(Debug, Clone)]
struct HolesQueueItem {
    start: usize,
    end: usize,
    fallback_depth: usize,
    fallback: FontFallbackIterator,
}

/// Shapes ranges of one borrowed text buffer.
///
/// The shaper holds no mutable state; a single instance can serve any number
/// of `shape` calls, from several threads.
pub struct Shaper<'a> {
    text: TextBuffer<'a>,
    engine: &'a dyn ShapingEngine,
    fonts: &'a dyn FontFallbackService,
    properties: &'a dyn CharacterProperties,
    options: ShaperOptions,
}

impl<'a> Shaper<'a> {
    pub fn new(
        text: &'a [char],
        engine: &'a dyn ShapingEngine,
        fonts: &'a dyn FontFallbackService,
        properties: &'a dyn CharacterProperties,
    ) -> Self {
        Self {
            text: TextBuffer::new(text),
            engine,
            fonts,
            properties,
            options: ShaperOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ShaperOptions) -> Self {
        self.options = options;
        self
    }

    pub fn text(&self) -> TextBuffer<'a> {
        self.text
    }

    pub fn options(&self) -> &ShaperOptions {
        &self.options
    }

    /// Shape characters `[start, end)` with `font` in `direction`.
    ///
    /// The returned result covers the whole range. Missing glyphs are filled
    /// in from fallback fonts and, as a last resort, placeholder glyphs.
    ///
    /// # Errors
    /// - [`ShapeError::InvalidRange`] if `start > end` or `end` is past the
    ///   end of the buffer
    /// - [`ShapeError::FallbackExhausted`] if the last-resort font could not
    ///   be shaped
    pub fn shape(
        &self,
        font: &Font,
        direction: TextDirection,
        start: usize,
        end: usize,
    ) -> Result<ShapeResult, ShapeError> {
        if start > end || end > self.text.len() {
            return Err(ShapeError::InvalidRange {
                start,
                end,
                length: self.text.len(),
            });
        }

        let mut result = ShapeResult::new(direction, start, end);
        if start == end {
            return Ok(result.finalize());
        }

        let slice = self.text.slice(start, end);
        for segment in RunSegmenter::new(slice, self.properties) {
            let segment = segment.offset_by(start);
            log::trace!(
                "Segment {}..{} script={:?} priority={:?}",
                segment.start,
                segment.end,
                segment.script,
                segment.font_fallback_priority
            );
            let segment_result = self.shape_segment(font, direction, &segment)?;
            result.append_result(segment_result);
        }

        Ok(result.finalize())
    }

    /// Shape the whole buffer.
    pub fn shape_all(&self, font: &Font, direction: TextDirection) -> Result<ShapeResult, ShapeError> {
        self.shape(font, direction, 0, self.text.len())
    }

    fn shape_segment(
        &self,
        font: &Font,
        direction: TextDirection,
        segment: &RunSegmenterRange,
    ) -> Result<ShapeResult, ShapeError> {
        let mut result = ShapeResult::new(direction, segment.start, segment.end);
        let mut holes = VecDeque::new();
        holes.push_back(HolesQueueItem {
            start: segment.start,
            end: segment.end,
            fallback_depth: 0,
            fallback: FontFallbackIterator::new(
                font.clone(),
                segment.font_fallback_priority,
                segment.script,
                self.options.max_fallback_fonts,
            ),
        });

        while let Some(mut hole) = holes.pop_front() {
            let hint = self.hint_chars(hole.start, hole.end);
            let (current, is_last_resort) = match hole.fallback.next(self.fonts, &hint) {
                Some(next) => (next, false),
                None => (self.fonts.last_resort_font(font), true),
            };
            log::trace!(
                "Shaping {}..{} with '{}' (depth {}, last resort: {})",
                hole.start,
                hole.end,
                current.family(),
                hole.fallback_depth,
                is_last_resort
            );

            let request = ShapeRequest {
                text: self.text,
                start: hole.start,
                end: hole.end,
                font: &current,
                direction,
                script: segment.script,
            };

            let run = match self.engine.shape_range(&request) {
                Ok(run) => run,
                Err(source) if is_last_resort => {
                    return Err(ShapeError::FallbackExhausted {
                        start: hole.start,
                        end: hole.end,
                        font: current.family().to_string(),
                        source,
                    });
                }
                Err(e) => {
                    log::debug!(
                        "Engine failed for {}..{} with '{}': {}",
                        hole.start,
                        hole.end,
                        current.family(),
                        e
                    );
                    hole.fallback_depth = hole.fallback.depth();
                    holes.push_back(hole);
                    continue;
                }
            };

            let missing = self.extract_shape_results(&request, &run, is_last_resort, &mut result);
            if missing.is_empty() {
                continue;
            }
            if is_last_resort {
                let (start, end) = missing[0];
                return Err(ShapeError::FallbackExhausted {
                    start,
                    end,
                    font: current.family().to_string(),
                    source: EngineError::MissingCoverage { start, end },
                });
            }
            for (start, end) in missing {
                holes.push_back(HolesQueueItem {
                    start,
                    end,
                    fallback_depth: hole.fallback.depth(),
                    fallback: hole.fallback.clone(),
                });
            }
        }

        Ok(result.finalize())
    }

    /// Distinct characters of `[start, end)` for the fallback service.
    ///
    /// Joiners and presentation selectors are left out; no font needs to
    /// cover them for the sequence to render.
    fn hint_chars(&self, start: usize, end: usize) -> Vec<char> {
        let mut hint = Vec::new();
        for &c in self.text.slice(start, end) {
            if hint.len() == self.options.max_hint_chars {
                break;
            }
            if matches!(
                c,
                ZERO_WIDTH_JOINER | VARIATION_SELECTOR_TEXT | VARIATION_SELECTOR_EMOJI
            ) || hint.contains(&c)
            {
                continue;
            }
            hint.push(c);
        }
        hint
    }

    /// Merge covered clusters of `run` into `result` and return the ranges
    /// that still lack glyphs, in logical order.
    ///
    /// With the last-resort font every cluster counts as covered, notdef
    /// glyphs included.
    fn extract_shape_results(
        &self,
        request: &ShapeRequest<'_>,
        run: &EngineRun,
        is_last_resort: bool,
        result: &mut ShapeResult,
    ) -> Vec<(usize, usize)> {
        let (start, end) = (request.start, request.end);
        let clusters = group_clusters(&run.glyphs, start, end);

        let Some(&first_cluster) = clusters.keys().next() else {
            return vec![(start, end)];
        };

        // (cluster start, cluster end, covered)
        let mut spans: Vec<(usize, usize, bool)> = Vec::with_capacity(clusters.len() + 1);
        if first_cluster > start && !is_last_resort {
            spans.push((start, first_cluster, false));
        }
        let keys: Vec<usize> = clusters.keys().copied().collect();
        for (i, &key) in keys.iter().enumerate() {
            let cluster_start = if i == 0 && is_last_resort { start } else { key };
            let cluster_end = keys.get(i + 1).copied().unwrap_or(end);
            let covered = is_last_resort || !clusters[&key].iter().any(EngineGlyph::is_notdef);
            spans.push((cluster_start, cluster_end, covered));
        }

        let mut missing = Vec::new();
        let mut i = 0;
        while i < spans.len() {
            let covered = spans[i].2;
            let group_start = spans[i].0;
            let mut j = i;
            while j + 1 < spans.len() && spans[j + 1].2 == covered {
                j += 1;
            }
            let group_end = spans[j].1;

            if covered {
                let glyphs = visual_glyphs(&clusters, group_start, group_end, request.direction);
                result.merge_font_run(GlyphRun::new(
                    request.font.clone(),
                    request.direction,
                    request.script,
                    group_start,
                    group_end,
                    glyphs,
                ));
            } else {
                log::trace!("Hole {}..{} in '{}'", group_start, group_end, request.font.family());
                missing.push((group_start, group_end));
            }
            i = j + 1;
        }
        missing
    }
}

/// Engine glyphs keyed by cluster start, each list in engine (visual) order.
///
/// Cluster indices outside `[start, end)` are clamped into it.
fn group_clusters(glyphs: &[EngineGlyph], start: usize, end: usize) -> BTreeMap<usize, Vec<EngineGlyph>> {
    let mut clusters: BTreeMap<usize, Vec<EngineGlyph>> = BTreeMap::new();
    if start == end {
        return clusters;
    }
    for glyph in glyphs {
        let cluster = glyph.cluster.clamp(start, end - 1);
        clusters.entry(cluster).or_default().push(EngineGlyph { cluster, ..*glyph });
    }
    clusters
}

/// Glyphs for clusters in `[start, end)`, left to right.
fn visual_glyphs(
    clusters: &BTreeMap<usize, Vec<EngineGlyph>>,
    start: usize,
    end: usize,
    direction: TextDirection,
) -> Vec<Glyph> {
    let to_glyph = |g: &EngineGlyph| Glyph::new(g.glyph_id, g.advance, g.offset, g.cluster);
    let in_range = clusters.range(start..end);
    match direction {
        TextDirection::Ltr => in_range.flat_map(|(_, gs)| gs.iter().map(to_glyph)).collect(),
        TextDirection::Rtl => in_range
            .rev()
            .flat_map(|(_, gs)| gs.iter().map(to_glyph))
            .collect(),
    }
}
