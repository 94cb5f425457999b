//! Shaped glyph runs and the accumulator that stitches them together.
//!
//! A [`ShapeResult`] starts empty for a character range and is filled with
//! [`GlyphRun`]s as fallback attempts cover pieces of that range. Runs are
//! kept in visual order at all times, so a finished result can be drawn by
//! walking `runs()` left to right.

use unicode_script::Script;

use crate::font::Font;
use crate::text::TextDirection;

/// Glyph displacement from its pen position, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphOffset {
    pub x: f32,
    pub y: f32,
}

/// A positioned glyph inside a [`GlyphRun`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub glyph_id: u32,
    pub advance: f32,
    pub offset: GlyphOffset,
    /// Absolute index of the first character of this glyph's cluster.
    pub character_index: usize,
    /// True for the first glyph (in visual order) of each cluster.
    pub cluster_start: bool,
}

impl Glyph {
    pub fn new(glyph_id: u32, advance: f32, offset: GlyphOffset, character_index: usize) -> Self {
        Self {
            glyph_id,
            advance,
            offset,
            character_index,
            cluster_start: false,
        }
    }
}

/// Glyphs for a contiguous character range shaped with a single font.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    font: Font,
    direction: TextDirection,
    script: Script,
    start: usize,
    num_characters: usize,
    glyphs: Vec<Glyph>,
    width: f32,
}

impl GlyphRun {
    /// Build a run covering characters `[start, end)`.
    ///
    /// `glyphs` must be in visual order. Cluster-start flags and the run width
    /// are derived here.
    pub fn new(
        font: Font,
        direction: TextDirection,
        script: Script,
        start: usize,
        end: usize,
        mut glyphs: Vec<Glyph>,
    ) -> Self {
        debug_assert!(start <= end, "run start {} after end {}", start, end);

        let mut previous = None;
        for glyph in glyphs.iter_mut() {
            glyph.cluster_start = previous != Some(glyph.character_index);
            previous = Some(glyph.character_index);
        }
        let width = glyphs.iter().map(|g| g.advance).sum();

        Self {
            font,
            direction,
            script,
            start,
            num_characters: end - start,
            glyphs,
            width,
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.num_characters
    }

    pub fn num_characters(&self) -> usize {
        self.num_characters
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end()
    }
}

/// Ordered collection of glyph runs covering one character range.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeResult {
    direction: TextDirection,
    start: usize,
    end: usize,
    /// Visual order: ascending `start` for LTR, descending for RTL.
    runs: Vec<GlyphRun>,
}

impl ShapeResult {
    /// Empty result for `[start, end)`.
    pub fn new(direction: TextDirection, start: usize, end: usize) -> Self {
        assert!(start <= end, "result start {} after end {}", start, end);
        Self {
            direction,
            start,
            end,
            runs: Vec::new(),
        }
    }

    /// Insert a fully covered run.
    ///
    /// # Panics
    /// Panics if the run lies outside this result's range or overlaps a run
    /// that was merged earlier.
    pub fn merge_font_run(&mut self, run: GlyphRun) {
        assert!(
            run.start() >= self.start && run.end() <= self.end,
            "run {}..{} outside result {}..{}",
            run.start(),
            run.end(),
            self.start,
            self.end
        );
        if run.num_characters() == 0 {
            return;
        }
        assert!(
            !self.runs.iter().any(|r| r.overlaps(run.start(), run.end())),
            "run {}..{} overlaps an existing run",
            run.start(),
            run.end()
        );

        let position = match self.direction {
            TextDirection::Ltr => self.runs.iter().position(|r| r.start() > run.start()),
            TextDirection::Rtl => self.runs.iter().position(|r| r.start() < run.start()),
        };
        match position {
            Some(index) => self.runs.insert(index, run),
            None => self.runs.push(run),
        }
    }

    /// Merge every run of `other`, typically a finished per-segment result.
    pub fn append_result(&mut self, other: ShapeResult) {
        for run in other.runs {
            self.merge_font_run(run);
        }
    }

    /// Close the result.
    ///
    /// # Panics
    /// Panics unless the runs cover `[start, end)` exactly.
    pub fn finalize(self) -> ShapeResult {
        assert!(
            self.is_complete(),
            "result {}..{} covers only {} characters",
            self.start,
            self.end,
            self.covered_characters()
        );
        self
    }

    /// Whether every character of the range belongs to a run.
    pub fn is_complete(&self) -> bool {
        self.covered_characters() == self.end - self.start
    }

    fn covered_characters(&self) -> usize {
        self.runs.iter().map(GlyphRun::num_characters).sum()
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn num_characters(&self) -> usize {
        self.end - self.start
    }

    pub fn num_glyphs(&self) -> usize {
        self.runs.iter().map(|r| r.glyphs().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// All glyphs, left to right.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.runs.iter().flat_map(|r| r.glyphs().iter())
    }

    /// Total advance, summed run by run in visual order.
    pub fn width(&self) -> f32 {
        self.runs.iter().map(GlyphRun::width).sum()
    }

    /// Distinct fonts other than `primary` that contributed glyphs, in visual
    /// order of first use.
    pub fn fallback_fonts(&self, primary: &Font) -> Vec<&Font> {
        let mut fonts: Vec<&Font> = Vec::new();
        for run in &self.runs {
            let font = run.font();
            if font.same_face(primary) || fonts.iter().any(|f| f.same_face(font)) {
                continue;
            }
            fonts.push(font);
        }
        fonts
    }

    /// Caret x position before the character at `index`.
    ///
    /// `index == end` gives the position after the last character. Indices
    /// outside `[start, end]` are clamped.
    pub fn x_position_for_offset(&self, index: usize) -> f32 {
        let index = index.clamp(self.start, self.end);
        self.glyphs()
            .filter(|g| match self.direction {
                TextDirection::Ltr => g.character_index < index,
                TextDirection::Rtl => g.character_index >= index,
            })
            .map(|g| g.advance)
            .sum()
    }

    /// Character whose glyph contains x position `x`, or `None` when `x`
    /// falls outside the result.
    pub fn offset_for_position(&self, x: f32) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let mut pen = 0.0;
        for glyph in self.glyphs() {
            pen += glyph.advance;
            if x < pen {
                return Some(glyph.character_index);
            }
        }
        None
    }
}
