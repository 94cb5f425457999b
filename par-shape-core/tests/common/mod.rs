//! Shared fakes for par-shape-core integration tests.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps warnings quiet when a file only uses a subset.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use par_shape_core::{
    EngineError, EngineGlyph, EngineRun, FallbackHint, Font, FontFallbackPriority,
    FontFallbackService, FontId, FontLookupError, GlyphOffset, ShapeRequest, ShapingEngine,
};

pub const PRIMARY: FontId = FontId(0);
pub const LAST_RESORT: FontId = FontId(1000);

pub fn font(id: FontId, family: &str) -> Font {
    Font::new(id, family, 16.0)
}

pub fn primary_font() -> Font {
    font(PRIMARY, "Latin Sans")
}

pub fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Which characters each font has glyphs for.
#[derive(Debug, Default, Clone)]
pub struct Coverage {
    fonts: HashMap<FontId, HashSet<char>>,
    everything: HashSet<FontId>,
}

impl Coverage {
    pub fn with_chars(mut self, id: FontId, chars: &str) -> Self {
        self.fonts.entry(id).or_default().extend(chars.chars());
        self
    }

    pub fn with_everything(mut self, id: FontId) -> Self {
        self.everything.insert(id);
        self
    }

    pub fn covers(&self, id: FontId, c: char) -> bool {
        self.everything.contains(&id) || self.fonts.get(&id).is_some_and(|set| set.contains(&c))
    }
}

/// One glyph per character; notdef where the font lacks coverage.
///
/// Glyph advances are `10 * (font id + 1)` so tests can tell fonts apart by
/// width.
pub struct FakeEngine {
    pub coverage: Coverage,
    pub failing: HashSet<FontId>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<(usize, usize, FontId)>>,
}

impl FakeEngine {
    pub fn new(coverage: Coverage) -> Self {
        Self {
            coverage,
            failing: HashSet::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(mut self, id: FontId) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(usize, usize, FontId)> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn advance_for(id: FontId) -> f32 {
    10.0 * (id.0 as f32 + 1.0)
}

impl ShapingEngine for FakeEngine {
    fn shape_range(&self, request: &ShapeRequest<'_>) -> Result<EngineRun, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = request.font.id();
        self.requests
            .lock()
            .unwrap()
            .push((request.start, request.end, id));

        if self.failing.contains(&id) {
            return Err(EngineError::Failed(format!("font {} is broken", id)));
        }

        let mut glyphs: Vec<EngineGlyph> = request
            .chars()
            .iter()
            .enumerate()
            .map(|(i, &c)| EngineGlyph {
                glyph_id: if self.coverage.covers(id, c) {
                    c as u32
                } else {
                    0
                },
                cluster: request.start + i,
                advance: advance_for(id),
                offset: GlyphOffset::default(),
            })
            .collect();
        if request.direction.is_rtl() {
            glyphs.reverse();
        }
        Ok(EngineRun { glyphs })
    }
}

/// Fallback service with fixed candidate lists per priority.
pub struct FakeFonts {
    pub coverage: Coverage,
    pub text_candidates: Vec<Font>,
    pub emoji_candidates: Vec<Font>,
    pub broken: HashSet<FontId>,
    pub hints: Mutex<Vec<Vec<char>>>,
}

impl FakeFonts {
    pub fn new(coverage: Coverage) -> Self {
        Self {
            coverage,
            text_candidates: Vec::new(),
            emoji_candidates: Vec::new(),
            broken: HashSet::new(),
            hints: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text_candidates(mut self, fonts: Vec<Font>) -> Self {
        self.text_candidates = fonts;
        self
    }

    pub fn with_emoji_candidates(mut self, fonts: Vec<Font>) -> Self {
        self.emoji_candidates = fonts;
        self
    }

    pub fn with_broken(mut self, id: FontId) -> Self {
        self.broken.insert(id);
        self
    }

    pub fn hints(&self) -> Vec<Vec<char>> {
        self.hints.lock().unwrap().clone()
    }
}

impl FontFallbackService for FakeFonts {
    fn candidates_for(&self, _primary: &Font, hint: &FallbackHint<'_>) -> Vec<Font> {
        self.hints.lock().unwrap().push(hint.chars.to_vec());
        if hint.priority == FontFallbackPriority::EmojiEmoji {
            let mut fonts = self.emoji_candidates.clone();
            fonts.extend(self.text_candidates.iter().cloned());
            fonts
        } else {
            self.text_candidates.clone()
        }
    }

    fn covers(&self, font: &Font, c: char) -> Result<bool, FontLookupError> {
        if self.broken.contains(&font.id()) {
            return Err(FontLookupError::LoadFailed(font.family().to_string()));
        }
        Ok(self.coverage.covers(font.id(), c))
    }

    fn last_resort_font(&self, primary: &Font) -> Font {
        Font::new(LAST_RESORT, "Last Resort", primary.size())
    }
}
