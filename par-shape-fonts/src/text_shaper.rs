//! Text shaping using HarfBuzz via rustybuzz
//!
//! [`TextShaper`] is the shaping engine behind `par_shape_core::Shaper`. It
//! shapes one character range with one font and reports glyphs in visual
//! order, with cluster values as absolute indices into the caller's buffer.
//!
//! # Architecture
//!
//! 1. Font data lookup through the shared [`FontManager`]
//! 2. Script and direction from the request
//! 3. Font feature selection (based on [`ShapingOptions`])
//! 4. Text shaping (rustybuzz)
//! 5. Font-unit to pixel scaling
//! 6. Result caching for performance
//!
//! # Usage
//!
//! ```ignore
//! let fonts = Arc::new(FontManager::new(&FontManagerOptions::default())?);
//! let engine = TextShaper::new(Arc::clone(&fonts));
//! let shaper = Shaper::new(&chars, &engine, fonts.as_ref(), &UnicodeProperties::default());
//! ```

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use lru::LruCache;
use par_shape_config::Config;
use par_shape_core::{
    EngineError, EngineGlyph, EngineRun, FontId, FontLookupError, GlyphOffset, Script,
    ShapeRequest, ShapingEngine, TextDirection,
};
use parking_lot::Mutex;
use rustybuzz::{Direction, Face, Feature, Language, UnicodeBuffer};

use crate::font_manager::FontManager;

/// Default number of shaped runs kept in the cache
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Options for text shaping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapingOptions {
    /// Enable standard ligatures (fi, fl, etc.)
    pub enable_ligatures: bool,

    /// Enable kerning adjustments
    pub enable_kerning: bool,

    /// Enable contextual alternates
    pub enable_contextual_alternates: bool,

    /// Language hint (e.g., "en" for English, "ar" for Arabic)
    pub language: Option<String>,
}

impl Default for ShapingOptions {
    fn default() -> Self {
        Self {
            enable_ligatures: true,
            enable_kerning: true,
            enable_contextual_alternates: true,
            language: None,
        }
    }
}

impl ShapingOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enable_ligatures: config.enable_ligatures,
            enable_kerning: config.enable_kerning,
            enable_contextual_alternates: config.enable_contextual_alternates,
            language: None,
        }
    }

    /// OpenType features to request from rustybuzz.
    pub fn features(&self) -> Vec<Feature> {
        let mut tags = Vec::new();

        if self.enable_ligatures {
            // Standard, contextual and discretionary ligatures; programming
            // ligatures like -> and => usually live in clig/dlig
            tags.extend(["liga", "clig", "dlig"]);
        }
        if self.enable_kerning {
            tags.push("kern");
        }
        if self.enable_contextual_alternates {
            tags.push("calt");
        }
        // Glyph composition/decomposition, needed for emoji and complex scripts
        tags.push("ccmp");
        // Localized forms
        tags.push("locl");

        tags.into_iter()
            .filter_map(|tag| Feature::from_str(tag).ok())
            .collect()
    }
}

/// Cache key for shaped text runs
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ShapeCacheKey {
    text: Vec<char>,
    font: FontId,
    size_bits: u32,
    direction: TextDirection,
    script: Script,
}

/// Shaping engine using HarfBuzz via rustybuzz
pub struct TextShaper {
    fonts: Arc<FontManager>,
    options: ShapingOptions,
    features: Vec<Feature>,

    /// Shaped glyphs keyed by input, clusters relative to the range start.
    /// `None` when caching is disabled.
    shape_cache: Option<Mutex<LruCache<ShapeCacheKey, Arc<Vec<EngineGlyph>>>>>,
}

impl TextShaper {
    /// Create a new text shaper with default settings
    pub fn new(fonts: Arc<FontManager>) -> Self {
        Self::with_cache_size(fonts, DEFAULT_CACHE_SIZE)
    }

    /// Create a new text shaper with a specific cache size (0 disables caching)
    pub fn with_cache_size(fonts: Arc<FontManager>, max_cache_size: usize) -> Self {
        let options = ShapingOptions::default();
        Self {
            fonts,
            features: options.features(),
            options,
            shape_cache: NonZeroUsize::new(max_cache_size).map(|size| Mutex::new(LruCache::new(size))),
        }
    }

    /// Replace the shaping options; cached runs shaped with the old options
    /// are dropped.
    pub fn with_options(mut self, options: ShapingOptions) -> Self {
        self.features = options.features();
        self.options = options;
        self.clear_cache();
        self
    }

    pub fn options(&self) -> &ShapingOptions {
        &self.options
    }

    pub fn fonts(&self) -> &Arc<FontManager> {
        &self.fonts
    }

    /// Clear the shape cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.shape_cache {
            cache.lock().clear();
        }
    }

    /// Get the current cache size
    pub fn cache_size(&self) -> usize {
        self.shape_cache
            .as_ref()
            .map(|cache| cache.lock().len())
            .unwrap_or(0)
    }

    /// Shape `chars` with `face`; clusters are relative to `chars`.
    fn shape_with_face(&self, face: &Face<'_>, chars: &[char], request: &ShapeRequest<'_>) -> Vec<EngineGlyph> {
        let mut unicode_buffer = UnicodeBuffer::new();
        for (index, &c) in chars.iter().enumerate() {
            unicode_buffer.add(c, index as u32);
        }

        unicode_buffer.set_direction(match request.direction {
            TextDirection::Ltr => Direction::LeftToRight,
            TextDirection::Rtl => Direction::RightToLeft,
        });

        if let Some(script) = to_rustybuzz_script(request.script) {
            unicode_buffer.set_script(script);
        }

        if let Some(ref lang_str) = self.options.language
            && let Ok(lang) = Language::from_str(lang_str)
        {
            unicode_buffer.set_language(lang);
        }

        // Fills in the script when the run only had Common characters
        unicode_buffer.guess_segment_properties();

        let glyph_buffer = rustybuzz::shape(face, &self.features, unicode_buffer);

        let scale = request.font.size() / face.units_per_em().max(1) as f32;
        glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions().iter())
            .map(|(info, pos)| EngineGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster as usize,
                advance: pos.x_advance as f32 * scale,
                offset: GlyphOffset {
                    x: pos.x_offset as f32 * scale,
                    y: pos.y_offset as f32 * scale,
                },
            })
            .collect()
    }
}

impl ShapingEngine for TextShaper {
    fn shape_range(&self, request: &ShapeRequest<'_>) -> Result<EngineRun, EngineError> {
        let chars = request.chars();
        if chars.is_empty() {
            return Ok(EngineRun::default());
        }

        let key = ShapeCacheKey {
            text: chars.to_vec(),
            font: request.font.id(),
            size_bits: request.font.size().to_bits(),
            direction: request.direction,
            script: request.script,
        };

        let cached = self
            .shape_cache
            .as_ref()
            .and_then(|cache| cache.lock().get(&key).cloned());
        let glyphs = match cached {
            Some(glyphs) => glyphs,
            None => {
                let font_id = request.font.id();
                let data = self.fonts.font_data(font_id).map_err(|e| match e {
                    FontLookupError::NotFound(_) => EngineError::UnknownFont(font_id),
                    FontLookupError::LoadFailed(family) => EngineError::MalformedFont { family },
                })?;
                let face = Face::from_slice(&data.data, data.face_index).ok_or_else(|| {
                    EngineError::MalformedFont {
                        family: request.font.family().to_string(),
                    }
                })?;

                let glyphs = Arc::new(self.shape_with_face(&face, chars, request));
                log::trace!(
                    "Shaped {} chars with '{}' into {} glyphs",
                    chars.len(),
                    request.font.family(),
                    glyphs.len()
                );
                if let Some(cache) = &self.shape_cache {
                    cache.lock().put(key, Arc::clone(&glyphs));
                }
                glyphs
            }
        };

        Ok(EngineRun {
            glyphs: glyphs
                .iter()
                .map(|glyph| EngineGlyph {
                    cluster: request.start + glyph.cluster,
                    ..*glyph
                })
                .collect(),
        })
    }
}

/// rustybuzz script for a resolved run script.
///
/// Common, Inherited and Unknown are left for rustybuzz to guess.
fn to_rustybuzz_script(script: Script) -> Option<rustybuzz::Script> {
    match script {
        Script::Common | Script::Inherited | Script::Unknown => None,
        _ => rustybuzz::Script::from_str(script.short_name()).ok(),
    }
}
