//! Error handling for shaping operations

use crate::font::FontId;

/// Errors surfaced by [`Shaper::shape`](crate::Shaper::shape).
///
/// Coverage gaps never show up here: they are resolved through font fallback
/// before `shape` returns.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Invalid range: start {start}, end {end}, length {length}")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("Font fallback exhausted for characters {start}..{end}: last-resort font '{font}' failed")]
    FallbackExhausted {
        start: usize,
        end: usize,
        font: String,
        #[source]
        source: EngineError,
    },
}

/// Failure reported by a shaping engine for one sub-range.
///
/// The shaper treats these as "no glyphs produced" and retries the range with
/// the next fallback font.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown font {0}")]
    UnknownFont(FontId),

    #[error("Font data for '{family}' could not be parsed")]
    MalformedFont { family: String },

    #[error("No glyphs produced for characters {start}..{end}")]
    MissingCoverage { start: usize, end: usize },

    #[error("Shaping failed: {0}")]
    Failed(String),
}

/// Failure reported by a font fallback service for a single candidate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FontLookupError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Failed to load font '{0}'")]
    LoadFailed(String),
}
