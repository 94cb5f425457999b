//! Integration tests for par-shape-fonts crate.
//!
//! These run against an empty `fontdb::Database` so they behave the same on
//! machines without any system fonts.

use std::sync::Arc;

use fontdb::Database;
use par_shape_config::{Config, FontRange};
use par_shape_core::{
    EngineError, FallbackHint, FontFallbackPriority, Script, ShapeError,
    ShapeRequest, Shaper, ShapingEngine, TextBuffer, TextDirection, UnicodeProperties,
};
use par_shape_fonts::{
    FALLBACK_FAMILIES, FallbackGroup, FontData, FontManager, FontManagerOptions, ShapingOptions,
    TextShaper,
};

fn empty_manager() -> Arc<FontManager> {
    Arc::new(
        FontManager::with_database(Database::new(), &FontManagerOptions::default())
            .expect("FontManager should build over an empty database"),
    )
}

#[test]
fn test_font_data_invalid_bytes() {
    let font_data = FontData::new(vec![0u8; 100]);
    assert!(
        font_data.is_none(),
        "Should return None for invalid font data"
    );
}

#[test]
fn test_font_data_empty_bytes() {
    let font_data = FontData::new(vec![]);
    assert!(font_data.is_none(), "Should return None for empty data");
}

#[test]
fn test_fallback_families_not_empty() {
    assert!(
        !FALLBACK_FAMILIES.is_empty(),
        "Fallback families list should not be empty"
    );
}

#[test]
fn test_emoji_group_lists_color_fonts() {
    assert!(
        FallbackGroup::Emoji
            .families()
            .contains(&"Noto Color Emoji"),
        "Emoji group should include Noto Color Emoji"
    );
}

#[test]
fn test_options_from_config() {
    let config = Config {
        font_family: "Fira Code".to_string(),
        font_size: 20.0,
        font_ranges: vec![FontRange {
            start: 0x4E00,
            end: 0x9FFF,
            font_family: "Noto Sans CJK SC".to_string(),
        }],
        ..Config::default()
    };
    let options = FontManagerOptions::from_config(&config);
    assert_eq!(options.primary_family, "Fira Code");
    assert_eq!(options.font_size, 20.0);
    assert_eq!(options.font_ranges.len(), 1);
}

#[test]
fn test_font_manager_uses_configured_size() {
    let options = FontManagerOptions {
        font_size: 22.0,
        ..FontManagerOptions::default()
    };
    let manager = FontManager::with_database(Database::new(), &options).unwrap();
    assert_eq!(manager.primary_font().size(), 22.0);
    assert_eq!(manager.font_size(), 22.0);
}

#[test]
fn test_font_manager_lookup_of_unknown_family() {
    let manager = empty_manager();
    assert!(manager.font_for_family("Anything").is_none());
    assert_eq!(
        manager.family_of(manager.primary_font().id()),
        Some("JetBrains Mono")
    );
}

#[test]
fn test_empty_database_offers_no_candidates() {
    let manager = empty_manager();
    let hint = FallbackHint {
        chars: &['\u{1F600}'],
        priority: FontFallbackPriority::EmojiEmoji,
        script: Script::Common,
    };
    assert!(manager.fallback_chain(&hint).is_empty());
}

#[test]
fn test_text_shaper_creation() {
    let shaper = TextShaper::new(empty_manager());
    assert_eq!(shaper.cache_size(), 0, "New shaper should have empty cache");
    assert_eq!(shaper.options(), &ShapingOptions::default());
}

#[test]
fn test_text_shaper_missing_font_is_unknown() {
    let manager = empty_manager();
    let shaper = TextShaper::new(Arc::clone(&manager));
    let chars: Vec<char> = "Hello".chars().collect();
    let font = manager.primary_font();
    let request = ShapeRequest {
        text: TextBuffer::new(&chars),
        start: 0,
        end: chars.len(),
        font: &font,
        direction: TextDirection::Ltr,
        script: Script::Latin,
    };

    let result = shaper.shape_range(&request);
    assert_eq!(result, Err(EngineError::UnknownFont(font.id())));
    assert_eq!(shaper.cache_size(), 0, "Failures must not be cached");
}

#[test]
fn test_text_shaper_empty_range() {
    let manager = empty_manager();
    let shaper = TextShaper::new(Arc::clone(&manager));
    let chars: Vec<char> = "Hello".chars().collect();
    let font = manager.primary_font();
    let request = ShapeRequest {
        text: TextBuffer::new(&chars),
        start: 2,
        end: 2,
        font: &font,
        direction: TextDirection::Ltr,
        script: Script::Latin,
    };
    let run = shaper.shape_range(&request).unwrap();
    assert!(run.glyphs.is_empty());
}

#[test]
fn test_shaping_without_any_fonts_fails_cleanly() {
    let manager = empty_manager();
    let engine = TextShaper::new(Arc::clone(&manager));
    let props = UnicodeProperties::default();
    let chars: Vec<char> = "abc".chars().collect();
    let shaper = Shaper::new(&chars, &engine, manager.as_ref(), &props);

    let err = shaper
        .shape_all(&manager.primary_font(), TextDirection::Ltr)
        .unwrap_err();

    match err {
        ShapeError::FallbackExhausted { font, source, .. } => {
            assert_eq!(font, "DejaVu Sans");
            assert!(matches!(source, EngineError::UnknownFont(_)));
        }
        other => panic!("expected FallbackExhausted, got {:?}", other),
    }
}

#[test]
fn test_empty_text_needs_no_fonts() {
    let manager = empty_manager();
    let engine = TextShaper::new(Arc::clone(&manager));
    let props = UnicodeProperties::default();
    let chars: Vec<char> = Vec::new();
    let shaper = Shaper::new(&chars, &engine, manager.as_ref(), &props);

    let result = shaper
        .shape_all(&manager.primary_font(), TextDirection::Ltr)
        .unwrap();
    assert!(result.is_empty());
}
