//! Default values for font selection.

use crate::types::FontRange;

pub fn font_size() -> f32 {
    12.0
}

pub fn font_family() -> String {
    "JetBrains Mono".to_string()
}

pub fn last_resort_family() -> String {
    "DejaVu Sans".to_string()
}

pub fn fallback_families() -> Vec<String> {
    Vec::new() // Built-in fallback chain only
}

pub fn font_ranges() -> Vec<FontRange> {
    Vec::new()
}
