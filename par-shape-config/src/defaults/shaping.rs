//! Default values for the shaping loop and engine features.

pub fn max_fallback_fonts() -> usize {
    32
}

pub fn shape_cache_size() -> usize {
    1000
}

pub fn bool_true() -> bool {
    true
}
