//! Font management with fallback chain for comprehensive Unicode coverage.
//!
//! This module provides font discovery, fallback chain management, and
//! coverage checks. It supports:
//! - A primary font and a last-resort font
//! - Unicode range-specific fonts (e.g., CJK, emoji)
//! - Per-script and emoji/symbol fallback groups
//! - Lazy loading of font data, cached for the life of the manager

mod fallbacks;
mod loader;
mod types;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use fontdb::Database;
use par_shape_config::{Config, FontRange};
use par_shape_core::{FallbackHint, Font, FontFallbackService, FontId, FontLookupError};
use parking_lot::RwLock;

pub use fallbacks::{FALLBACK_FAMILIES, FallbackGroup, groups_for};
pub use types::{FontData, UnicodeRangeFont};

/// Font selection settings for a [`FontManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct FontManagerOptions {
    pub primary_family: String,
    /// Font size in pixels handed out with every font
    pub font_size: f32,
    pub last_resort_family: String,
    /// Families tried after group fonts and before [`FALLBACK_FAMILIES`]
    pub fallback_families: Vec<String>,
    pub font_ranges: Vec<FontRange>,
}

impl FontManagerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            primary_family: config.font_family.clone(),
            font_size: config.font_size,
            last_resort_family: config.last_resort_family.clone(),
            fallback_families: config.fallback_families.clone(),
            font_ranges: config.font_ranges.clone(),
        }
    }
}

impl Default for FontManagerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A face known to the manager.
///
/// `source` is `None` for configured families the database does not have;
/// such faces keep their id so callers can still name them, but they never
/// load.
#[derive(Debug, Clone)]
struct FaceEntry {
    family: Arc<str>,
    source: Option<fontdb::ID>,
}

/// Assigns `FontId`s while the manager is being built.
struct Registry<'a> {
    db: &'a Database,
    faces: Vec<FaceEntry>,
    by_source: HashMap<fontdb::ID, FontId>,
}

impl<'a> Registry<'a> {
    fn new(db: &'a Database) -> Self {
        Self {
            db,
            faces: Vec::new(),
            by_source: HashMap::new(),
        }
    }

    fn push(&mut self, family: &str, source: Option<fontdb::ID>) -> FontId {
        let id = FontId(self.faces.len() as u32);
        self.faces.push(FaceEntry {
            family: Arc::from(family),
            source,
        });
        if let Some(source) = source {
            self.by_source.insert(source, id);
        }
        id
    }

    /// Id for an installed family; several names for one face share an id.
    fn register(&mut self, family: &str) -> Option<FontId> {
        let source = loader::query_family(self.db, family)?;
        if let Some(&id) = self.by_source.get(&source) {
            return Some(id);
        }
        Some(self.push(family, Some(source)))
    }

    fn register_or_placeholder(&mut self, family: &str) -> FontId {
        match self.register(family) {
            Some(id) => id,
            None => self.push(family, None),
        }
    }

    fn register_all<'f>(&mut self, families: impl IntoIterator<Item = &'f str>) -> Vec<FontId> {
        let mut ids = Vec::new();
        for family in families {
            if let Some(id) = self.register(family) {
                push_unique(&mut ids, id);
            }
        }
        ids
    }
}

fn push_unique(ids: &mut Vec<FontId>, id: FontId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Manages system fonts, fallback chains and loaded font data.
///
/// Every face is identified by a [`FontId`] assigned at construction:
/// - the primary and last-resort fonts always have an id, even if missing
/// - range fonts, group fonts and fallback families get an id only when the
///   font database has them
pub struct FontManager {
    /// Font database for system font queries
    font_db: Database,

    /// Registered faces, indexed by `FontId`
    faces: Vec<FaceEntry>,

    /// Lazily loaded font data
    loaded: RwLock<HashMap<FontId, Arc<FontData>>>,

    primary: FontId,
    last_resort: FontId,
    font_size: f32,

    /// Unicode range-specific fonts (offered before any other fallback)
    range_fonts: Vec<UnicodeRangeFont>,

    /// Installed fonts per fallback group
    groups: HashMap<FallbackGroup, Vec<FontId>>,

    /// Installed fonts from the configured fallback families
    configured: Vec<FontId>,

    /// Installed fonts from [`FALLBACK_FAMILIES`]
    general: Vec<FontId>,
}

impl FontManager {
    /// Create a FontManager over the system font database.
    pub fn new(options: &FontManagerOptions) -> Result<Self> {
        let mut font_db = Database::new();

        // Load system fonts
        font_db.load_system_fonts();
        log::info!("Loaded {} system fonts", font_db.len());

        Self::with_database(font_db, options)
    }

    /// Create a FontManager over an existing font database.
    ///
    /// # Errors
    /// Returns an error if the font size is not a positive number.
    pub fn with_database(font_db: Database, options: &FontManagerOptions) -> Result<Self> {
        if !(options.font_size.is_finite() && options.font_size > 0.0) {
            anyhow::bail!("Invalid font size: {}", options.font_size);
        }

        let mut registry = Registry::new(&font_db);

        let primary = registry.register_or_placeholder(&options.primary_family);
        if registry.faces[primary.0 as usize].source.is_none() {
            log::warn!(
                "Primary font '{}' not found, relying on fallback fonts",
                options.primary_family
            );
        }
        let last_resort = registry.register_or_placeholder(&options.last_resort_family);
        if registry.faces[last_resort.0 as usize].source.is_none() {
            log::warn!(
                "Last-resort font '{}' not found, uncovered text will fail to shape",
                options.last_resort_family
            );
        }

        let range_fonts = Self::load_range_fonts(&mut registry, &options.font_ranges);

        let mut groups = HashMap::new();
        for group in FallbackGroup::ALL {
            let ids = registry.register_all(group.families().iter().copied());
            log::debug!("Fallback group {:?}: {} fonts", group, ids.len());
            groups.insert(group, ids);
        }

        let configured = registry.register_all(options.fallback_families.iter().map(String::as_str));
        let general = registry.register_all(FALLBACK_FAMILIES.iter().copied());
        log::info!(
            "Registered {} fonts ({} configured fallbacks, {} general fallbacks)",
            registry.faces.len(),
            configured.len(),
            general.len()
        );

        let faces = registry.faces;
        let manager = FontManager {
            font_db,
            faces,
            loaded: RwLock::new(HashMap::new()),
            primary,
            last_resort,
            font_size: options.font_size,
            range_fonts,
            groups,
            configured,
            general,
        };

        // The primary and last-resort fonts are needed by almost every shape
        // call; load them now so shaping does not hit the disk.
        for id in [primary, last_resort] {
            if let Err(e) = manager.font_data(id) {
                log::debug!("Font {} not preloaded: {}", id, e);
            }
        }

        Ok(manager)
    }

    /// Load Unicode range-specific fonts.
    fn load_range_fonts(registry: &mut Registry<'_>, font_ranges: &[FontRange]) -> Vec<UnicodeRangeFont> {
        let mut range_fonts = Vec::new();

        for range in font_ranges {
            log::info!(
                "Loading range font for U+{:04X}-U+{:04X}: {}",
                range.start,
                range.end,
                range.font_family
            );

            if let Some(font_id) = registry.register(&range.font_family) {
                range_fonts.push(UnicodeRangeFont {
                    start: range.start,
                    end: range.end,
                    font_id,
                });
                log::info!(
                    "Successfully registered range font: {} ({})",
                    range.font_family,
                    font_id
                );
            } else {
                log::warn!(
                    "Range font '{}' not found for U+{:04X}-U+{:04X}, skipping",
                    range.font_family,
                    range.start,
                    range.end
                );
            }
        }
        range_fonts
    }

    fn font(&self, id: FontId, size: f32) -> Font {
        let family = self
            .faces
            .get(id.0 as usize)
            .map(|entry| Arc::clone(&entry.family))
            .unwrap_or_else(|| Arc::from("unknown"));
        Font::new(id, family, size)
    }

    /// The configured primary font at the configured size.
    pub fn primary_font(&self) -> Font {
        self.font(self.primary, self.font_size)
    }

    /// The configured last-resort font at the configured size.
    pub fn last_resort(&self) -> Font {
        self.font(self.last_resort, self.font_size)
    }

    /// An installed, registered font by family name.
    pub fn font_for_family(&self, family: &str) -> Option<Font> {
        self.faces
            .iter()
            .position(|entry| entry.source.is_some() && entry.family.eq_ignore_ascii_case(family))
            .map(|index| self.font(FontId(index as u32), self.font_size))
    }

    /// Family name of a registered face.
    pub fn family_of(&self, id: FontId) -> Option<&str> {
        self.faces.get(id.0 as usize).map(|entry| &*entry.family)
    }

    /// Whether the font database has data for this face.
    pub fn is_available(&self, id: FontId) -> bool {
        self.faces
            .get(id.0 as usize)
            .is_some_and(|entry| entry.source.is_some())
    }

    /// Number of installed faces registered (missing placeholders excluded).
    pub fn font_count(&self) -> usize {
        self.faces.iter().filter(|entry| entry.source.is_some()).count()
    }

    /// Number of faces whose data has been loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded.read().len()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn range_fonts(&self) -> &[UnicodeRangeFont] {
        &self.range_fonts
    }

    /// Font data for a face, loading it on first use.
    pub fn font_data(&self, id: FontId) -> Result<Arc<FontData>, FontLookupError> {
        if let Some(data) = self.loaded.read().get(&id) {
            return Ok(Arc::clone(data));
        }

        let entry = self
            .faces
            .get(id.0 as usize)
            .ok_or_else(|| FontLookupError::NotFound(id.to_string()))?;
        let source = entry
            .source
            .ok_or_else(|| FontLookupError::NotFound(entry.family.to_string()))?;
        let data = loader::load_face(&self.font_db, source)
            .ok_or_else(|| FontLookupError::LoadFailed(entry.family.to_string()))?;
        log::debug!("Loaded font data for '{}' ({} bytes)", entry.family, data.data.len());

        let mut loaded = self.loaded.write();
        let data = loaded.entry(id).or_insert_with(|| Arc::new(data));
        Ok(Arc::clone(data))
    }

    /// Candidate face ids for a hint, best first, without duplicates.
    pub fn fallback_chain(&self, hint: &FallbackHint<'_>) -> Vec<FontId> {
        let mut ids = Vec::new();

        for range_font in &self.range_fonts {
            if hint.chars.iter().any(|&c| range_font.contains(c)) {
                push_unique(&mut ids, range_font.font_id);
            }
        }
        for group in groups_for(hint.priority, hint.script) {
            if let Some(group_ids) = self.groups.get(&group) {
                for &id in group_ids {
                    push_unique(&mut ids, id);
                }
            }
        }
        for &id in self.configured.iter().chain(self.general.iter()) {
            push_unique(&mut ids, id);
        }
        ids
    }
}

impl FontFallbackService for FontManager {
    fn candidates_for(&self, primary: &Font, hint: &FallbackHint<'_>) -> Vec<Font> {
        self.fallback_chain(hint)
            .into_iter()
            .map(|id| self.font(id, primary.size()))
            .collect()
    }

    fn covers(&self, font: &Font, c: char) -> Result<bool, FontLookupError> {
        let data = self.font_data(font.id())?;
        Ok(data.has_glyph(c))
    }

    fn last_resort_font(&self, primary: &Font) -> Font {
        self.font(self.last_resort, primary.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use par_shape_core::{FontFallbackPriority, Script};

    fn empty_manager() -> FontManager {
        FontManager::with_database(Database::new(), &FontManagerOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_database_still_names_primary_and_last_resort() {
        let fm = empty_manager();
        assert_eq!(fm.primary_font().family(), "JetBrains Mono");
        assert_eq!(fm.last_resort().family(), "DejaVu Sans");
        assert_eq!(fm.font_count(), 0, "Missing fonts are not counted");
        assert!(!fm.is_available(fm.primary_font().id()));
    }

    #[test]
    fn test_missing_font_has_no_data() {
        let fm = empty_manager();
        let primary = fm.primary_font();
        assert!(matches!(
            fm.font_data(primary.id()),
            Err(FontLookupError::NotFound(_))
        ));
        assert!(fm.covers(&primary, 'A').is_err());
        assert_eq!(fm.loaded_count(), 0);
    }

    #[test]
    fn test_empty_database_has_no_candidates() {
        let fm = empty_manager();
        let hint = FallbackHint {
            chars: &['\u{4E00}'],
            priority: FontFallbackPriority::Text,
            script: Script::Han,
        };
        assert!(fm.candidates_for(&fm.primary_font(), &hint).is_empty());
    }

    #[test]
    fn test_last_resort_uses_primary_size() {
        let fm = empty_manager();
        let primary = fm.font(fm.primary_font().id(), 30.0);
        assert_eq!(fm.last_resort_font(&primary).size(), 30.0);
    }

    #[test]
    fn test_invalid_font_size_rejected() {
        let options = FontManagerOptions {
            font_size: 0.0,
            ..FontManagerOptions::default()
        };
        assert!(FontManager::with_database(Database::new(), &options).is_err());
    }

    #[test]
    fn test_missing_range_font_is_skipped() {
        let options = FontManagerOptions {
            font_ranges: vec![FontRange {
                start: 0x4E00,
                end: 0x9FFF,
                font_family: "Not Installed Anywhere".to_string(),
            }],
            ..FontManagerOptions::default()
        };
        let fm = FontManager::with_database(Database::new(), &options).unwrap();
        assert!(fm.range_fonts().is_empty());
    }
}
