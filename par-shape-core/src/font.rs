//! Font handles passed between the kernel and its collaborators.

use std::fmt;
use std::sync::Arc;

/// Backend-assigned identifier of a font face.
///
/// Two `Font` handles with the same id refer to the same face; the fallback
/// iterator uses ids to avoid returning a face twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A font face at a specific pixel size.
///
/// Cheap to clone: the family name is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    id: FontId,
    family: Arc<str>,
    size: f32,
}

impl Font {
    pub fn new(id: FontId, family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            id,
            family: family.into(),
            size,
        }
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font size in pixels; engines scale design units by this.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Same face, possibly at a different size.
    pub fn same_face(&self, other: &Font) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}px", self.family, self.id, self.size)
    }
}
