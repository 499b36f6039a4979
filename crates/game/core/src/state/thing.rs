use std::collections::BTreeSet;

use bitflags::bitflags;

use super::{Color, Position, ThingId};
use crate::error::{ErrorSeverity, RealmError};

bitflags! {
    /// Static capabilities of a thing that drive interaction rules.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVABLE      = 1 << 0;
        const DESTRUCTIBLE = 1 << 1;
    }
}

/// Case-insensitive set of kind labels.
///
/// Labels are folded to lowercase on insertion so membership tests are exact
/// matches on the folded form (no prefix or partial matches).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct KindSet {
    kinds: BTreeSet<String>,
}

impl KindSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: &str) -> bool {
        self.kinds.insert(fold(kind))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains(&fold(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Folded labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for KindSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for KindSet {
    fn from(kinds: Vec<String>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<KindSet> for Vec<String> {
    fn from(set: KindSet) -> Self {
        set.kinds.into_iter().collect()
    }
}

fn fold(kind: &str) -> String {
    kind.to_lowercase()
}

/// Errors raised while validating a [`ThingSpec`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThingSpecError {
    #[error("thing kind must not be empty")]
    EmptyKind,

    #[error("thing name must not be empty (kind: {kind})")]
    EmptyName { kind: String },

    #[error("glyph {glyph:?} for {kind} is not printable")]
    InvalidGlyph { kind: String, glyph: char },
}

impl RealmError for ThingSpecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyKind => "THING_SPEC_EMPTY_KIND",
            Self::EmptyName { .. } => "THING_SPEC_EMPTY_NAME",
            Self::InvalidGlyph { .. } => "THING_SPEC_INVALID_GLYPH",
        }
    }
}

/// Blueprint for a thing before the world assigns it an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThingSpec {
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default = "default_color"))]
    pub color: Color,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: Capabilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_destroy: KindSet,
}

#[cfg(feature = "serde")]
fn default_color() -> Color {
    Color::WHITE
}

impl ThingSpec {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            position,
            glyph: '?',
            color: Color::WHITE,
            capabilities: Capabilities::empty(),
            can_destroy: KindSet::new(),
        }
    }

    #[must_use]
    pub fn glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn movable(mut self, movable: bool) -> Self {
        self.capabilities.set(Capabilities::MOVABLE, movable);
        self
    }

    #[must_use]
    pub fn destructible(mut self, destructible: bool) -> Self {
        self.capabilities.set(Capabilities::DESTRUCTIBLE, destructible);
        self
    }

    #[must_use]
    pub fn destroys<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for kind in kinds {
            self.can_destroy.insert(kind.as_ref());
        }
        self
    }

    pub fn validate(&self) -> Result<(), ThingSpecError> {
        if self.kind.trim().is_empty() {
            return Err(ThingSpecError::EmptyKind);
        }
        if self.name.trim().is_empty() {
            return Err(ThingSpecError::EmptyName {
                kind: self.kind.clone(),
            });
        }
        if self.glyph.is_control() || self.glyph.is_whitespace() {
            return Err(ThingSpecError::InvalidGlyph {
                kind: self.kind.clone(),
                glyph: self.glyph,
            });
        }
        Ok(())
    }
}

/// An entity occupying a single cell of the world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thing {
    pub id: ThingId,
    pub kind: String,
    pub name: String,
    pub position: Position,
    pub glyph: char,
    pub color: Color,
    pub capabilities: Capabilities,
    pub can_destroy: KindSet,
}

impl Thing {
    /// Builds a thing from a validated spec.
    pub fn from_spec(id: ThingId, spec: ThingSpec) -> Result<Self, ThingSpecError> {
        spec.validate()?;
        Ok(Self {
            id,
            kind: spec.kind,
            name: spec.name,
            position: spec.position,
            glyph: spec.glyph,
            color: spec.color,
            capabilities: spec.capabilities,
            can_destroy: spec.can_destroy,
        })
    }

    #[inline]
    pub fn can_move(&self) -> bool {
        self.capabilities.contains(Capabilities::MOVABLE)
    }

    #[inline]
    pub fn can_be_destroyed(&self) -> bool {
        self.capabilities.contains(Capabilities::DESTRUCTIBLE)
    }

    /// Case-insensitive kind comparison.
    pub fn is_kind(&self, kind: &str) -> bool {
        fold(&self.kind) == fold(kind)
    }

    /// True if `other` can destroy this thing.
    pub fn is_destroyed_by(&self, other: &Thing) -> bool {
        self.can_be_destroyed() && other.can_destroy.contains(&self.kind)
    }

    /// True if this thing can destroy `other`.
    pub fn destroys(&self, other: &Thing) -> bool {
        other.can_be_destroyed() && self.can_destroy.contains(&other.kind)
    }

    /// True if this thing moves `other` out of the way instead of interacting
    /// destructively. Push is the fallback when no destroy relation applies.
    pub fn pushes(&self, other: &Thing) -> bool {
        self.can_move()
            && other.can_move()
            && !self.destroys(other)
            && !self.is_destroyed_by(other)
    }
}
