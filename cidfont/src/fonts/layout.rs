use std::fmt;

use super::shaping::GlyphRun;

/// An OpenType layout feature tag, e.g. `liga`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const fn new(tag: &[u8; 4]) -> Self {
        Tag(*tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// The layout features enabled for shaping, in the order they are applied.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Features(Vec<Tag>);

impl Features {
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        Features(tags.into_iter().collect())
    }

    /// No features at all, i.e. plain character to glyph mapping plus legacy kerning.
    pub fn none() -> Self {
        Features(Vec::new())
    }

    pub fn tags(&self) -> &[Tag] {
        &self.0
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0.contains(&tag)
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::new(
            [b"ccmp", b"liga", b"clig", b"calt", b"kern", b"mark", b"mkmk"]
                .iter()
                .map(|tag| Tag::new(tag)),
        )
    }
}

/// Positioning delta for one glyph. `x_advance`/`y_advance` change the advance of the glyph,
/// `x_placement`/`y_placement` move the glyph without affecting the advance.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct GlyphAdjustment {
    pub x_placement: i32,
    pub y_placement: i32,
    pub x_advance: i32,
    pub y_advance: i32,
}

/// Evaluator of a font's GSUB/GPOS lookups. Values returned by [`LayoutEngine::position`] are in
/// font design units.
pub trait LayoutEngine: Send + Sync {
    /// Whether the font has substitution lookups for any of the given features.
    fn has_substitutions(&self, features: &Features) -> bool;

    /// Applies the substitution lookups. Changes to the run must be done through
    /// [`GlyphRun::replace`], [`GlyphRun::ligate`] and [`GlyphRun::decompose`] so that the
    /// origin of each glyph is kept track of.
    fn substitute(&self, run: &mut GlyphRun, features: &Features);

    /// Whether the font has positioning lookups for any of the given features.
    fn has_positioning(&self, features: &Features) -> bool;

    /// One adjustment per glyph of the run.
    fn position(&self, run: &GlyphRun, features: &Features) -> Vec<GlyphAdjustment>;
}
