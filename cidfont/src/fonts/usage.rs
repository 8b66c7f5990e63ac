use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::source::GlyphId;

/// The glyphs of a font used throughout a document, together with the glyphs that were created
/// by merging multiple original glyphs (ligatures).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FontGlyphUsage {
    all_used: bool,
    glyphs: BTreeSet<GlyphId>,
    ligatures: BTreeMap<GlyphId, Vec<GlyphId>>,
}

impl FontGlyphUsage {
    pub fn mark_used(&mut self, glyph_id: GlyphId) {
        self.glyphs.insert(glyph_id);
    }

    pub fn mark_all_used(&mut self) {
        self.all_used = true;
    }

    /// Records that `glyph_id` was created from the given original glyphs.
    pub fn add_ligature(&mut self, glyph_id: GlyphId, originals: Vec<GlyphId>) {
        self.ligatures.insert(glyph_id, originals);
    }

    pub fn all_used(&self) -> bool {
        self.all_used
    }

    pub fn is_used(&self, glyph_id: GlyphId) -> bool {
        self.all_used || self.glyphs.contains(&glyph_id)
    }

    pub fn glyphs(&self) -> &BTreeSet<GlyphId> {
        &self.glyphs
    }

    pub fn ligatures(&self) -> &BTreeMap<GlyphId, Vec<GlyphId>> {
        &self.ligatures
    }
}

/// [`FontGlyphUsage`] shared by all layout operations of a document.
#[derive(Debug, Default)]
pub(crate) struct SharedGlyphUsage(Mutex<FontGlyphUsage>);

impl SharedGlyphUsage {
    pub fn lock(&self) -> MutexGuard<'_, FontGlyphUsage> {
        // usage only grows, whatever a panicking writer left behind is still valid
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FontGlyphUsage {
        self.lock().clone()
    }
}
