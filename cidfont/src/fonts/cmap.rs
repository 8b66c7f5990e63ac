use std::collections::BTreeMap;

use super::source::{CmapSubtable, Codepoint, GlyphId};
use crate::Error;

/// Supported unicode (platform id, encoding id) combinations, in the order of preference.
const UNICODE_ENCODINGS: &[(u16, u16)] = &[
    (3, 10), // Windows, full Unicode
    (0, 4),  // Unicode >= 2.0, non-BMP allowed
    (0, 6),  // Unicode full repertoire
    (3, 1),  // Windows, Unicode BMP
    (0, 3),  // Unicode >= 2.0, BMP only
    (0, 0),
    (0, 1),
    (0, 2),
];

const WINDOWS_SYMBOL: (u16, u16) = (3, 0);

/// Symbol fonts commonly map their characters into this private use area.
const SYMBOL_OFFSET: Codepoint = 0xF000;

/// The character map chosen for a font, mapping codepoints to glyph ids.
#[derive(Debug, PartialEq, Clone)]
pub struct CharacterMap {
    encoding: (u16, u16),
    map: BTreeMap<Codepoint, GlyphId>,
}

impl CharacterMap {
    /// Selects the most suitable subtable. Full Unicode subtables are preferred, the Windows
    /// symbol subtable is used as a fallback. Mappings to `.notdef` or to glyphs beyond
    /// `num_glyphs` are dropped.
    pub fn select(subtables: &[CmapSubtable], num_glyphs: u16) -> Result<Self, Error> {
        let candidates = UNICODE_ENCODINGS
            .iter()
            .chain(std::iter::once(&WINDOWS_SYMBOL))
            .flat_map(|encoding| {
                subtables
                    .iter()
                    .filter(move |s| (s.platform_id, s.encoding_id) == *encoding)
            });

        for subtable in candidates {
            let mut map: BTreeMap<Codepoint, GlyphId> = subtable
                .mappings
                .iter()
                .filter(|(_, glyph_id)| *glyph_id != 0 && *glyph_id < num_glyphs)
                .cloned()
                .collect();
            if map.is_empty() {
                continue;
            }

            let encoding = (subtable.platform_id, subtable.encoding_id);
            let mut rebased = false;
            if encoding == WINDOWS_SYMBOL && map.keys().all(|c| *c >= SYMBOL_OFFSET) {
                map = map
                    .into_iter()
                    .map(|(c, glyph_id)| (c - SYMBOL_OFFSET, glyph_id))
                    .collect();
                rebased = true;
            }

            log::debug!(
                "selected cmap subtable ({}, {}) with {} mappings (symbol rebased: {})",
                encoding.0,
                encoding.1,
                map.len(),
                rebased
            );
            return Ok(CharacterMap { encoding, map });
        }

        Err(Error::MissingCharacterMap)
    }

    /// The (platform id, encoding id) of the selected subtable.
    pub fn encoding(&self) -> (u16, u16) {
        self.encoding
    }

    pub fn glyph_id(&self, codepoint: Codepoint) -> Option<GlyphId> {
        self.map.get(&codepoint).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Codepoint, GlyphId)> + '_ {
        self.map.iter().map(|(c, glyph_id)| (*c, *glyph_id))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maps each glyph back to a codepoint. Glyphs reached by multiple codepoints map to the
    /// smallest one.
    pub fn invert(&self) -> BTreeMap<GlyphId, Codepoint> {
        let mut inverted = BTreeMap::new();
        // ascending codepoint order, so the first one seen is the smallest
        for (c, glyph_id) in &self.map {
            inverted.entry(*glyph_id).or_insert(*c);
        }
        inverted
    }
}
