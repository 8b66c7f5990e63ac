use std::collections::HashMap;

use super::source::{GlyphId, KernSubtable};

/// Pairwise kerning adjustments combined from all eligible legacy kerning subtables, in font
/// design units.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct KerningTable {
    pairs: HashMap<u32, i32>,
}

impl KerningTable {
    /// Combines the subtables in table order. Values of an override subtable replace existing
    /// values of the same pair, all other subtables add to them. Only horizontal subtables with
    /// kerning values that do not act perpendicular to the text flow participate.
    pub fn from_subtables(subtables: &[KernSubtable]) -> Self {
        let mut pairs = HashMap::new();
        for subtable in subtables {
            let subtable_pairs = match &subtable.pairs {
                Some(pairs)
                    if subtable.is_horizontal
                        && !subtable.has_cross_stream
                        && !subtable.is_minimum =>
                {
                    pairs
                }
                _ => continue,
            };

            for (key, value) in subtable_pairs {
                let value = i32::from(*value);
                if subtable.is_override {
                    pairs.insert(*key, value);
                } else {
                    *pairs.entry(*key).or_insert(0) += value;
                }
            }
        }

        log::debug!(
            "combined {} kerning subtables into {} pairs",
            subtables.len(),
            pairs.len()
        );

        KerningTable { pairs }
    }

    pub fn key(left: GlyphId, right: GlyphId) -> u32 {
        u32::from(left) << 16 | u32::from(right)
    }

    pub fn get(&self, left: GlyphId, right: GlyphId) -> Option<i32> {
        self.pairs.get(&Self::key(left, right)).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
