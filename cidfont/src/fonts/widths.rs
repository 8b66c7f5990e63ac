use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::source::GlyphId;

/// Runs of identical widths longer than this are written as a `first last width` range.
const MAX_EXPLICIT_RUN: usize = 2;

/// An entry of the `W` array of a CIDFont.
#[derive(Debug, PartialEq, Clone)]
pub enum WidthEntry {
    /// `first last width`: all glyphs from `first` to `last` (inclusive) share `width`.
    Range {
        first: GlyphId,
        last: GlyphId,
        width: i32,
    },
    /// `start [w0 w1 …]`: individual widths of consecutive glyphs starting at `start`.
    List { start: GlyphId, widths: Vec<i32> },
}

/// The compacted glyph widths of a CIDFont (its `W` array).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Widths(Vec<WidthEntry>);

impl Widths {
    /// Run-length encodes the advance widths (indexed by glyph id) in a single greedy pass. Runs
    /// of three or more identical widths become ranges, everything in between is collected into
    /// explicit lists.
    pub fn compact(widths: &[i32]) -> Self {
        let mut entries = Vec::new();
        let mut pending_start = 0;
        let mut i = 0;

        while i < widths.len() {
            let mut j = i + 1;
            while j < widths.len() && widths[j] == widths[i] {
                j += 1;
            }

            if j - i > MAX_EXPLICIT_RUN {
                if pending_start < i {
                    entries.push(WidthEntry::List {
                        start: pending_start as GlyphId,
                        widths: widths[pending_start..i].to_vec(),
                    });
                }
                entries.push(WidthEntry::Range {
                    first: i as GlyphId,
                    last: (j - 1) as GlyphId,
                    width: widths[i],
                });
                i = j;
                pending_start = j;
            } else {
                i += 1;
            }
        }

        if pending_start < widths.len() {
            entries.push(WidthEntry::List {
                start: pending_start as GlyphId,
                widths: widths[pending_start..].to_vec(),
            });
        }

        Widths(entries)
    }

    pub fn entries(&self) -> &[WidthEntry] {
        &self.0
    }

    /// Reverses the compaction into one width per glyph.
    pub fn expand(&self) -> Vec<i32> {
        let mut widths = Vec::new();
        for entry in &self.0 {
            match entry {
                WidthEntry::Range { first, last, width } => {
                    widths.resize(usize::from(*first), 0);
                    widths.resize(usize::from(*last) + 1, *width);
                }
                WidthEntry::List { start, widths: list } => {
                    widths.resize(usize::from(*start), 0);
                    widths.extend_from_slice(list);
                }
            }
        }
        widths
    }
}

/// Serializes into the flat `W` array layout, e.g. `[0 [500 600] 2 10 500]`.
impl Serialize for Widths {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self
            .0
            .iter()
            .map(|entry| match entry {
                WidthEntry::Range { .. } => 3,
                WidthEntry::List { .. } => 2,
            })
            .sum();
        let mut seq = serializer.serialize_seq(Some(len))?;
        for entry in &self.0 {
            match entry {
                WidthEntry::Range { first, last, width } => {
                    seq.serialize_element(first)?;
                    seq.serialize_element(last)?;
                    seq.serialize_element(width)?;
                }
                WidthEntry::List { start, widths } => {
                    seq.serialize_element(start)?;
                    seq.serialize_element(widths)?;
                }
            }
        }
        seq.end()
    }
}
