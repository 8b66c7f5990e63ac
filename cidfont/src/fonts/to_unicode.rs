use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;

use super::cmap::CharacterMap;
use super::source::{Codepoint, GlyphId};
use super::usage::FontGlyphUsage;

/// Maximum number of entries of a single `beginbfchar`/`beginbfrange` block.
const MAX_BLOCK_ENTRIES: usize = 100;

/// A ToUnicode CMap, mapping the glyph ids (CIDs) of a font back to Unicode.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ToUnicodeCMap {
    /// Single glyphs (`bfchar`), sorted by glyph id.
    chars: Vec<(GlyphId, Vec<Codepoint>)>,
    /// `(first, last, first codepoint)` ranges (`bfrange`), sorted by their first glyph id.
    ranges: Vec<(GlyphId, GlyphId, Codepoint)>,
}

impl ToUnicodeCMap {
    /// Builds the map for the glyphs recorded in `usage`, or for all glyphs if all are marked as
    /// used. Ligatures map to the codepoints of the glyphs they were built from.
    pub fn from_usage(cmap: &CharacterMap, usage: &FontGlyphUsage) -> Self {
        let inverted = cmap.invert();
        let mappings = inverted
            .iter()
            .filter(|(glyph_id, _)| usage.is_used(**glyph_id))
            .map(|(glyph_id, codepoint)| (*glyph_id, *codepoint))
            .collect();

        let ligatures = usage
            .ligatures()
            .iter()
            .filter_map(|(glyph_id, originals)| {
                // components without a codepoint of their own cannot be represented
                let codepoints = originals
                    .iter()
                    .filter_map(|original| inverted.get(original).copied())
                    .collect::<Vec<_>>();
                if codepoints.is_empty() {
                    None
                } else {
                    Some((*glyph_id, codepoints))
                }
            })
            .collect();

        ToUnicodeCMap::new(&mappings, &ligatures)
    }

    /// Merges the 1:1 `mappings` into ranges where possible and adds the `ligatures` as single
    /// entries. A ligature glyph is only mapped to its ligature codepoints.
    ///
    /// Only the glyph side of a range is kept within one high byte. The destination codepoints may
    /// carry over a low byte boundary (e.g. U+00FE..U+0101), which keeps the emitted ranges
    /// identical to the ones other producers of these CMaps write.
    pub fn new(
        mappings: &BTreeMap<GlyphId, Codepoint>,
        ligatures: &BTreeMap<GlyphId, Vec<Codepoint>>,
    ) -> Self {
        let mut cmap = ToUnicodeCMap::default();

        // (first glyph, last glyph, first codepoint, last codepoint)
        let mut run: Option<(GlyphId, GlyphId, Codepoint, Codepoint)> = None;
        for (&glyph_id, &codepoint) in mappings {
            if ligatures.contains_key(&glyph_id) {
                continue;
            }

            if let Some((first, last, first_codepoint, last_codepoint)) = run {
                // ranges must not cross a 256 glyph boundary
                if u32::from(glyph_id) == u32::from(last) + 1
                    && codepoint == last_codepoint + 1
                    && glyph_id >> 8 == last >> 8
                {
                    run = Some((first, glyph_id, first_codepoint, codepoint));
                    continue;
                }
                cmap.push_run(first, last, first_codepoint);
            }
            run = Some((glyph_id, glyph_id, codepoint, codepoint));
        }
        if let Some((first, last, first_codepoint, _)) = run {
            cmap.push_run(first, last, first_codepoint);
        }

        cmap.chars.extend(
            ligatures
                .iter()
                .filter(|(_, codepoints)| !codepoints.is_empty())
                .map(|(glyph_id, codepoints)| (*glyph_id, codepoints.clone())),
        );
        cmap.chars.sort_by_key(|(glyph_id, _)| *glyph_id);
        cmap.ranges.sort_by_key(|(first, _, _)| *first);

        cmap
    }

    fn push_run(&mut self, first: GlyphId, last: GlyphId, first_codepoint: Codepoint) {
        if first == last {
            self.chars.push((first, vec![first_codepoint]));
        } else {
            self.ranges.push((first, last, first_codepoint));
        }
    }

    pub fn chars(&self) -> &[(GlyphId, Vec<Codepoint>)] {
        &self.chars
    }

    pub fn ranges(&self) -> &[(GlyphId, GlyphId, Codepoint)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.ranges.is_empty()
    }

    /// Flattens the map into one entry per glyph.
    pub fn expand(&self) -> BTreeMap<GlyphId, Vec<Codepoint>> {
        let mut expanded = BTreeMap::new();
        for (first, last, first_codepoint) in &self.ranges {
            for glyph_id in *first..=*last {
                expanded.insert(
                    glyph_id,
                    vec![first_codepoint + u32::from(glyph_id - first)],
                );
            }
        }
        for (glyph_id, codepoints) in &self.chars {
            expanded.insert(*glyph_id, codepoints.clone());
        }
        expanded
    }

    /// Writes the CMap resource in its textual (PostScript) form.
    pub fn write_to(&self, mut wr: impl io::Write) -> Result<(), io::Error> {
        writeln!(wr, "/CIDInit /ProcSet findresource begin")?;
        writeln!(wr, "12 dict begin")?;
        writeln!(wr, "begincmap")?;
        writeln!(wr, "/CIDSystemInfo 3 dict dup begin")?;
        writeln!(wr, "  /Registry (Adobe) def")?;
        writeln!(wr, "  /Ordering (UCS) def")?;
        writeln!(wr, "  /Supplement 0 def")?;
        writeln!(wr, "end def")?;
        writeln!(wr, "/CMapName /Adobe-Identity-UCS def")?;
        writeln!(wr, "/CMapType 2 def")?;
        writeln!(wr, "1 begincodespacerange")?;
        writeln!(wr, "<0000> <FFFF>")?;
        writeln!(wr, "endcodespacerange")?;

        let mut line = String::new();
        for block in self.chars.chunks(MAX_BLOCK_ENTRIES) {
            writeln!(wr, "{} beginbfchar", block.len())?;
            for (glyph_id, codepoints) in block {
                line.clear();
                for codepoint in codepoints {
                    push_utf16_hex(&mut line, *codepoint);
                }
                writeln!(wr, "<{:04X}> <{}>", glyph_id, line)?;
            }
            writeln!(wr, "endbfchar")?;
        }

        for block in self.ranges.chunks(MAX_BLOCK_ENTRIES) {
            writeln!(wr, "{} beginbfrange", block.len())?;
            for (first, last, first_codepoint) in block {
                line.clear();
                push_utf16_hex(&mut line, *first_codepoint);
                writeln!(wr, "<{:04X}> <{:04X}> <{}>", first, last, line)?;
            }
            writeln!(wr, "endbfrange")?;
        }

        writeln!(wr, "endcmap")?;
        writeln!(wr, "CMapName currentdict /CMap defineresource pop")?;
        writeln!(wr, "end")?;
        writeln!(wr, "end")?;

        Ok(())
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        buf
    }
}

/// Appends the UTF-16BE encoding of the codepoint as uppercase hex digits.
fn push_utf16_hex(buf: &mut String, codepoint: Codepoint) {
    if codepoint < 0x10000 {
        let _ = write!(buf, "{:04X}", codepoint);
    } else {
        let v = codepoint - 0x10000;
        let _ = write!(buf, "{:04X}{:04X}", 0xD800 + (v >> 10), 0xDC00 + (v & 0x3FF));
    }
}
