use std::io::{self, Cursor};

use super::loca::LocaTable;
use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// The 'glyf' table is comprised of a list of glyph data blocks, each of which provides the
/// description for a single glyph. Only the glyph headers (their bounding boxes) are decoded; the
/// outlines themselves are embedded untouched as part of the font program.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6glyf.html
#[derive(Debug, PartialEq, Clone)]
pub struct GlyfTable {
    /// Bounding boxes indexed by glyph ID; `None` for glyphs without an outline (e.g. space).
    pub(crate) bounds: Vec<Option<GlyphBounds>>,
}

/// The bounding box of a glyph outline, in font design units.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct GlyphBounds {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl GlyfTable {
    pub fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds> {
        self.bounds.get(glyph_id as usize).cloned().flatten()
    }
}

impl<'a> FontTable<'a> for GlyfTable {
    fn name() -> &'static str {
        "glyf"
    }
}

impl<'a> FontData<'a> for GlyfTable {
    type UnpackDep = &'a LocaTable;

    fn unpack<R: AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        loca: Self::UnpackDep,
    ) -> Result<Self, io::Error> {
        let mut bounds = Vec::with_capacity(loca.offsets.len().saturating_sub(1));

        for (start, end) in loca.offsets.iter().zip(loca.offsets.iter().skip(1)) {
            if start >= end {
                // glyph has no outline
                bounds.push(None);
                continue;
            }

            rd.set_position(*start as u64);
            let _number_of_contours = rd.read_i16::<BigEndian>()?;
            bounds.push(Some(GlyphBounds {
                x_min: rd.read_i16::<BigEndian>()?,
                y_min: rd.read_i16::<BigEndian>()?,
                x_max: rd.read_i16::<BigEndian>()?,
                y_max: rd.read_i16::<BigEndian>()?,
            }));
        }

        Ok(GlyfTable { bounds })
    }
}
