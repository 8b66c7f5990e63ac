use std::convert::TryFrom;
use std::io::{self, Cursor};

use crate::tables::FontData;
use byteorder::{BigEndian, ReadBytesExt};

/// Segment mapping to delta values, the standard character-to-glyph-index mapping subtable for
/// fonts that support only Unicode Basic Multilingual Plane characters (U+0000 to U+FFFF).
/// See spec: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
#[derive(Debug, PartialEq, Clone)]
pub struct Format4 {
    /// End characterCode for each segment, last=0xFFFF.
    pub(crate) end_code: Vec<u16>,
    /// Start character code for each segment.
    pub(crate) start_code: Vec<u16>,
    /// Delta for all character codes in segment.
    pub(crate) id_delta: Vec<i16>,
    /// Offsets into glyph_id_array or 0
    pub(crate) id_range_offset: Vec<u16>,
    /// Glyph index array (arbitrary length)
    pub(crate) glyph_id_array: Vec<u16>,
}

impl Format4 {
    pub fn glyph_id(&self, codepoint: u32) -> Option<u16> {
        // Return None for codepoints > `u16::MAX`
        let codepoint = u16::try_from(codepoint).ok()?;

        // the first segment whose end code is greater than or equal to the character code
        let ix = match self.end_code.binary_search(&codepoint) {
            Ok(ix) => ix,
            Err(ix) => ix,
        };
        let start_code = *self.start_code.get(ix)?;
        if start_code > codepoint {
            return None;
        }

        let id_delta = *self.id_delta.get(ix)?;
        let id_range_offset = *self.id_range_offset.get(ix)?;
        let glyph_id = if id_range_offset == 0 {
            codepoint.wrapping_add(id_delta as u16)
        } else {
            // The offset is relative to the position of the id_range_offset entry itself, which
            // makes it an index into the concatenation of id_range_offset and glyph_id_array.
            let pos = (id_range_offset / 2) as usize + (codepoint - start_code) as usize + ix;
            let val = if pos < self.id_range_offset.len() {
                *self.id_range_offset.get(pos)?
            } else {
                *self.glyph_id_array.get(pos - self.id_range_offset.len())?
            };
            if val == 0 {
                return None;
            }
            val.wrapping_add(id_delta as u16)
        };

        Some(glyph_id).filter(|gid| *gid != 0)
    }

    /// All (codepoint, glyph id) pairs this subtable maps, in ascending codepoint order. Unmapped
    /// codepoints (those resolving to the missing glyph) are left out.
    pub fn mappings(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.start_code
            .iter()
            .zip(self.end_code.iter())
            // the final 0xFFFF segment is a required terminator and maps nothing
            .filter(|(start, _)| **start != 0xFFFF)
            .flat_map(move |(start, end)| {
                (u32::from(*start)..=u32::from(*end))
                    .filter_map(move |c| self.glyph_id(c).map(|gid| (c, gid)))
            })
    }
}

impl<'a> FontData<'a> for Format4 {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let _language = rd.read_u16::<BigEndian>()?;
        let seg_count_x2 = rd.read_u16::<BigEndian>()?;
        let seg_count = (seg_count_x2 / 2) as usize;
        // search_range, entry_selector, range_shift
        crate::tables::skip(rd, 6);

        let mut end_code = vec![0; seg_count];
        rd.read_u16_into::<BigEndian>(&mut end_code)?;
        let _reserved_pad = rd.read_u16::<BigEndian>()?;
        let mut start_code = vec![0; seg_count];
        rd.read_u16_into::<BigEndian>(&mut start_code)?;
        let mut id_delta = vec![0; seg_count];
        rd.read_i16_into::<BigEndian>(&mut id_delta)?;
        let mut id_range_offset = vec![0; seg_count];
        rd.read_u16_into::<BigEndian>(&mut id_range_offset)?;

        let remaining = (rd.get_ref().as_ref().len() as u64).saturating_sub(rd.position()) / 2;
        let mut glyph_id_array = vec![0; remaining as usize];
        rd.read_u16_into::<BigEndian>(&mut glyph_id_array)?;

        Ok(Format4 {
            end_code,
            start_code,
            id_delta,
            id_range_offset,
            glyph_id_array,
        })
    }
}
