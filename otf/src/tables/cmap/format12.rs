use std::cmp::Ordering;
use std::convert::TryFrom;
use std::io::{self, Cursor};

use crate::tables::FontData;
use byteorder::{BigEndian, ReadBytesExt};

/// Largest valid Unicode scalar value; groups reaching beyond it are clipped.
const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Segmented coverage, the standard character-to-glyph-index mapping subtable for fonts supporting
/// Unicode character repertoires that include supplementary-plane characters (U+10000 to
/// U+10FFFF).
/// See spec: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage
#[derive(Debug, PartialEq, Clone)]
pub struct Format12 {
    sequential_map_groups: Vec<SequentialMapGroup>,
}

#[derive(Debug, PartialEq, Clone)]
struct SequentialMapGroup {
    start_char_code: u32,
    end_char_code: u32,
    start_glyph_id: u32,
}

impl SequentialMapGroup {
    fn glyph_id(&self, codepoint: u32) -> Option<u16> {
        let gid = self
            .start_glyph_id
            .checked_add(codepoint.checked_sub(self.start_char_code)?)?;
        u16::try_from(gid).ok().filter(|gid| *gid != 0)
    }
}

impl Format12 {
    pub fn glyph_id(&self, codepoint: u32) -> Option<u16> {
        let ix = self
            .sequential_map_groups
            .binary_search_by(|group| {
                if group.end_char_code < codepoint {
                    Ordering::Less
                } else if group.start_char_code > codepoint {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .ok()?;
        self.sequential_map_groups[ix].glyph_id(codepoint)
    }

    pub fn mappings(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.sequential_map_groups
            .iter()
            .filter(|group| group.start_char_code <= group.end_char_code)
            .flat_map(|group| {
                (group.start_char_code..=group.end_char_code.min(MAX_CODEPOINT))
                    .filter_map(move |c| group.glyph_id(c).map(|gid| (c, gid)))
            })
    }
}

impl<'a> FontData<'a> for Format12 {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let _language = rd.read_u32::<BigEndian>()?;
        let num_groups = rd.read_u32::<BigEndian>()?;

        // do not trust num_groups for the allocation, each group takes 12 bytes
        let available = (rd.get_ref().as_ref().len() as u64).saturating_sub(rd.position()) / 12;
        let mut groups = Vec::with_capacity((num_groups as u64).min(available) as usize);
        for _ in 0..num_groups {
            groups.push(SequentialMapGroup {
                start_char_code: rd.read_u32::<BigEndian>()?,
                end_char_code: rd.read_u32::<BigEndian>()?,
                start_glyph_id: rd.read_u32::<BigEndian>()?,
            });
        }

        Ok(Format12 {
            sequential_map_groups: groups,
        })
    }
}
