use std::io::{self, Cursor};

use super::head::HeadTable;
use super::maxp::MaxpTable;
use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table stores the offsets to the locations of the glyphs in the font, relative to the
/// beginning of the glyph data table.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/loca
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6loca.html
#[derive(Debug, PartialEq, Clone)]
pub struct LocaTable {
    /// Offsets indexed by glyph id. The size of a glyph data block is inferred from the difference
    /// between two consecutive offsets.
    pub(super) offsets: Vec<u32>,
}

impl<'a> FontTable<'a> for LocaTable {
    fn name() -> &'static str {
        "loca"
    }
}

impl<'a> FontData<'a> for LocaTable {
    type UnpackDep = (&'a HeadTable, &'a MaxpTable);

    fn unpack<R: AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        (head, maxp): Self::UnpackDep,
    ) -> Result<Self, io::Error> {
        let n = maxp.num_glyphs() as usize + 1;
        let mut offsets = Vec::with_capacity(n);
        for _ in 0..n {
            offsets.push(if head.index_to_loc_format == 0 {
                (rd.read_u16::<BigEndian>()? as u32) * 2
            } else {
                rd.read_u32::<BigEndian>()?
            });
        }

        Ok(LocaTable { offsets })
    }
}
