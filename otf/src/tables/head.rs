use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// Global information about the font.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/head
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html
#[derive(Debug, PartialEq, Clone)]
pub struct HeadTable {
    pub(crate) major_version: u16,
    pub(crate) minor_version: u16,
    pub(crate) flags: u16,
    /// Set to a value from 16 to 16384. Any value in this range is valid. In fonts that have
    /// TrueType outlines, a power of 2 is recommended as this allows performance optimizations in
    /// some rasterizers.
    pub(crate) units_per_em: u16,
    /// Bounding box for all glyph bounding boxes, in font design units.
    pub(crate) x_min: i16,
    pub(crate) y_min: i16,
    pub(crate) x_max: i16,
    pub(crate) y_max: i16,
    pub(crate) mac_style: u16,
    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub(crate) index_to_loc_format: i16,
}

impl HeadTable {
    pub fn bbox(&self) -> [i16; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl<'a> FontTable<'a> for HeadTable {
    fn name() -> &'static str {
        "head"
    }
}

impl<'a> FontData<'a> for HeadTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let major_version = rd.read_u16::<BigEndian>()?;
        let minor_version = rd.read_u16::<BigEndian>()?;
        rd.read_u32::<BigEndian>()?; // font_revision
        rd.read_u32::<BigEndian>()?; // check_sum_adjustment
        let magic_number = rd.read_u32::<BigEndian>()?;
        if magic_number != 0x5F0F3CF5 {
            return Err(super::error(format!(
                "Invalid head magic number {:#x}",
                magic_number
            )));
        }
        let flags = rd.read_u16::<BigEndian>()?;
        let units_per_em = rd.read_u16::<BigEndian>()?;
        if units_per_em == 0 {
            return Err(super::error("Font reports 0 units per em"));
        }
        rd.read_i64::<BigEndian>()?; // created
        rd.read_i64::<BigEndian>()?; // modified

        let x_min = rd.read_i16::<BigEndian>()?;
        let y_min = rd.read_i16::<BigEndian>()?;
        let x_max = rd.read_i16::<BigEndian>()?;
        let y_max = rd.read_i16::<BigEndian>()?;
        let mac_style = rd.read_u16::<BigEndian>()?;
        rd.read_u16::<BigEndian>()?; // lowest_rec_ppem
        rd.read_i16::<BigEndian>()?; // font_direction_hint
        let index_to_loc_format = rd.read_i16::<BigEndian>()?;

        Ok(HeadTable {
            major_version,
            minor_version,
            flags,
            units_per_em,
            x_min,
            y_min,
            x_max,
            y_max,
            mac_style,
            index_to_loc_format,
        })
    }
}
