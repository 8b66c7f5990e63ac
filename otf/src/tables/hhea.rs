use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table contains information for horizontal layout.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hhea.html
#[derive(Debug, PartialEq, Clone)]
pub struct HheaTable {
    /// Distance from baseline of highest ascender.
    pub(crate) ascent: i16,
    /// Distance from baseline of lowest descender
    pub(crate) descent: i16,
    /// Maximum advance width value in 'hmtx' table.
    pub(crate) advance_width_max: u16,
    /// Number of hMetric entries in 'hmtx' table
    pub(crate) number_of_h_metrics: u16,
}

impl<'a> FontTable<'a> for HheaTable {
    fn name() -> &'static str {
        "hhea"
    }
}

impl<'a> FontData<'a> for HheaTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        rd.read_u16::<BigEndian>()?; // major_version
        rd.read_u16::<BigEndian>()?; // minor_version
        let ascent = rd.read_i16::<BigEndian>()?;
        let descent = rd.read_i16::<BigEndian>()?;
        rd.read_i16::<BigEndian>()?; // line_gap
        let advance_width_max = rd.read_u16::<BigEndian>()?;
        // min_left_side_bearing, min_right_side_bearing, x_max_extent, caret_slope_rise,
        // caret_slope_run, caret_offset, 4 times reserved, metric_data_format
        super::skip(rd, 11 * 2);
        let number_of_h_metrics = rd.read_u16::<BigEndian>()?;

        Ok(HheaTable {
            ascent,
            descent,
            advance_width_max,
            number_of_h_metrics,
        })
    }
}
