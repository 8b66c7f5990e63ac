use std::io::{self, Cursor};

use super::hhea::HheaTable;
use super::maxp::MaxpTable;
use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table contains glyph metrics used for horizontal text layout.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hmtx.html
#[derive(Debug, PartialEq, Clone)]
pub struct HmtxTable {
    /// Advance widths in font design units, indexed by glyph ID. Glyphs with an ID greater than or
    /// equal to `numberOfHMetrics` share the last advance width (monospaced tail).
    pub(crate) advance_widths: Vec<u16>,
}

impl HmtxTable {
    pub fn advance_width(&self, glyph_id: u16) -> Option<u16> {
        self.advance_widths
            .get(glyph_id as usize)
            .or_else(|| self.advance_widths.last())
            .cloned()
    }
}

impl<'a> FontTable<'a> for HmtxTable {
    fn name() -> &'static str {
        "hmtx"
    }
}

impl<'a> FontData<'a> for HmtxTable {
    type UnpackDep = (&'a HheaTable, &'a MaxpTable);

    fn unpack<R: AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        (hhea, maxp): Self::UnpackDep,
    ) -> Result<Self, io::Error> {
        let n = hhea.number_of_h_metrics.min(maxp.num_glyphs());
        let mut advance_widths = Vec::with_capacity(n as usize);
        for _ in 0..n {
            advance_widths.push(rd.read_u16::<BigEndian>()?);
            rd.read_i16::<BigEndian>()?; // lsb
        }
        // the trailing left side bearings are not of interest

        Ok(HmtxTable { advance_widths })
    }
}
