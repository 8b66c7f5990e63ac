use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table establishes the memory requirements for this font. Only the glyph count is of
/// interest here, the remaining TrueType (version 1.0) limits are not decoded.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6maxp.html
#[derive(Debug, PartialEq, Clone)]
pub enum MaxpTable {
    // Version 0.5
    CFF { num_glyphs: u16 },
    // Version 1.0
    TrueType { num_glyphs: u16 },
}

impl MaxpTable {
    pub fn num_glyphs(&self) -> u16 {
        match self {
            MaxpTable::CFF { num_glyphs } | MaxpTable::TrueType { num_glyphs } => *num_glyphs,
        }
    }
}

impl<'a> FontTable<'a> for MaxpTable {
    fn name() -> &'static str {
        "maxp"
    }
}

impl<'a> FontData<'a> for MaxpTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let version = rd.read_u32::<BigEndian>()?;
        let num_glyphs = rd.read_u16::<BigEndian>()?;
        match version {
            0x00005000 => Ok(MaxpTable::CFF { num_glyphs }),
            0x00010000 => Ok(MaxpTable::TrueType { num_glyphs }),
            _ => Err(super::error(format!("Invalid MAXP version {:#x}", version))),
        }
    }
}
