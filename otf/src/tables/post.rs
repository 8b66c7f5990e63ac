use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table contains additional information needed to use OTF fonts on PostScript printers.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/post
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6post.html
#[derive(Debug, PartialEq, Clone)]
pub struct PostTable {
    /// Italic angle in counter-clockwise degrees from the vertical. Zero for upright text, negative
    /// for text that leans to the right (forward). Stored as 16.16 fixed point.
    pub(crate) italic_angle: i32,
}

impl PostTable {
    pub fn italic_angle(&self) -> f32 {
        self.italic_angle as f32 / 65536.0
    }
}

impl<'a> FontTable<'a> for PostTable {
    fn name() -> &'static str {
        "post"
    }
}

impl<'a> FontData<'a> for PostTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        rd.read_u32::<BigEndian>()?; // version
        let italic_angle = rd.read_i32::<BigEndian>()?;
        // underline metrics, is_fixed_pitch, memory hints and glyph names are not of interest

        Ok(PostTable { italic_angle })
    }
}
