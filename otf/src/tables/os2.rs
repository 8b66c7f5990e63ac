use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table consists of a set of metrics and other data that are required for a font. Only the
/// typographic vertical metrics are decoded.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/os2
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6OS2.html
#[derive(Debug, PartialEq, Clone)]
pub struct Os2Table {
    /// The typographic ascender and descender. Missing in the truncated 68 byte tables of some old
    /// Apple fonts.
    pub(crate) typo_metrics: Option<TypoMetrics>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TypoMetrics {
    pub(crate) ascender: i16,
    pub(crate) descender: i16,
}

impl<'a> FontTable<'a> for Os2Table {
    fn name() -> &'static str {
        "OS/2"
    }
}

impl<'a> FontData<'a> for Os2Table {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let len = rd.get_ref().as_ref().len() as u64;

        // version, x_avg_char_width, us_weight_class, us_width_class, fs_type, 4x subscript,
        // 4x superscript, 2x strikeout, s_family_class
        super::skip(rd, 16 * 2);
        // panose, 4x ul_unicode_range, ach_vend_id
        super::skip(rd, 10 + 4 * 4 + 4);
        // fs_selection, us_first_char_index, us_last_char_index
        super::skip(rd, 3 * 2);

        let typo_metrics = if rd.position() + 4 <= len {
            Some(TypoMetrics {
                ascender: rd.read_i16::<BigEndian>()?,
                descender: rd.read_i16::<BigEndian>()?,
            })
        } else {
            None
        };

        Ok(Os2Table { typo_metrics })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::io::Cursor;

    use super::*;
    use byteorder::WriteBytesExt;

    pub(crate) fn os2_data(version: u16, ascender: i16, descender: i16) -> Vec<u8> {
        let mut data = Vec::new();
        data.write_u16::<BigEndian>(version).unwrap();
        data.write_i16::<BigEndian>(500).unwrap();
        data.write_u16::<BigEndian>(400).unwrap();
        data.write_u16::<BigEndian>(5).unwrap();
        data.write_u16::<BigEndian>(0).unwrap();
        for _ in 0..11 {
            data.write_i16::<BigEndian>(0).unwrap();
        }
        data.extend_from_slice(&[2, 0, 5, 9, 0, 0, 0, 0, 0, 0]);
        for _ in 0..4 {
            data.write_u32::<BigEndian>(0).unwrap();
        }
        data.extend_from_slice(b"BE5N");
        data.write_u16::<BigEndian>(192).unwrap();
        data.write_u16::<BigEndian>(13).unwrap();
        data.write_u16::<BigEndian>(65535).unwrap();
        data.write_i16::<BigEndian>(ascender).unwrap();
        data.write_i16::<BigEndian>(descender).unwrap();
        data.write_i16::<BigEndian>(0).unwrap();
        data.write_u16::<BigEndian>(977).unwrap();
        data.write_u16::<BigEndian>(272).unwrap();
        if version > 0 {
            data.write_u32::<BigEndian>(0).unwrap();
            data.write_u32::<BigEndian>(0).unwrap();
        }
        if version > 1 {
            data.write_i16::<BigEndian>(530).unwrap();
            data.write_i16::<BigEndian>(735).unwrap();
            data.write_u16::<BigEndian>(0).unwrap();
            data.write_u16::<BigEndian>(32).unwrap();
            data.write_u16::<BigEndian>(8).unwrap();
        }
        data
    }

    #[test]
    fn test_os2_table_decode() {
        let data = os2_data(4, 977, -272);
        let os2 = Os2Table::unpack(&mut Cursor::new(&data[..]), ()).unwrap();

        assert_eq!(
            os2,
            Os2Table {
                typo_metrics: Some(TypoMetrics {
                    ascender: 977,
                    descender: -272,
                }),
            }
        );
    }

    #[test]
    fn test_os2_table_version_0() {
        let data = os2_data(0, 800, -200);
        let os2 = Os2Table::unpack(&mut Cursor::new(&data[..]), ()).unwrap();
        assert_eq!(os2.typo_metrics.map(|m| m.ascender), Some(800));
        assert_eq!(os2.typo_metrics.map(|m| m.descender), Some(-200));
    }

    #[test]
    fn test_os2_table_truncated_apple_table() {
        let mut data = os2_data(0, 800, -200);
        data.truncate(68);
        let os2 = Os2Table::unpack(&mut Cursor::new(&data[..]), ()).unwrap();
        assert_eq!(os2.typo_metrics, None);
    }
}
