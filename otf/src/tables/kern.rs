use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// The kerning table contains the values that control the inter-character spacing for the glyphs in
/// a font. Both the Windows (version 0) and the Apple (version 1.0) layout are understood; only
/// format 0 subtables (ordered lists of kerning pairs) are decoded.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/kern
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6kern.html
#[derive(Debug, PartialEq, Clone)]
pub struct KernTable {
    pub version: Version,
    pub subtables: Vec<Subtable>,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Version {
    Windows,
    Mac,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Subtable {
    /// The type of information is contained in this table.
    pub coverage: Coverage,
    pub data: SubtableData,
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Coverage {
    /// `true` if table is horizontal data, `false` if vertical.
    pub is_horizontal: bool,
    /// `true` if the table has minimum values, `false` if it has kerning values.
    pub is_minimum: bool,
    /// Whether the kerning is perpendicular to the flow of the text.
    pub has_cross_stream: bool,
    /// `true` if the values of this table should replace the values accumulated so far.
    pub is_override: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub enum SubtableData {
    /// Kerning pairs, the key combines the left (high 16 bits) and right glyph id.
    Format0(Vec<(u32, i16)>),
    /// Subtable with an unsupported format, which is skipped.
    Unsupported(u8),
}

impl<'a> FontTable<'a> for KernTable {
    fn name() -> &'static str {
        "kern"
    }
}

impl<'a> FontData<'a> for KernTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let version = match rd.read_u16::<BigEndian>()? {
            0 => Version::Windows,
            1 => Version::Mac,
            v => {
                return Err(super::error(format!(
                    "Unsupported kern table version: {}",
                    v
                )))
            }
        };

        // skipping the second part of macOS' fixed32 version
        if version == Version::Mac {
            rd.read_u16::<BigEndian>()?;
        }

        let n_tables = match version {
            Version::Windows => rd.read_u16::<BigEndian>()? as u32,
            Version::Mac => rd.read_u32::<BigEndian>()?,
        };

        let mut subtables = Vec::with_capacity(n_tables.min(8) as usize);
        for _ in 0..n_tables {
            subtables.push(Subtable::unpack(rd, version)?);
        }

        Ok(KernTable { version, subtables })
    }
}

impl<'a> FontData<'a> for Subtable {
    type UnpackDep = Version;

    fn unpack<R: AsRef<[u8]>>(
        rd: &mut Cursor<R>,
        version: Self::UnpackDep,
    ) -> Result<Self, io::Error> {
        let start = rd.position();
        let (length, format, coverage) = match version {
            Version::Windows => {
                let _version = rd.read_u16::<BigEndian>()?;
                let length = rd.read_u16::<BigEndian>()? as u64;
                let format = rd.read_u8()?;
                let coverage = rd.read_u8()?;
                let coverage = Coverage {
                    is_horizontal: coverage & 1 != 0,
                    is_minimum: coverage & 2 != 0,
                    has_cross_stream: coverage & 4 != 0,
                    is_override: coverage & 8 != 0,
                };
                (length, format, coverage)
            }
            Version::Mac => {
                let length = rd.read_u32::<BigEndian>()? as u64;
                let coverage = rd.read_u8()?;
                let format = rd.read_u8()?;
                let coverage = Coverage {
                    is_horizontal: coverage & 0x80 == 0,
                    has_cross_stream: coverage & 0x40 != 0,
                    ..Default::default()
                };
                let _tuple_index = rd.read_u16::<BigEndian>()?;
                (length, format, coverage)
            }
        };

        let data = match format {
            // The length of large format 0 subtables overflows the u16 length field of the Windows
            // layout, which is why the pairs are read according to n_pairs instead.
            0 => {
                let n_pairs = rd.read_u16::<BigEndian>()?;
                // search_range, entry_selector, range_shift
                super::skip(rd, 6);

                let mut pairs = Vec::with_capacity(n_pairs as usize);
                for _ in 0..n_pairs {
                    pairs.push((rd.read_u32::<BigEndian>()?, rd.read_i16::<BigEndian>()?));
                }
                SubtableData::Format0(pairs)
            }
            format => {
                log::debug!("skipping unsupported kern subtable format {}", format);
                rd.set_position(start + length);
                SubtableData::Unsupported(format)
            }
        };

        Ok(Subtable { coverage, data })
    }
}
