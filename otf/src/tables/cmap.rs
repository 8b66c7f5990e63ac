mod format12;
mod format4;

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::Arc;

use super::{FontData, FontTable};
use crate::utils::limit_read::LimitRead;
use byteorder::{BigEndian, ReadBytesExt};
pub use format12::Format12;
pub use format4::Format4;

/// A font's CMAP table, which defines the mapping of character codes to the glyph index values
/// used in the font. All encoding records are kept; choosing which one to use is left to the
/// consumer. Supported subtable formats are 4 and 12, records pointing to other formats are
/// skipped.
///
/// See OpenType spec: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
#[derive(Debug, PartialEq, Clone)]
pub struct CmapTable {
    pub(crate) encodings: Vec<Encoding>,
}

/// An encoding record together with its decoded subtable. Records that point to the same offset
/// share the subtable.
#[derive(Debug, PartialEq, Clone)]
pub struct Encoding {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub subtable: Arc<Subtable>,
}

impl CmapTable {
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }
}

impl<'a> FontTable<'a> for CmapTable {
    fn name() -> &'static str {
        "cmap"
    }
}

impl<'a> FontData<'a> for CmapTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let _version = rd.read_u16::<BigEndian>()?;
        let num_tables = rd.read_u16::<BigEndian>()?;

        let mut records = Vec::with_capacity(num_tables.min(8) as usize);
        for _ in 0..num_tables {
            let platform_id = rd.read_u16::<BigEndian>()?;
            let encoding_id = rd.read_u16::<BigEndian>()?;
            // byte offset from beginning of table to the subtable for this encoding
            let offset = rd.read_u32::<BigEndian>()?;
            records.push((platform_id, encoding_id, offset));
        }

        let mut subtables: HashMap<u32, Arc<Subtable>> = HashMap::new();
        let mut encodings = Vec::with_capacity(records.len());
        for (platform_id, encoding_id, offset) in records {
            let subtable = match subtables.get(&offset) {
                Some(subtable) => subtable.clone(),
                None => {
                    rd.set_position(offset as u64);
                    match Subtable::unpack(rd)? {
                        Some(subtable) => {
                            let subtable = Arc::new(subtable);
                            subtables.insert(offset, subtable.clone());
                            subtable
                        }
                        None => continue,
                    }
                }
            };
            encodings.push(Encoding {
                platform_id,
                encoding_id,
                subtable,
            });
        }

        if encodings.is_empty() {
            log::debug!("cmap table does not contain any supported subtable");
        }

        Ok(CmapTable { encodings })
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Subtable {
    Format4(Format4),
    Format12(Format12),
}

impl Subtable {
    pub fn glyph_id(&self, codepoint: u32) -> Option<u16> {
        match self {
            Subtable::Format4(subtable) => subtable.glyph_id(codepoint),
            Subtable::Format12(subtable) => subtable.glyph_id(codepoint),
        }
    }

    /// All (codepoint, glyph id) pairs of the subtable in ascending codepoint order.
    pub fn mappings(&self) -> Vec<(u32, u16)> {
        match self {
            Subtable::Format4(subtable) => subtable.mappings().collect(),
            Subtable::Format12(subtable) => subtable.mappings().collect(),
        }
    }
}

impl Subtable {
    /// Decodes the subtable at the cursor's position. Returns `None` for unsupported formats.
    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Option<Self>, io::Error> {
        let format = rd.read_u16::<BigEndian>()?;

        match format {
            4 => {
                // length includes format and length
                let length = rd.read_u16::<BigEndian>()?.saturating_sub(4);
                let window = LimitRead::from_cursor(rd, length as usize)?;
                let subtable = Format4::unpack(&mut Cursor::new(window), ())?;
                Ok(Some(Subtable::Format4(subtable)))
            }
            12 => {
                rd.read_u16::<BigEndian>()?; // reserved
                // length includes format, reserved and length
                let length = rd.read_u32::<BigEndian>()?.saturating_sub(8);
                let window = LimitRead::from_cursor(rd, length as usize)?;
                let subtable = Format12::unpack(&mut Cursor::new(window), ())?;
                Ok(Some(Subtable::Format12(subtable)))
            }
            _ => {
                log::debug!("skipping unsupported cmap subtable format {}", format);
                Ok(None)
            }
        }
    }
}
