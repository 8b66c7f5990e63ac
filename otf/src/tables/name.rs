use std::char;
use std::io::{self, Cursor};

use super::{FontData, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// This table includes human-readable names for features and settings, copyright notices,
/// font names, style names, and other information related to the font.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/name
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html
#[derive(Debug, PartialEq, Clone)]
pub struct NameTable {
    /// The decoded name records. Records of encodings that cannot be decoded are dropped.
    pub(crate) names: Vec<Name>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Name {
    pub(crate) platform_id: u16,
    pub(crate) language_id: u16,
    pub(crate) name_id: u16,
    pub(crate) value: String,
}

pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_POST_SCRIPT_NAME: u16 = 6;

impl NameTable {
    /// Looks up the name with the given `name_id`, preferring US English Windows records, then any
    /// Unicode/Windows record, then Macintosh records.
    pub fn get(&self, name_id: u16) -> Option<&str> {
        let candidates = || self.names.iter().filter(move |n| n.name_id == name_id);
        candidates()
            .find(|n| n.platform_id == 3 && n.language_id == 0x409)
            .or_else(|| candidates().find(|n| n.platform_id == 3 || n.platform_id == 0))
            .or_else(|| candidates().next())
            .map(|n| n.value.as_str())
    }
}

impl<'a> FontTable<'a> for NameTable {
    fn name() -> &'static str {
        "name"
    }
}

impl<'a> FontData<'a> for NameTable {
    type UnpackDep = ();

    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>, _: Self::UnpackDep) -> Result<Self, io::Error> {
        let format = rd.read_u16::<BigEndian>()?;
        if format > 1 {
            return Err(super::error(format!("Invalid NAME table format {}", format)));
        }
        let count = rd.read_u16::<BigEndian>()?;
        // Offset to start of string storage (from start of table).
        let storage_offset = rd.read_u16::<BigEndian>()? as usize;

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            records.push((
                rd.read_u16::<BigEndian>()?, // platform_id
                rd.read_u16::<BigEndian>()?, // encoding_id
                rd.read_u16::<BigEndian>()?, // language_id
                rd.read_u16::<BigEndian>()?, // name_id
                rd.read_u16::<BigEndian>()? as usize, // length
                rd.read_u16::<BigEndian>()? as usize, // offset
            ));
        }

        let data = rd.get_ref().as_ref();
        let mut names = Vec::with_capacity(records.len());
        for (platform_id, encoding_id, language_id, name_id, length, offset) in records {
            let start = storage_offset + offset;
            let raw = match data.get(start..start + length) {
                Some(raw) => raw,
                None => continue,
            };
            let value = match (platform_id, encoding_id) {
                (0, _) | (3, 0) | (3, 1) | (3, 10) => decode_utf16_be(raw),
                (1, 0) => raw.iter().map(|b| *b as char).collect(),
                _ => continue,
            };
            names.push(Name {
                platform_id,
                language_id,
                name_id,
                value,
            });
        }
        // format 1 language-tag records are not of interest

        Ok(NameTable { names })
    }
}

fn decode_utf16_be(raw: &[u8]) -> String {
    let units = raw
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|ch| ch.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
