mod tables;
mod utils;

use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use tables::FontTable;
use utils::limit_read::LimitRead;

pub use tables::cmap::{CmapTable, Encoding, Subtable as CmapSubtable};
pub use tables::glyf::GlyphBounds;
pub use tables::kern::{
    Coverage as KernCoverage, KernTable, Subtable as KernSubtable,
    SubtableData as KernSubtableData, Version as KernVersion,
};
pub use tables::name::{NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POST_SCRIPT_NAME};

/// A parsed TrueType/OpenType font. The tables required to lay out and embed text are decoded,
/// the raw font program is kept as is for embedding.
#[derive(Debug, PartialEq, Clone)]
pub struct OpenTypeFont {
    data: Vec<u8>,
    sfnt_version: SfntVersion,
    head_table: tables::head::HeadTable,
    hhea_table: tables::hhea::HheaTable,
    maxp_table: tables::maxp::MaxpTable,
    hmtx_table: tables::hmtx::HmtxTable,
    os2_table: Option<tables::os2::Os2Table>,
    post_table: Option<tables::post::PostTable>,
    name_table: Option<tables::name::NameTable>,
    cmap_table: Option<CmapTable>,
    kern_table: Option<KernTable>,
    glyf_table: Option<tables::glyf::GlyfTable>,
}

impl OpenTypeFont {
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<Self, io::Error> {
        let data = data.as_ref();
        let mut cursor = Cursor::new(data);
        let offset_table = OffsetTable::unpack(&mut cursor)?;

        let head_table: tables::head::HeadTable =
            offset_table.unpack_required_table((), &mut cursor)?;
        let hhea_table: tables::hhea::HheaTable =
            offset_table.unpack_required_table((), &mut cursor)?;
        let maxp_table: tables::maxp::MaxpTable =
            offset_table.unpack_required_table((), &mut cursor)?;
        let hmtx_table: tables::hmtx::HmtxTable =
            offset_table.unpack_required_table((&hhea_table, &maxp_table), &mut cursor)?;

        // CFF based fonts come without loca and glyf
        let glyf_table = match offset_table.unpack_optional_table::<tables::loca::LocaTable, _>(
            (&head_table, &maxp_table),
            &mut cursor,
        ) {
            Some(loca_table) => offset_table
                .unpack_optional_table::<tables::glyf::GlyfTable, _>(&loca_table, &mut cursor),
            None => None,
        };

        let font = OpenTypeFont {
            sfnt_version: offset_table.sfnt_version,
            os2_table: offset_table.unpack_optional_table((), &mut cursor),
            post_table: offset_table.unpack_optional_table((), &mut cursor),
            name_table: offset_table.unpack_optional_table((), &mut cursor),
            cmap_table: offset_table.unpack_optional_table((), &mut cursor),
            kern_table: offset_table.unpack_optional_table((), &mut cursor),
            glyf_table,
            head_table,
            hhea_table,
            maxp_table,
            hmtx_table,
            data: data.to_vec(),
        };
        log::debug!(
            "parsed font {:?} ({} glyphs, {} units per em)",
            font.post_script_name(),
            font.num_glyphs(),
            font.units_per_em()
        );

        Ok(font)
    }

    /// The raw font program.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn sfnt_version(&self) -> SfntVersion {
        self.sfnt_version
    }

    pub fn units_per_em(&self) -> u16 {
        self.head_table.units_per_em
    }

    pub fn num_glyphs(&self) -> u16 {
        self.maxp_table.num_glyphs()
    }

    /// The bounding box for all glyphs (`[x_min, y_min, x_max, y_max]`).
    pub fn bbox(&self) -> [i16; 4] {
        self.head_table.bbox()
    }

    pub fn ascent(&self) -> i16 {
        self.hhea_table.ascent
    }

    pub fn descent(&self) -> i16 {
        self.hhea_table.descent
    }

    pub fn advance_width_max(&self) -> u16 {
        self.hhea_table.advance_width_max
    }

    pub fn advance_width(&self, glyph_id: u16) -> Option<u16> {
        self.hmtx_table.advance_width(glyph_id)
    }

    /// Whether the font carries TrueType outlines (`glyf` table).
    pub fn has_glyph_outlines(&self) -> bool {
        self.glyf_table.is_some()
    }

    pub fn glyph_bounds(&self, glyph_id: u16) -> Option<GlyphBounds> {
        self.glyf_table
            .as_ref()
            .and_then(|glyf| glyf.glyph_bounds(glyph_id))
    }

    pub fn typo_ascender(&self) -> Option<i16> {
        self.typo_metrics().map(|m| m.ascender)
    }

    pub fn typo_descender(&self) -> Option<i16> {
        self.typo_metrics().map(|m| m.descender)
    }

    fn typo_metrics(&self) -> Option<&tables::os2::TypoMetrics> {
        self.os2_table.as_ref().and_then(|os2| os2.typo_metrics.as_ref())
    }

    /// Italic angle in counter-clockwise degrees from the vertical.
    pub fn italic_angle(&self) -> f32 {
        self.post_table
            .as_ref()
            .map(|post| post.italic_angle())
            .unwrap_or(0.0)
    }

    pub fn name(&self, name_id: u16) -> Option<&str> {
        self.name_table.as_ref().and_then(|name| name.get(name_id))
    }

    pub fn post_script_name(&self) -> Option<&str> {
        self.name(NAME_ID_POST_SCRIPT_NAME)
    }

    pub fn cmap(&self) -> Option<&CmapTable> {
        self.cmap_table.as_ref()
    }

    pub fn kern(&self) -> Option<&KernTable> {
        self.kern_table.as_ref()
    }
}

/// This table contains a dictionary of all font tables included in the file.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6.html
#[derive(Debug, PartialEq)]
struct OffsetTable {
    /// OpenType fonts that contain TrueType outlines should use the value of 0x00010000. OpenType
    /// fonts containing CFF data (version 1 or 2) should use 0x4F54544F ('OTTO', when
    /// re-interpreted as a Tag).
    sfnt_version: SfntVersion,
    /// Table records of the font. Expected to be ordered ascending by their tag.
    tables: Vec<TableRecord>,
}

impl OffsetTable {
    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Self, io::Error> {
        let sfnt_version = SfntVersion::unpack(rd)?;
        let num_tables = rd.read_u16::<BigEndian>()?;
        // search_range, entry_selector, range_shift
        tables::skip(rd, 6);

        let mut tables = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            tables.push(TableRecord::unpack(rd)?);
        }

        Ok(OffsetTable {
            sfnt_version,
            tables,
        })
    }

    fn get_table_record(&self, tag: &str) -> Option<&TableRecord> {
        self.tables
            .binary_search_by(|r| r.tag.as_str().cmp(tag))
            .ok()
            .and_then(|i| self.tables.get(i))
    }

    fn unpack_table<'a, T, R>(
        &self,
        dep: T::UnpackDep,
        cursor: &mut Cursor<R>,
    ) -> Result<Option<T>, io::Error>
    where
        R: AsRef<[u8]>,
        T: FontTable<'a>,
    {
        let record = match self.get_table_record(T::name()) {
            Some(record) => record,
            None => return Ok(None),
        };

        cursor.set_position(record.offset as u64);
        let mut limit_read = Cursor::new(LimitRead::from_cursor(cursor, record.length as usize)?);
        Ok(Some(T::unpack(&mut limit_read, dep)?))
    }

    fn unpack_required_table<'a, T, R>(
        &self,
        dep: T::UnpackDep,
        cursor: &mut Cursor<R>,
    ) -> Result<T, io::Error>
    where
        R: AsRef<[u8]>,
        T: FontTable<'a>,
    {
        self.unpack_table(dep, cursor)?
            .ok_or_else(|| tables::error(format!("{} table missing", T::name())))
    }

    /// Tables that are nice to have, a malformed one is treated as if it was absent.
    fn unpack_optional_table<'a, T, R>(
        &self,
        dep: T::UnpackDep,
        cursor: &mut Cursor<R>,
    ) -> Option<T>
    where
        R: AsRef<[u8]>,
        T: FontTable<'a>,
    {
        match self.unpack_table(dep, cursor) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("ignoring malformed {} table: {}", T::name(), err);
                None
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SfntVersion {
    TrueType,
    CFF,
}

impl SfntVersion {
    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Self, io::Error> {
        match rd.read_u32::<BigEndian>()? {
            // 'true' is used by some older Apple fonts
            0x00010000 | 0x74727565 => Ok(SfntVersion::TrueType),
            0x4F54544F => Ok(SfntVersion::CFF),
            v => Err(tables::error(format!("Unknown sfnt_version {:#x}", v))),
        }
    }
}

#[derive(Debug, PartialEq)]
struct TableRecord {
    tag: String,
    offset: u32,
    length: u32,
}

impl TableRecord {
    fn unpack<R: AsRef<[u8]>>(rd: &mut Cursor<R>) -> Result<Self, io::Error> {
        let mut tag = [0; 4];
        rd.read_exact(&mut tag)?;
        let _check_sum = rd.read_u32::<BigEndian>()?;
        Ok(TableRecord {
            tag: String::from_utf8_lossy(&tag).to_string(),
            offset: rd.read_u32::<BigEndian>()?,
            length: rd.read_u32::<BigEndian>()?,
        })
    }
}
