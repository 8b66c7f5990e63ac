use super::cid_font::CidFont;
use super::source::{CmapSubtable, FontSource, GlyphBounds, GlyphId, KernSubtable};
use crate::Error;
use ::otf::{KernSubtableData, OpenTypeFont, NAME_ID_FAMILY, NAME_ID_FULL_NAME};

impl FontSource for OpenTypeFont {
    fn units_per_em(&self) -> u16 {
        OpenTypeFont::units_per_em(self)
    }

    fn num_glyphs(&self) -> u16 {
        OpenTypeFont::num_glyphs(self)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> u16 {
        OpenTypeFont::advance_width(self, glyph_id).unwrap_or(0)
    }

    fn advance_width_max(&self) -> u16 {
        OpenTypeFont::advance_width_max(self)
    }

    fn has_glyph_outlines(&self) -> bool {
        OpenTypeFont::has_glyph_outlines(self)
    }

    fn glyph_bounds(&self, glyph_id: GlyphId) -> Option<GlyphBounds> {
        OpenTypeFont::glyph_bounds(self, glyph_id)
    }

    fn typo_ascender(&self) -> Option<i16> {
        OpenTypeFont::typo_ascender(self)
    }

    fn typo_descender(&self) -> Option<i16> {
        OpenTypeFont::typo_descender(self)
    }

    fn ascent(&self) -> i16 {
        OpenTypeFont::ascent(self)
    }

    fn descent(&self) -> i16 {
        OpenTypeFont::descent(self)
    }

    fn bbox(&self) -> [i16; 4] {
        OpenTypeFont::bbox(self)
    }

    fn italic_angle(&self) -> f32 {
        OpenTypeFont::italic_angle(self)
    }

    fn kern_subtables(&self) -> Vec<KernSubtable> {
        let kern = match self.kern() {
            Some(kern) => kern,
            None => return Vec::new(),
        };
        kern.subtables
            .iter()
            .map(|subtable| KernSubtable {
                is_horizontal: subtable.coverage.is_horizontal,
                is_minimum: subtable.coverage.is_minimum,
                has_cross_stream: subtable.coverage.has_cross_stream,
                is_override: subtable.coverage.is_override,
                pairs: match &subtable.data {
                    KernSubtableData::Format0(pairs) => Some(pairs.clone()),
                    KernSubtableData::Unsupported(_) => None,
                },
            })
            .collect()
    }

    fn cmap_subtables(&self) -> Vec<CmapSubtable> {
        self.cmap()
            .map(|cmap| {
                cmap.encodings()
                    .iter()
                    .map(|encoding| CmapSubtable {
                        platform_id: encoding.platform_id,
                        encoding_id: encoding.encoding_id,
                        mappings: encoding.subtable.mappings(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn post_script_name(&self) -> Option<String> {
        OpenTypeFont::post_script_name(self).map(String::from)
    }

    fn full_name(&self) -> Option<String> {
        self.name(NAME_ID_FULL_NAME).map(String::from)
    }

    fn family_name(&self) -> Option<String> {
        self.name(NAME_ID_FAMILY).map(String::from)
    }

    fn data(&self) -> &[u8] {
        OpenTypeFont::data(self)
    }
}

impl CidFont<OpenTypeFont> {
    /// Parses a TrueType/OpenType font program.
    pub fn from_slice(data: impl AsRef<[u8]>, font_index: usize) -> Result<Self, Error> {
        let font = OpenTypeFont::from_slice(data)?;
        CidFont::new(font, font_index)
    }
}
