//! A font assembled in memory, used by the unit tests.

use super::source::{CmapSubtable, Codepoint, FontSource, GlyphBounds, GlyphId, KernSubtable};

#[derive(Debug, Clone)]
pub(crate) struct TestFont {
    pub units_per_em: u16,
    pub advance_widths: Vec<u16>,
    pub bounds: Option<Vec<Option<GlyphBounds>>>,
    pub typo: Option<(i16, i16)>,
    pub hhea: (i16, i16),
    pub bbox: [i16; 4],
    pub italic_angle: f32,
    pub kern: Vec<KernSubtable>,
    pub cmaps: Vec<CmapSubtable>,
    pub name: Option<String>,
    pub data: Vec<u8>,
}

impl TestFont {
    pub fn new(units_per_em: u16, advance_widths: Vec<u16>) -> Self {
        TestFont {
            units_per_em,
            advance_widths,
            bounds: None,
            typo: None,
            hhea: (800, -200),
            bbox: [-50, -250, 1100, 950],
            italic_angle: 0.0,
            kern: Vec::new(),
            cmaps: Vec::new(),
            name: Some("Test Sans".to_string()),
            data: b"\x00\x01\x00\x00font program".to_vec(),
        }
    }

    pub fn with_cmap(
        mut self,
        platform_id: u16,
        encoding_id: u16,
        mappings: &[(Codepoint, GlyphId)],
    ) -> Self {
        self.cmaps.push(CmapSubtable {
            platform_id,
            encoding_id,
            mappings: mappings.to_vec(),
        });
        self
    }

    pub fn with_kerning(mut self, is_override: bool, pairs: &[(GlyphId, GlyphId, i16)]) -> Self {
        self.kern.push(KernSubtable {
            is_horizontal: true,
            is_override,
            pairs: Some(
                pairs
                    .iter()
                    .map(|(l, r, v)| ((*l as u32) << 16 | *r as u32, *v))
                    .collect(),
            ),
            ..Default::default()
        });
        self
    }
}

impl FontSource for TestFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn num_glyphs(&self) -> u16 {
        self.advance_widths.len() as u16
    }

    fn advance_width(&self, glyph_id: GlyphId) -> u16 {
        self.advance_widths[glyph_id as usize]
    }

    fn advance_width_max(&self) -> u16 {
        self.advance_widths.iter().cloned().max().unwrap_or(0)
    }

    fn has_glyph_outlines(&self) -> bool {
        self.bounds.is_some()
    }

    fn glyph_bounds(&self, glyph_id: GlyphId) -> Option<GlyphBounds> {
        self.bounds
            .as_ref()
            .and_then(|bounds| bounds.get(glyph_id as usize).cloned().flatten())
    }

    fn typo_ascender(&self) -> Option<i16> {
        self.typo.map(|(ascender, _)| ascender)
    }

    fn typo_descender(&self) -> Option<i16> {
        self.typo.map(|(_, descender)| descender)
    }

    fn ascent(&self) -> i16 {
        self.hhea.0
    }

    fn descent(&self) -> i16 {
        self.hhea.1
    }

    fn bbox(&self) -> [i16; 4] {
        self.bbox
    }

    fn italic_angle(&self) -> f32 {
        self.italic_angle
    }

    fn kern_subtables(&self) -> Vec<KernSubtable> {
        self.kern.clone()
    }

    fn cmap_subtables(&self) -> Vec<CmapSubtable> {
        self.cmaps.clone()
    }

    fn post_script_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

pub(crate) fn bounds(y_min: i16, y_max: i16) -> Option<GlyphBounds> {
    Some(GlyphBounds {
        x_min: 0,
        y_min,
        x_max: 500,
        y_max,
    })
}
