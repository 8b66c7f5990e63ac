pub use otf::GlyphBounds;

/// Font-internal identifier of a glyph; `0` is the `.notdef` (missing) glyph.
pub type GlyphId = u16;

/// A Unicode scalar value.
pub type Codepoint = u32;

/// A legacy (`kern` table) kerning subtable.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct KernSubtable {
    pub is_horizontal: bool,
    /// The subtable holds minimum values instead of kerning values.
    pub is_minimum: bool,
    pub has_cross_stream: bool,
    /// Values replace the ones accumulated from previous subtables instead of adding to them.
    pub is_override: bool,
    /// Kerning pairs keyed by `left << 16 | right`. `None` for subtables that do not hold plain
    /// kerning pairs (e.g. state tables).
    pub pairs: Option<Vec<(u32, i16)>>,
}

/// A character map subtable of a font, identified by its platform and encoding id.
#[derive(Debug, PartialEq, Clone)]
pub struct CmapSubtable {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub mappings: Vec<(Codepoint, GlyphId)>,
}

/// A read-only view of a parsed font. All values are in font design units.
pub trait FontSource {
    fn units_per_em(&self) -> u16;

    fn num_glyphs(&self) -> u16;

    fn advance_width(&self, glyph_id: GlyphId) -> u16;

    fn advance_width_max(&self) -> u16;

    /// Whether the font carries glyph outlines with per-glyph bounding boxes.
    fn has_glyph_outlines(&self) -> bool;

    /// Outline bounds of a glyph; `None` for glyphs without an outline.
    fn glyph_bounds(&self, glyph_id: GlyphId) -> Option<GlyphBounds>;

    fn typo_ascender(&self) -> Option<i16>;

    fn typo_descender(&self) -> Option<i16>;

    /// The `hhea` ascent.
    fn ascent(&self) -> i16;

    /// The `hhea` descent.
    fn descent(&self) -> i16;

    /// The `head` bounding box (`[x_min, y_min, x_max, y_max]`).
    fn bbox(&self) -> [i16; 4];

    fn italic_angle(&self) -> f32 {
        0.0
    }

    fn kern_subtables(&self) -> Vec<KernSubtable> {
        Vec::new()
    }

    fn cmap_subtables(&self) -> Vec<CmapSubtable>;

    fn post_script_name(&self) -> Option<String>;

    fn full_name(&self) -> Option<String> {
        None
    }

    fn family_name(&self) -> Option<String> {
        None
    }

    /// The raw font program as it is embedded into the document.
    fn data(&self) -> &[u8];
}
