use super::source::{FontSource, GlyphId};

/// Size of the glyph space all metrics are normalized to.
pub const UNITS_PER_EM: i32 = 1000;

/// Scales a value from font design units to the 1000 units per em glyph space (truncating).
pub(crate) fn scale(value: i32, units_per_em: u16) -> i32 {
    value * UNITS_PER_EM / i32::from(units_per_em.max(1))
}

/// Per-glyph metrics of a font, normalized to 1000 units per em and indexed by glyph id.
#[derive(Debug, PartialEq, Clone)]
pub struct GlyphMetrics {
    advance_widths: Vec<i32>,
    ascents: Vec<i32>,
    descents: Vec<i32>,
}

impl GlyphMetrics {
    /// Vertical extrema are taken from the glyph outlines if the font has them. Fonts without
    /// outlines fall back to the OS/2 typographic ascender/descender, and to the global bounding
    /// box as a last resort.
    pub fn from_source<S: FontSource + ?Sized>(font: &S) -> Self {
        let units_per_em = font.units_per_em();
        let num_glyphs = font.num_glyphs() as usize;
        let fallback = match (font.typo_ascender(), font.typo_descender()) {
            (Some(ascender), Some(descender)) => (ascender, descender),
            _ => {
                let bbox = font.bbox();
                (bbox[3], bbox[1])
            }
        };
        let has_outlines = font.has_glyph_outlines();

        let mut metrics = GlyphMetrics {
            advance_widths: Vec::with_capacity(num_glyphs),
            ascents: Vec::with_capacity(num_glyphs),
            descents: Vec::with_capacity(num_glyphs),
        };
        for glyph_id in 0..font.num_glyphs() {
            let (ascent, descent) = if has_outlines {
                // glyphs without outline (e.g. space) do not extend vertically
                font.glyph_bounds(glyph_id)
                    .map(|bounds| (bounds.y_max, bounds.y_min))
                    .unwrap_or((0, 0))
            } else {
                fallback
            };
            metrics.advance_widths.push(scale(
                i32::from(font.advance_width(glyph_id)),
                units_per_em,
            ));
            metrics.ascents.push(scale(i32::from(ascent), units_per_em));
            metrics.descents.push(scale(i32::from(descent), units_per_em));
        }

        metrics
    }

    pub fn num_glyphs(&self) -> usize {
        self.advance_widths.len()
    }

    /// # Panics
    ///
    /// Panics if `glyph_id` is not a glyph of the font.
    pub fn advance_width(&self, glyph_id: GlyphId) -> i32 {
        self.advance_widths[glyph_id as usize]
    }

    /// # Panics
    ///
    /// Panics if `glyph_id` is not a glyph of the font.
    pub fn ascent(&self, glyph_id: GlyphId) -> i32 {
        self.ascents[glyph_id as usize]
    }

    /// # Panics
    ///
    /// Panics if `glyph_id` is not a glyph of the font.
    pub fn descent(&self, glyph_id: GlyphId) -> i32 {
        self.descents[glyph_id as usize]
    }

    pub fn advance_widths(&self) -> &[i32] {
        &self.advance_widths
    }
}

/// Font-wide metrics as they are written into the font descriptor, normalized to 1000 units per
/// em.
#[derive(Debug, PartialEq, Clone)]
pub struct FontMetrics {
    pub bbox: [i32; 4],
    pub ascent: i32,
    pub descent: i32,
    /// Approximated by the ascent.
    pub cap_height: i32,
    pub default_width: i32,
    pub italic_angle: f32,
}

impl FontMetrics {
    pub fn from_source<S: FontSource + ?Sized>(font: &S) -> Self {
        let units_per_em = font.units_per_em();
        let normalize = |v: i16| scale(i32::from(v), units_per_em);

        let bbox = font.bbox();
        let ascent = normalize(font.typo_ascender().unwrap_or_else(|| font.ascent()));
        let descent = normalize(font.typo_descender().unwrap_or_else(|| font.descent()));

        FontMetrics {
            bbox: [
                normalize(bbox[0]),
                normalize(bbox[1]),
                normalize(bbox[2]),
                normalize(bbox[3]),
            ],
            ascent,
            descent,
            cap_height: ascent,
            default_width: scale_u16(font.advance_width_max(), units_per_em),
            italic_angle: font.italic_angle(),
        }
    }
}

fn scale_u16(value: u16, units_per_em: u16) -> i32 {
    scale(i32::from(value), units_per_em)
}
