use std::iter;
use std::ops::Range;

use super::cmap::CharacterMap;
use super::kerning::KerningTable;
use super::layout::{Features, GlyphAdjustment, LayoutEngine};
use super::metrics::{scale, GlyphMetrics, UNITS_PER_EM};
use super::source::{Codepoint, GlyphId};
use super::usage::SharedGlyphUsage;

/// Decodes UTF-16 into codepoints, combining surrogate pairs. Unpaired surrogates are kept as
/// codepoints of their own (which no font maps to a glyph).
pub fn codepoints_from_utf16(units: &[u16]) -> Vec<Codepoint> {
    std::char::decode_utf16(units.iter().cloned())
        .map(|c| match c {
            Ok(c) => u32::from(c),
            Err(err) => u32::from(err.unpaired_surrogate()),
        })
        .collect()
}

/// A sequence of glyphs that keeps track of which of the original glyphs each glyph was produced
/// from while substitutions are applied.
#[derive(Debug, PartialEq, Clone)]
pub struct GlyphRun {
    original: Vec<GlyphId>,
    glyphs: Vec<GlyphId>,
    /// Indices into `original`, one list per glyph.
    sources: Vec<Vec<usize>>,
}

impl GlyphRun {
    pub fn new(glyphs: Vec<GlyphId>) -> Self {
        GlyphRun {
            sources: (0..glyphs.len()).map(|i| vec![i]).collect(),
            original: glyphs.clone(),
            glyphs,
        }
    }

    pub fn glyphs(&self) -> &[GlyphId] {
        &self.glyphs
    }

    /// The glyphs as they were before any substitution.
    pub fn original_glyphs(&self) -> &[GlyphId] {
        &self.original
    }

    /// Indices of the original glyphs the glyph at `index` was produced from.
    pub fn sources(&self, index: usize) -> &[usize] {
        &self.sources[index]
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Single substitution.
    pub fn replace(&mut self, index: usize, glyph_id: GlyphId) {
        self.glyphs[index] = glyph_id;
    }

    /// Ligature substitution, replaces the glyphs in `range` with a single glyph.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty or out of bounds.
    pub fn ligate(&mut self, range: Range<usize>, glyph_id: GlyphId) {
        assert!(
            range.start < range.end && range.end <= self.glyphs.len(),
            "invalid ligature range {:?} for a run of {} glyphs",
            range,
            self.glyphs.len()
        );

        let mut sources = self
            .sources
            .drain(range.clone())
            .flatten()
            .collect::<Vec<_>>();
        sources.sort_unstable();
        sources.dedup();

        self.glyphs.splice(range.clone(), iter::once(glyph_id));
        self.sources.insert(range.start, sources);
    }

    /// Multiple substitution, replaces one glyph with several glyphs, which all originate from the
    /// replaced glyph.
    pub fn decompose(&mut self, index: usize, glyph_ids: &[GlyphId]) {
        let sources = self.sources.remove(index);
        self.glyphs.splice(index..index + 1, glyph_ids.iter().cloned());
        for offset in 0..glyph_ids.len() {
            self.sources.insert(index + offset, sources.clone());
        }
    }

    /// Glyphs that were produced by merging more than one original glyph, each with the original
    /// glyphs in order.
    pub fn merged_glyphs(&self) -> Vec<(GlyphId, Vec<GlyphId>)> {
        self.glyphs
            .iter()
            .zip(&self.sources)
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(glyph_id, sources)| {
                (
                    *glyph_id,
                    sources.iter().map(|i| self.original[*i]).collect(),
                )
            })
            .collect()
    }
}

/// A shaped glyph run with per-glyph positioning, in the 1000 units per em glyph space.
#[derive(Debug, PartialEq, Clone)]
pub struct PositionedGlyphRun {
    run: GlyphRun,
    adjustments: Vec<GlyphAdjustment>,
    width: i32,
    ascent: i32,
    descent: i32,
}

impl PositionedGlyphRun {
    pub(crate) fn new(
        run: GlyphRun,
        adjustments: Vec<GlyphAdjustment>,
        metrics: &GlyphMetrics,
    ) -> Self {
        let mut width = 0;
        let mut ascent = None;
        let mut descent = None;
        for (glyph_id, adjustment) in run.glyphs().iter().zip(&adjustments) {
            width += metrics.advance_width(*glyph_id) + adjustment.x_advance;

            let glyph_ascent = metrics.ascent(*glyph_id) + adjustment.y_placement;
            let glyph_descent = metrics.descent(*glyph_id) + adjustment.y_placement;
            ascent = Some(ascent.map_or(glyph_ascent, |a: i32| a.max(glyph_ascent)));
            descent = Some(descent.map_or(glyph_descent, |d: i32| d.min(glyph_descent)));
        }

        PositionedGlyphRun {
            run,
            adjustments,
            width,
            ascent: ascent.unwrap_or(0),
            descent: descent.unwrap_or(0),
        }
    }

    pub fn glyphs(&self) -> &[GlyphId] {
        self.run.glyphs()
    }

    pub fn run(&self) -> &GlyphRun {
        &self.run
    }

    pub fn adjustments(&self) -> &[GlyphAdjustment] {
        &self.adjustments
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }

    pub fn width(&self, font_size: f32) -> f32 {
        to_font_size(self.width, font_size)
    }

    pub fn ascent(&self, font_size: f32) -> f32 {
        to_font_size(self.ascent, font_size)
    }

    pub fn descent(&self, font_size: f32) -> f32 {
        to_font_size(self.descent, font_size)
    }

    pub fn height(&self, font_size: f32) -> f32 {
        to_font_size(self.ascent - self.descent, font_size)
    }

    /// Encodes the glyphs as 2-byte big-endian CIDs (Identity-H).
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.run.len() * 2);
        self.encode_into(&mut buf);
        buf
    }

    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        for glyph_id in self.run.glyphs() {
            buf.extend_from_slice(&glyph_id.to_be_bytes());
        }
    }
}

fn to_font_size(value: i32, font_size: f32) -> f32 {
    value as f32 * font_size / UNITS_PER_EM as f32
}

/// Shapes codepoints into positioned glyph runs: map, substitute, position (or kern).
pub(crate) struct Shaper<'a> {
    pub cmap: &'a CharacterMap,
    pub metrics: &'a GlyphMetrics,
    pub kerning: &'a KerningTable,
    pub layout: Option<&'a dyn LayoutEngine>,
    pub units_per_em: u16,
}

impl<'a> Shaper<'a> {
    pub fn shape(
        &self,
        codepoints: &[Codepoint],
        features: &Features,
        usage: Option<&SharedGlyphUsage>,
    ) -> PositionedGlyphRun {
        let glyphs = codepoints
            .iter()
            .map(|c| {
                self.cmap.glyph_id(*c).unwrap_or_else(|| {
                    log::trace!("no glyph for U+{:04X}, using .notdef", c);
                    0
                })
            })
            .collect();
        let mut run = GlyphRun::new(glyphs);

        if let Some(layout) = self.layout.filter(|l| l.has_substitutions(features)) {
            layout.substitute(&mut run, features);
        }

        if let Some(usage) = usage {
            let mut usage = usage.lock();
            for glyph_id in run.glyphs() {
                usage.mark_used(*glyph_id);
            }
            for (glyph_id, originals) in run.merged_glyphs() {
                usage.add_ligature(glyph_id, originals);
            }
        }

        let adjustments = match self.layout.filter(|l| l.has_positioning(features)) {
            Some(layout) => self.position(layout, &run, features),
            None => self.kern(&run),
        };

        PositionedGlyphRun::new(run, adjustments, self.metrics)
    }

    fn position(
        &self,
        layout: &dyn LayoutEngine,
        run: &GlyphRun,
        features: &Features,
    ) -> Vec<GlyphAdjustment> {
        let mut adjustments = layout.position(run, features);
        adjustments.resize(run.len(), GlyphAdjustment::default());
        for adjustment in &mut adjustments {
            *adjustment = GlyphAdjustment {
                x_placement: scale(adjustment.x_placement, self.units_per_em),
                y_placement: scale(adjustment.y_placement, self.units_per_em),
                x_advance: scale(adjustment.x_advance, self.units_per_em),
                y_advance: scale(adjustment.y_advance, self.units_per_em),
            };
        }
        adjustments
    }

    /// Legacy kerning: the kerning value of a pair is added to the advance of its left glyph.
    fn kern(&self, run: &GlyphRun) -> Vec<GlyphAdjustment> {
        let mut adjustments = vec![GlyphAdjustment::default(); run.len()];
        if self.kerning.is_empty() {
            return adjustments;
        }

        for (i, pair) in run.glyphs().windows(2).enumerate() {
            if let Some(value) = self.kerning.get(pair[0], pair[1]) {
                adjustments[i].x_advance += scale(value, self.units_per_em);
            }
        }
        adjustments
    }
}
