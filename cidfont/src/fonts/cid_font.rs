use super::cmap::CharacterMap;
use super::descriptor::{
    CidFontDictionary, CidToGidMap, FontDescriptor, FontEncoding, FontType, Type0Font, IDENTITY,
};
use super::kerning::KerningTable;
use super::layout::{Features, LayoutEngine};
use super::metrics::{FontMetrics, GlyphMetrics};
use super::shaping::{PositionedGlyphRun, Shaper};
use super::source::{Codepoint, FontSource};
use super::to_unicode::ToUnicodeCMap;
use super::usage::{FontGlyphUsage, SharedGlyphUsage};
use super::widths::Widths;
use crate::stream::FontStream;
use crate::Error;

#[derive(Debug, PartialEq, Clone)]
pub struct EmbedOptions {
    /// Compress the font program and the ToUnicode CMap.
    pub compress: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        EmbedOptions { compress: true }
    }
}

/// A font that is embedded as a composite (Type 0) font with a CIDFontType2 descendant, whose CIDs
/// are the glyph ids of the font.
///
/// The font can be shared by multiple threads laying out text concurrently. Everything derived
/// from the font is immutable, only the record of used glyphs is guarded by a lock.
pub struct CidFont<S> {
    source: S,
    base_font: String,
    cmap: CharacterMap,
    metrics: GlyphMetrics,
    kerning: KerningTable,
    layout: Option<Box<dyn LayoutEngine>>,
    usage: SharedGlyphUsage,
}

impl<S: FontSource> CidFont<S> {
    /// `font_index` distinguishes multiple fonts of one document; it is used to derive the
    /// six-letter tag of the font's base name.
    pub fn new(source: S, font_index: usize) -> Result<Self, Error> {
        let cmap = CharacterMap::select(&source.cmap_subtables(), source.num_glyphs())?;
        let name = font_name(&source).ok_or(Error::MissingFontName)?;

        Ok(CidFont {
            base_font: format!("{}+{}", tag(font_index), name),
            metrics: GlyphMetrics::from_source(&source),
            kerning: KerningTable::from_subtables(&source.kern_subtables()),
            cmap,
            layout: None,
            usage: SharedGlyphUsage::default(),
            source,
        })
    }

    /// Uses the given engine to apply the font's GSUB and GPOS lookups.
    pub fn with_layout_engine(mut self, engine: impl LayoutEngine + 'static) -> Self {
        self.layout = Some(Box::new(engine));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    pub fn character_map(&self) -> &CharacterMap {
        &self.cmap
    }

    pub fn glyph_metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    pub fn kerning(&self) -> &KerningTable {
        &self.kerning
    }

    /// Shapes text for measuring only, the glyphs are not recorded as used.
    pub fn shape(&self, text: &str, features: &Features) -> PositionedGlyphRun {
        self.shape_codepoints(&codepoints(text), features, false)
    }

    /// Shapes text that ends up in the document, the resulting glyphs are recorded as used.
    pub fn shape_tracked(&self, text: &str, features: &Features) -> PositionedGlyphRun {
        self.shape_codepoints(&codepoints(text), features, true)
    }

    pub fn shape_codepoints(
        &self,
        codepoints: &[Codepoint],
        features: &Features,
        track_usage: bool,
    ) -> PositionedGlyphRun {
        let shaper = Shaper {
            cmap: &self.cmap,
            metrics: &self.metrics,
            kerning: &self.kerning,
            layout: self.layout.as_deref(),
            units_per_em: self.source.units_per_em(),
        };
        let usage = if track_usage {
            Some(&self.usage)
        } else {
            None
        };
        shaper.shape(codepoints, features, usage)
    }

    /// Maps every glyph of the font in the ToUnicode CMap, regardless of it being used or not.
    pub fn mark_all_glyphs_used(&self) {
        self.usage.lock().mark_all_used();
    }

    /// A snapshot of the glyphs used so far.
    pub fn usage(&self) -> FontGlyphUsage {
        self.usage.snapshot()
    }

    /// Assembles everything needed to write the font into a document. The whole font program is
    /// embedded, the ToUnicode CMap covers the glyphs used so far.
    pub fn embed(&self, options: &EmbedOptions) -> Result<EmbeddedFont, Error> {
        let usage = self.usage.snapshot();
        let to_unicode = ToUnicodeCMap::from_usage(&self.cmap, &usage);
        let mut cmap_data = Vec::new();
        to_unicode.write_to(&mut cmap_data)?;

        let widths = Widths::compact(self.metrics.advance_widths());
        log::debug!(
            "embedding {} ({} glyphs, {} used, {} bfchar and {} bfrange entries, {} width entries)",
            self.base_font,
            self.metrics.num_glyphs(),
            if usage.all_used() {
                self.metrics.num_glyphs()
            } else {
                usage.glyphs().len()
            },
            to_unicode.chars().len(),
            to_unicode.ranges().len(),
            widths.entries().len(),
        );

        Ok(EmbeddedFont {
            base_font: self.base_font.clone(),
            metrics: FontMetrics::from_source(&self.source),
            widths,
            font_file: FontStream::font_file(self.source.data().to_vec(), options.compress),
            to_unicode: FontStream::new(cmap_data, options.compress),
            to_unicode_cmap: to_unicode,
        })
    }
}

/// The parts of an embedded font. The dictionaries are created with the references the document
/// assigned to the font's objects.
#[derive(Debug, PartialEq, Clone)]
pub struct EmbeddedFont {
    base_font: String,
    metrics: FontMetrics,
    widths: Widths,
    font_file: FontStream,
    to_unicode: FontStream,
    to_unicode_cmap: ToUnicodeCMap,
}

impl EmbeddedFont {
    pub fn base_font(&self) -> &str {
        &self.base_font
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn widths(&self) -> &Widths {
        &self.widths
    }

    /// The `FontFile2` stream.
    pub fn font_file(&self) -> &FontStream {
        &self.font_file
    }

    /// The `ToUnicode` stream.
    pub fn to_unicode(&self) -> &FontStream {
        &self.to_unicode
    }

    pub fn to_unicode_cmap(&self) -> &ToUnicodeCMap {
        &self.to_unicode_cmap
    }

    pub fn type0_font<R>(&self, descendant_font: R, to_unicode: R) -> Type0Font<'_, R> {
        Type0Font {
            subtype: FontType::Type0,
            base_font: &self.base_font,
            encoding: FontEncoding::IdentityH,
            descendant_fonts: [descendant_font],
            to_unicode,
        }
    }

    pub fn cid_font<R>(&self, font_descriptor: R) -> CidFontDictionary<'_, R> {
        CidFontDictionary {
            subtype: FontType::CIDFontType2,
            base_font: &self.base_font,
            cid_system_info: IDENTITY,
            font_descriptor,
            default_width: self.metrics.default_width,
            widths: &self.widths,
            cid_to_gid_map: CidToGidMap::Identity,
        }
    }

    pub fn font_descriptor<R>(&self, font_file: R) -> FontDescriptor<'_, R> {
        FontDescriptor::new(&self.base_font, &self.metrics, font_file)
    }
}

fn codepoints(text: &str) -> Vec<Codepoint> {
    text.chars().map(u32::from).collect()
}

/// The first name of the font that is not empty, with whitespace removed.
fn font_name<S: FontSource>(font: &S) -> Option<String> {
    vec![font.post_script_name(), font.full_name(), font.family_name()]
        .into_iter()
        .flatten()
        .map(|name| name.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .find(|name| !name.is_empty())
}

/// A six-letter tag in the style of font subset tags.
fn tag(n: usize) -> String {
    let tag = format!("{:06}", n % 1_000_000);
    tag.as_bytes().iter().map(|b| (b + 17) as char).collect()
}
