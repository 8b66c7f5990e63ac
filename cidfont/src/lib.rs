//! Embedding of TrueType/OpenType fonts as composite (Type 0 / CIDFontType2) PDF fonts, and the
//! shaping of text into positioned glyph runs for those fonts.
//!
//! ```ignore
//! let font = CidFont::from_slice(&data, 0)?;
//! let run = font.shape_tracked("Hello World", &Features::default());
//! let width = run.width(12.0);
//!
//! let embedded = font.embed(&EmbedOptions::default())?;
//! ```

mod error;
mod stream;
pub mod fonts;

pub use error::Error;
pub use fonts::{
    codepoints_from_utf16, CharacterMap, CidFont, CidFontDictionary, CmapSubtable, Codepoint,
    EmbedOptions, EmbeddedFont, Features, Filter, FontDescriptor, FontGlyphUsage, FontMetrics,
    FontSource, FontStream, GlyphAdjustment, GlyphBounds, GlyphId, GlyphMetrics, GlyphRun,
    KernSubtable, KerningTable, LayoutEngine, PositionedGlyphRun, StreamMeta, Tag, ToUnicodeCMap,
    Type0Font, WidthEntry, Widths,
};
