//! Everything needed to embed a TrueType/OpenType font as a CID-keyed font and to lay out text
//! with it.

mod cid_font;
mod cmap;
mod descriptor;
mod kerning;
mod layout;
mod metrics;
mod otf;
mod shaping;
mod source;
#[cfg(test)]
mod testing;
mod to_unicode;
mod usage;
mod widths;

pub use self::cid_font::{CidFont, EmbedOptions, EmbeddedFont};
pub use self::cmap::CharacterMap;
pub use self::descriptor::{
    CidFontDictionary, CidSystemInfo, CidToGidMap, FontDescriptor, FontEncoding, FontType,
    Type0Font, FLAG_SYMBOLIC, IDENTITY, STEM_V,
};
pub use self::kerning::KerningTable;
pub use self::layout::{Features, GlyphAdjustment, LayoutEngine, Tag};
pub use self::metrics::{FontMetrics, GlyphMetrics, UNITS_PER_EM};
pub use self::shaping::{codepoints_from_utf16, GlyphRun, PositionedGlyphRun};
pub use self::source::{CmapSubtable, Codepoint, FontSource, GlyphBounds, GlyphId, KernSubtable};
pub use self::to_unicode::ToUnicodeCMap;
pub use self::usage::FontGlyphUsage;
pub use self::widths::{WidthEntry, Widths};
pub use crate::stream::{Filter, FontStream, StreamMeta};
