use serde::Serialize;

use super::metrics::FontMetrics;
use super::widths::Widths;

/// Font descriptor flag: the font contains glyphs outside the standard Latin character set.
pub const FLAG_SYMBOLIC: u32 = 1 << 2;

/// TrueType fonts do not store a dominant vertical stem width, use a typical regular weight.
pub const STEM_V: i32 = 80;

#[derive(Debug, PartialEq, Serialize)]
pub enum FontType {
    Type0,
    CIDFontType2,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum FontEncoding {
    #[serde(rename = "Identity-H")]
    IdentityH,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum CidToGidMap {
    Identity,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
#[serde(rename = "")]
pub struct CidSystemInfo {
    pub registry: &'static str,
    pub ordering: &'static str,
    pub supplement: i32,
}

/// CIDs are glyph ids, which is the Adobe Identity ordering.
pub const IDENTITY: CidSystemInfo = CidSystemInfo {
    registry: "Adobe",
    ordering: "Identity",
    supplement: 0,
};

/// The composite font, which is the font resource referenced by content streams.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
#[serde(rename = "Font")]
pub struct Type0Font<'a, R> {
    pub subtype: FontType,
    pub base_font: &'a str,
    pub encoding: FontEncoding,
    pub descendant_fonts: [R; 1],
    pub to_unicode: R,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
#[serde(rename = "Font")]
pub struct CidFontDictionary<'a, R> {
    pub subtype: FontType,
    pub base_font: &'a str,
    #[serde(rename = "CIDSystemInfo")]
    pub cid_system_info: CidSystemInfo,
    pub font_descriptor: R,
    #[serde(rename = "DW")]
    pub default_width: i32,
    #[serde(rename = "W")]
    pub widths: &'a Widths,
    #[serde(rename = "CIDToGIDMap")]
    pub cid_to_gid_map: CidToGidMap,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FontDescriptor<'a, R> {
    pub font_name: &'a str,
    pub flags: u32,
    pub font_b_box: [i32; 4],
    pub italic_angle: f32,
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    pub stem_v: i32,
    pub font_file_2: R,
}

impl<'a, R> FontDescriptor<'a, R> {
    pub(crate) fn new(font_name: &'a str, metrics: &FontMetrics, font_file: R) -> Self {
        FontDescriptor {
            font_name,
            flags: FLAG_SYMBOLIC,
            font_b_box: metrics.bbox,
            italic_angle: metrics.italic_angle,
            ascent: metrics.ascent,
            descent: metrics.descent,
            cap_height: metrics.cap_height,
            stem_v: STEM_V,
            font_file_2: font_file,
        }
    }
}
