#![allow(dead_code)]

use std::collections::BTreeMap;

use cidfont::{CmapSubtable, Codepoint, FontSource, GlyphBounds, GlyphId, KernSubtable};

/// A font described entirely by its metrics and tables.
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    pub units_per_em: u16,
    pub advance_widths: Vec<u16>,
    pub cmaps: Vec<CmapSubtable>,
    pub kern: Vec<KernSubtable>,
    pub name: Option<String>,
}

impl SyntheticFont {
    pub fn new(units_per_em: u16, advance_widths: Vec<u16>) -> Self {
        SyntheticFont {
            units_per_em,
            advance_widths,
            cmaps: Vec::new(),
            kern: Vec::new(),
            name: Some("Synthetic-Regular".to_string()),
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
                    .map(|(l, r, v)| (u32::from(*l) << 16 | u32::from(*r), *v))
                    .collect(),
            ),
            ..Default::default()
        });
        self
    }
}

impl FontSource for SyntheticFont {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn num_glyphs(&self) -> u16 {
        self.advance_widths.len() as u16
    }

    fn advance_width(&self, glyph_id: GlyphId) -> u16 {
        self.advance_widths[usize::from(glyph_id)]
    }

    fn advance_width_max(&self) -> u16 {
        self.advance_widths.iter().cloned().max().unwrap_or(0)
    }

    fn has_glyph_outlines(&self) -> bool {
        false
    }

    fn glyph_bounds(&self, _glyph_id: GlyphId) -> Option<GlyphBounds> {
        None
    }

    fn typo_ascender(&self) -> Option<i16> {
        Some(1500)
    }

    fn typo_descender(&self) -> Option<i16> {
        Some(-500)
    }

    fn ascent(&self) -> i16 {
        1800
    }

    fn descent(&self) -> i16 {
        -600
    }

    fn bbox(&self) -> [i16; 4] {
        [-100, -600, 2000, 1900]
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
        b"\x00\x01\x00\x00synthetic font program"
    }
}

/// A block of a written CMap: its operator, the declared entry count and the entry lines.
#[derive(Debug)]
pub struct Block {
    pub operator: String,
    pub declared: usize,
    pub lines: Vec<String>,
}

/// Splits a ToUnicode CMap into its bfchar and bfrange blocks.
pub fn blocks(cmap: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;
    for line in cmap.lines() {
        if let Some(block) = current.as_mut() {
            if line == format!("end{}", block.operator) {
                blocks.extend(current.take());
            } else {
                block.lines.push(line.to_string());
            }
            continue;
        }

        let mut parts = line.split(' ');
        if let (Some(count), Some(operator), None) = (parts.next(), parts.next(), parts.next()) {
            if operator == "beginbfchar" || operator == "beginbfrange" {
                current = Some(Block {
                    operator: operator["begin".len()..].to_string(),
                    declared: count.parse().unwrap(),
                    lines: Vec::new(),
                });
            }
        }
    }
    assert!(current.is_none(), "unterminated block");
    blocks
}

fn hex(token: &str) -> &str {
    token.trim_start_matches('<').trim_end_matches('>')
}

fn glyph_id(token: &str) -> GlyphId {
    GlyphId::from_str_radix(hex(token), 16).unwrap()
}

/// Decodes a hex string of UTF-16BE code units.
fn codepoints(token: &str) -> Vec<Codepoint> {
    let hex = hex(token);
    let units: Vec<u16> = (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(&hex[i..i + 4], 16).unwrap())
        .collect();
    cidfont::codepoints_from_utf16(&units)
}

/// Parses the entries of a written ToUnicode CMap back into one entry per glyph.
pub fn parse_cmap(cmap: &str) -> BTreeMap<GlyphId, Vec<Codepoint>> {
    let mut result = BTreeMap::new();
    for block in blocks(cmap) {
        for line in &block.lines {
            let tokens: Vec<&str> = line.split(' ').collect();
            match (block.operator.as_str(), tokens.as_slice()) {
                ("bfchar", [glyph, value]) => {
                    result.insert(glyph_id(glyph), codepoints(value));
                }
                ("bfrange", [first, last, value]) => {
                    let first = glyph_id(first);
                    let start = codepoints(value)[0];
                    for glyph in first..=glyph_id(last) {
                        result.insert(glyph, vec![start + u32::from(glyph - first)]);
                    }
                }
                _ => panic!("unexpected line {:?} in {} block", line, block.operator),
            }
        }
    }
    result
}

pub fn range_bounds(cmap: &str) -> Vec<(GlyphId, GlyphId)> {
    blocks(cmap)
        .into_iter()
        .filter(|block| block.operator == "bfrange")
        .flat_map(|block| block.lines)
        .map(|line| {
            let tokens: Vec<&str> = line.split(' ').collect();
            (glyph_id(tokens[0]), glyph_id(tokens[1]))
        })
        .collect()
}
