mod common;

use std::collections::BTreeMap;

use cidfont::{CidFont, EmbedOptions, Error, Features, ToUnicodeCMap, WidthEntry, Widths};
use common::{blocks, parse_cmap, range_bounds, SyntheticFont};
use miniz_oxide::inflate::decompress_to_vec_zlib;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_widths(rng: &mut StdRng) -> Vec<i32> {
    let mut widths = Vec::new();
    let len: usize = rng.gen_range(0..200);
    while widths.len() < len {
        let width = [0, 250, 500, 600, 1000][rng.gen_range(0..5usize)];
        for _ in 0..=rng.gen_range(0..5) {
            widths.push(width);
        }
    }
    widths
}

#[test]
fn widths_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let widths = random_widths(&mut rng);
        assert_eq!(Widths::compact(&widths).expand(), widths);
    }
}

#[test]
fn width_runs_of_three_or_more_become_ranges() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let widths = random_widths(&mut rng);
        for entry in Widths::compact(&widths).entries() {
            match entry {
                WidthEntry::Range { first, last, .. } => assert!(last - first >= 2),
                WidthEntry::List { widths, .. } => {
                    for run in widths.windows(3) {
                        assert!(!(run[0] == run[1] && run[1] == run[2]), "{:?}", widths);
                    }
                }
            }
        }
    }

    assert_eq!(
        Widths::compact(&[300, 300]).entries(),
        &[WidthEntry::List {
            start: 0,
            widths: vec![300, 300],
        }]
    );
    assert_eq!(
        Widths::compact(&[300, 300, 300]).entries(),
        &[WidthEntry::Range {
            first: 0,
            last: 2,
            width: 300,
        }]
    );
}

#[test]
fn to_unicode_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let mut map = BTreeMap::new();
        let mut glyph_id = 0u16;
        let mut codepoint = 0x20;
        while glyph_id < 1500 {
            glyph_id += rng.gen_range(1..4u16);
            codepoint += if rng.gen_range(0..4) == 0 {
                rng.gen_range(1..0x41u32)
            } else {
                1
            };
            map.insert(glyph_id, codepoint);
        }

        let cmap = ToUnicodeCMap::new(&map, &BTreeMap::new());
        let text = String::from_utf8(cmap.to_vec()).unwrap();
        let expected: BTreeMap<_, _> = map.iter().map(|(g, c)| (*g, vec![*c])).collect();
        assert_eq!(parse_cmap(&text), expected);
        assert_eq!(cmap.expand(), expected);
    }
}

#[test]
fn to_unicode_ranges_stay_within_high_byte() {
    let map: BTreeMap<u16, u32> = (200..800).map(|g| (g, 0x4E00 + u32::from(g))).collect();
    let cmap = ToUnicodeCMap::new(&map, &BTreeMap::new());
    let text = String::from_utf8(cmap.to_vec()).unwrap();

    let bounds = range_bounds(&text);
    assert_eq!(bounds, vec![(200, 255), (256, 511), (512, 767), (768, 799)]);
    for (first, last) in bounds {
        assert_eq!(first >> 8, last >> 8);
    }
}

#[test]
fn to_unicode_blocks_hold_at_most_100_entries() {
    // every other codepoint, so no ranges can be formed
    let chars: BTreeMap<u16, u32> = (1..=250).map(|g| (g, 0x100 + 2 * u32::from(g))).collect();
    // disjoint ranges of two glyphs
    let ranges: BTreeMap<u16, u32> = (0..230u16)
        .flat_map(|i| {
            let glyph_id = 1000 + i * 4;
            let codepoint = 0x3000 + u32::from(i) * 4;
            vec![(glyph_id, codepoint), (glyph_id + 1, codepoint + 1)]
        })
        .collect();
    let map: BTreeMap<u16, u32> = chars.into_iter().chain(ranges).collect();

    let cmap = ToUnicodeCMap::new(&map, &BTreeMap::new());
    let text = String::from_utf8(cmap.to_vec()).unwrap();
    let blocks = blocks(&text);
    let counts: Vec<(&str, usize)> = blocks
        .iter()
        .map(|block| (block.operator.as_str(), block.declared))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("bfchar", 100),
            ("bfchar", 100),
            ("bfchar", 50),
            ("bfrange", 100),
            ("bfrange", 100),
            ("bfrange", 30),
        ]
    );
    for block in &blocks {
        assert_eq!(block.declared, block.lines.len());
    }
}

#[test]
fn to_unicode_prefers_smallest_codepoint() {
    let source = SyntheticFont::new(1000, vec![0, 500, 600]).with_cmap(
        3,
        1,
        &[(0x61, 1), (0x41, 1), (0x42, 2)],
    );
    let font = CidFont::new(source, 0).unwrap();
    font.mark_all_glyphs_used();
    let embedded = font.embed(&EmbedOptions { compress: false }).unwrap();

    let text = String::from_utf8(embedded.to_unicode().data().to_vec()).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(1, vec![0x41]);
    expected.insert(2, vec![0x42]);
    assert_eq!(parse_cmap(&text), expected);
}

#[test]
fn to_unicode_covers_used_glyphs_only() {
    let source = SyntheticFont::new(1000, vec![0, 500, 600, 700])
        .with_cmap(3, 1, &[(0x41, 1), (0x42, 2), (0x1F600, 3)]);
    let font = CidFont::new(source, 0).unwrap();
    font.shape("AB", &Features::default());
    font.shape_tracked("A\u{1F600}", &Features::default());
    let embedded = font.embed(&EmbedOptions { compress: false }).unwrap();

    let text = String::from_utf8(embedded.to_unicode().data().to_vec()).unwrap();
    assert!(text.contains("<0003> <D83DDE00>"));
    let mut expected = BTreeMap::new();
    expected.insert(1, vec![0x41]);
    expected.insert(3, vec![0x1F600]);
    assert_eq!(parse_cmap(&text), expected);
}

#[test]
fn embed_compressed() {
    let source = SyntheticFont::new(1000, vec![0, 500, 500, 500, 600])
        .with_cmap(3, 1, &[(0x41, 1), (0x42, 2), (0x43, 3), (0x44, 4)]);
    let font = CidFont::new(source, 3).unwrap();
    font.shape_tracked("ABCD", &Features::default());
    let embedded = font.embed(&EmbedOptions::default()).unwrap();

    assert_eq!(embedded.base_font(), "AAAAAD+Synthetic-Regular");
    assert!(embedded.font_file().is_compressed());
    assert_eq!(
        decompress_to_vec_zlib(embedded.font_file().data()).unwrap(),
        b"\x00\x01\x00\x00synthetic font program".to_vec()
    );
    assert_eq!(
        serde_json::to_value(embedded.font_file().meta()).unwrap(),
        serde_json::json!({
            "Length": embedded.font_file().data().len(),
            "Filter": "FlateDecode",
            "Length1": 26,
        })
    );

    let cmap = decompress_to_vec_zlib(embedded.to_unicode().data()).unwrap();
    assert_eq!(cmap, embedded.to_unicode_cmap().to_vec());
    assert_eq!(
        serde_json::to_value(embedded.cid_font(7)).unwrap()["W"],
        serde_json::json!([0, [0], 1, 3, 500, 4, [600]])
    );
}

#[test]
fn font_descriptor_metrics() {
    let source = SyntheticFont::new(2000, vec![0, 1000]).with_cmap(3, 1, &[(0x41, 1)]);
    let embedded = CidFont::new(source, 0)
        .unwrap()
        .embed(&EmbedOptions::default())
        .unwrap();

    assert_eq!(
        serde_json::to_value(embedded.font_descriptor(9)).unwrap(),
        serde_json::json!({
            "FontName": "AAAAAA+Synthetic-Regular",
            "Flags": 4,
            "FontBBox": [-50, -300, 1000, 950],
            "ItalicAngle": 0.0,
            "Ascent": 750,
            "Descent": -250,
            "CapHeight": 750,
            "StemV": 80,
            "FontFile2": 9,
        })
    );
}

#[test]
fn font_without_name() {
    let mut source = SyntheticFont::new(1000, vec![0, 500]).with_cmap(0, 3, &[(0x41, 1)]);
    source.name = None;
    assert!(matches!(CidFont::new(source, 0), Err(Error::MissingFontName)));
}
