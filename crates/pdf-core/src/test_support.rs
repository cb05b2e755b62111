//! In-memory fixtures for tests
//!
//! [`minimal_ttf`] assembles a tiny but well-formed TrueType font covering
//! printable ASCII, so measurement and embedding can be exercised without
//! shipping binary font files.

/// Units per em of the synthetic font
pub const UNITS_PER_EM: u16 = 1000;

/// Advance width of the space glyph
pub const ADVANCE_SPACE: u16 = 250;

/// Advance width of `.notdef`, drawn for every unmapped character
pub const NOTDEF_ADVANCE: u16 = 500;

const FIRST_CODE: u16 = 0x20;
const GLYPH_COUNT: u16 = 95; // 0x20..=0x7E

/// Advance width the synthetic font assigns to `c`, in font units
///
/// Unmapped characters report the `.notdef` advance.
pub fn advance_for(c: char) -> u16 {
    match c {
        ' ' => ADVANCE_SPACE,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 280,
        'm' | 'w' | 'M' | 'W' => 900,
        'A'..='Z' => 680,
        '\u{21}'..='\u{7E}' => 540,
        _ => NOTDEF_ADVANCE,
    }
}

/// Width of `text` at `size` points, as the synthetic font measures it
pub fn width_points(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance_for(c))).sum();
    units as f32 / UNITS_PER_EM as f32 * size
}

/// Build a minimal TrueType font with `cmap`, `head`, `hhea`, `hmtx` and `maxp`
pub fn minimal_ttf() -> Vec<u8> {
    let num_glyphs = GLYPH_COUNT + 1;

    let mut cmap = Vec::new();
    put_u16(&mut cmap, 0); // version
    put_u16(&mut cmap, 1); // numTables
    put_u16(&mut cmap, 0); // platform: Unicode
    put_u16(&mut cmap, 3); // encoding: Unicode BMP
    put_u32(&mut cmap, 12); // subtable offset
    put_u16(&mut cmap, 6); // format 6: trimmed table
    put_u16(&mut cmap, 10 + 2 * GLYPH_COUNT);
    put_u16(&mut cmap, 0); // language
    put_u16(&mut cmap, FIRST_CODE);
    put_u16(&mut cmap, GLYPH_COUNT);
    for gid in 1..=GLYPH_COUNT {
        put_u16(&mut cmap, gid);
    }

    let mut head = Vec::new();
    put_u32(&mut head, 0x0001_0000); // version
    put_u32(&mut head, 0x0001_0000); // fontRevision
    put_u32(&mut head, 0); // checkSumAdjustment
    put_u32(&mut head, 0x5F0F_3CF5); // magicNumber
    put_u16(&mut head, 0); // flags
    put_u16(&mut head, UNITS_PER_EM);
    head.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -200, 1000, 800] {
        put_i16(&mut head, v); // xMin, yMin, xMax, yMax
    }
    put_u16(&mut head, 0); // macStyle
    put_u16(&mut head, 8); // lowestRecPPEM
    put_i16(&mut head, 2); // fontDirectionHint
    put_i16(&mut head, 0); // indexToLocFormat
    put_i16(&mut head, 0); // glyphDataFormat

    let mut hhea = Vec::new();
    put_u32(&mut hhea, 0x0001_0000);
    put_i16(&mut hhea, 800); // ascender
    put_i16(&mut hhea, -200); // descender
    put_i16(&mut hhea, 0); // lineGap
    put_u16(&mut hhea, 900); // advanceWidthMax
    put_i16(&mut hhea, 0); // minLeftSideBearing
    put_i16(&mut hhea, 0); // minRightSideBearing
    put_i16(&mut hhea, 900); // xMaxExtent
    put_i16(&mut hhea, 1); // caretSlopeRise
    put_i16(&mut hhea, 0); // caretSlopeRun
    put_i16(&mut hhea, 0); // caretOffset
    hhea.extend_from_slice(&[0; 8]); // reserved
    put_i16(&mut hhea, 0); // metricDataFormat
    put_u16(&mut hhea, num_glyphs);

    let mut hmtx = Vec::new();
    put_u16(&mut hmtx, NOTDEF_ADVANCE);
    put_i16(&mut hmtx, 0);
    for code in FIRST_CODE..FIRST_CODE + GLYPH_COUNT {
        let c = char::from_u32(u32::from(code)).unwrap_or(' ');
        put_u16(&mut hmtx, advance_for(c));
        put_i16(&mut hmtx, 0);
    }

    let mut maxp = Vec::new();
    put_u32(&mut maxp, 0x0000_5000);
    put_u16(&mut maxp, num_glyphs);

    // Table records must be sorted by tag
    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap),
        (b"head", head),
        (b"hhea", hhea),
        (b"hmtx", hmtx),
        (b"maxp", maxp),
    ];

    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000); // sfntVersion
    put_u16(&mut font, tables.len() as u16);
    put_u16(&mut font, 64); // searchRange
    put_u16(&mut font, 2); // entrySelector
    put_u16(&mut font, 16); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        put_u32(&mut font, 0); // checksum, not verified by parsers
        put_u32(&mut font, offset as u32);
        put_u32(&mut font, data.len() as u32);

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    font.extend_from_slice(&body);
    font
}

fn put_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn put_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}
