//! Font handling for PDF documents

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::HashSet;
use ttf_parser::GlyphId;
use std::fmt;

/// Font weight class, as used in the OS/2 `usWeightClass` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    #[default]
    Regular = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
}

impl FontWeight {
    /// Every supported weight class, lightest first
    pub const ALL: [FontWeight; 8] = [
        FontWeight::Thin,
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
    ];

    /// Numeric weight class (100 - 800)
    pub fn class(self) -> u16 {
        self as u16
    }

    /// Look up a weight by its numeric class
    pub fn from_class(class: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.class() == class)
    }

    /// Conventional style name, e.g. "SemiBold"
    pub fn style_name(self) -> &'static str {
        match self {
            FontWeight::Thin => "Thin",
            FontWeight::ExtraLight => "ExtraLight",
            FontWeight::Light => "Light",
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::SemiBold => "SemiBold",
            FontWeight::Bold => "Bold",
            FontWeight::ExtraBold => "ExtraBold",
        }
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = PdfError;

    fn try_from(class: u16) -> Result<Self> {
        Self::from_class(class).ok_or(PdfError::InvalidWeight(class))
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

/// Font data structure for embedded fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data
    pub ttf_data: Vec<u8>,
    /// Characters drawn with this font
    pub used_chars: HashSet<char>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        let face = ttf_parser::Face::parse(ttf_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e}")))?;

        Ok(Self {
            name: name.to_string(),
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            ttf_data: ttf_data.to_vec(),
            used_chars: HashSet::new(),
        })
    }

    // Parsed on demand; the face borrows `ttf_data`.
    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.ttf_data, 0).ok()
    }

    /// Add characters to the used set
    pub fn add_chars(&mut self, text: &str) {
        self.used_chars.extend(text.chars());
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get glyph advance width
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        let face = self.face()?;
        let glyph_id = face.glyph_index(c)?;
        face.glyph_hor_advance(glyph_id)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Calculate text width in font units
    ///
    /// Characters without a glyph are measured as `.notdef`, the glyph they
    /// are drawn with.
    pub fn text_width(&self, text: &str) -> u32 {
        let Some(face) = self.face() else {
            return 0;
        };

        text.chars()
            .map(|c| face.glyph_index(c).unwrap_or(GlyphId(0)))
            .filter_map(|id| face.glyph_hor_advance(id))
            .map(u32::from)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![("Type", "CMap".into())]),
            tounicode_content.into_bytes(),
        );

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (self.ttf_data.len() as i64).into())]),
            self.ttf_data.clone(),
        );

        let units_per_em = self.units_per_em() as i64;
        let ascender = self.ascender() as i64;
        let descender = self.descender() as i64;

        // Simplified bounding box from the vertical metrics
        let font_bbox: Vec<Object> = vec![
            0.into(),
            descender.into(),
            units_per_em.into(),
            ascender.into(),
        ];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.into()),
            ("Descent", descender.into()),
            ("CapHeight", ascender.into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))), // set when embedding
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))), // set when embedding
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()), // set when embedding
            ("ToUnicode", Object::Reference((0, 0))), // set when embedding
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Encode text as hex string of glyph IDs for the PDF Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let face = self.face();
        let mut result = String::with_capacity(text.len() * 4 + 2);
        result.push('<');
        for c in text.chars() {
            let gid = face
                .as_ref()
                .and_then(|face| face.glyph_index(c))
                .map(|id| id.0)
                .unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        result.push('>');
        result
    }

    /// Generate /W array for glyph widths: `[gid1 [w1] gid2 [w2] ...]`
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let Some(face) = self.face() else {
            return widths;
        };

        let mut gids: Vec<u16> = self
            .used_chars
            .iter()
            .map(|&c| face.glyph_index(c).map(|id| id.0).unwrap_or(0))
            .collect();
        gids.sort_unstable();
        gids.dedup();

        for gid in gids {
            let advance = face
                .glyph_hor_advance(GlyphId(gid))
                .unwrap_or(1000);
            // /W widths are in 1/1000 em
            let width = (advance as i64 * 1000) / self.units_per_em().max(1) as i64;
            widths.push((gid as i64).into());
            widths.push(vec![Object::Integer(width)].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mut char_list: Vec<char> = self.used_chars.iter().copied().collect();
        char_list.sort_unstable();

        let face = self.face();
        // At most 100 entries per bfchar section
        for chunk in char_list.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &c in chunk {
                let gid = face
                    .as_ref()
                    .and_then(|face| face.glyph_index(c))
                    .map(|id| id.0)
                    .unwrap_or(0);
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}
