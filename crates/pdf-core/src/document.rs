//! PDF Document wrapper

use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, FontData, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

/// PDF Document wrapper providing high-level operations
///
/// Text is drawn in PDF user space: `x` from the left edge, `y` is the
/// baseline measured from the bottom edge. Drawing is buffered per page and
/// only written into the document by [`PdfDocument::to_bytes`] or
/// [`PdfDocument::save`].
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Registered fonts (font name -> data)
    fonts: BTreeMap<String, FontData>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Page font resources (page number -> font name -> resource name)
    page_font_resources: BTreeMap<usize, BTreeMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: BTreeMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Open a PDF document from a file path
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::open("templates/base-adgips.pdf")?;
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = Document::load(path).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    /// Open a PDF document from bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;
        Ok(Self::from_document(inner))
    }

    fn from_document(inner: Document) -> Self {
        Self {
            inner,
            fonts: BTreeMap::new(),
            current_font: None,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            page_font_resources: BTreeMap::new(),
            next_font_resource: 1,
            page_content_buffer: BTreeMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Add a TrueType font to the document
    ///
    /// The font is parsed immediately but only written into the PDF if some
    /// text is drawn with it.
    ///
    /// # Arguments
    /// * `name` - Font identifier (used in set_font)
    /// * `ttf_data` - TrueType font file bytes
    pub fn add_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        if self.fonts.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let font_data = FontData::from_ttf(name, ttf_data)?;
        self.fonts.insert(name.to_string(), font_data);

        Ok(())
    }

    /// Get a registered font by name
    pub fn font(&self, name: &str) -> Result<&FontData> {
        self.fonts
            .get(name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    /// Check whether a font has been registered
    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Set the current font and size
    ///
    /// # Example
    /// ```ignore
    /// doc.add_font("noto-500", &regular)?;
    /// doc.set_font("noto-500", 14.0)?;
    /// ```
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if !self.fonts.contains_key(name) {
            return Err(PdfError::FontNotFound(name.to_string()));
        }

        self.current_font = Some(name.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    fn current_font_name(&self) -> Result<String> {
        self.current_font
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let font_name = self.current_font_name()?;
        let font_data = self.font(&font_name)?;

        Ok(font_data.text_width_points(text, self.current_font_size) as f64)
    }

    /// Insert text with the current font, size and color
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points, from the left edge
    /// * `y` - Baseline Y coordinate in points, from the bottom edge
    /// * `align` - How the text is anchored at `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let font_name = self.current_font_name()?;

        // Nothing to draw
        if text.is_empty() {
            return Ok(());
        }

        let font_size = self.current_font_size;
        let (text_hex, text_width) = {
            let font_data = self
                .fonts
                .get_mut(&font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
            font_data.add_chars(text);
            (
                font_data.encode_text_hex(text),
                font_data.text_width_points(text, font_size) as f64,
            )
        };

        let font_resource_name = self.get_or_create_font_ref(&font_name, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size,
            text_width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&text_hex, x, y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Get page dimensions in points
    ///
    /// Reads the MediaBox (or CropBox), following inheritance from parent
    /// Pages nodes. Falls back to A4 when neither is present.
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        let page_id = self.page_id(page)?;

        let Some(media_box) = self.inherited_attribute(page_id, &[b"MediaBox", b"CropBox"])?
        else {
            return Ok(PageSize::A4);
        };

        let media_box = match media_box {
            Object::Reference(id) => self.inner.get_object(id)?.clone(),
            other => other,
        };
        let coords = media_box
            .as_array()
            .map_err(|_| PdfError::ParseError("MediaBox is not an array".to_string()))?;
        if coords.len() < 4 {
            return Err(PdfError::ParseError("Invalid MediaBox format".to_string()));
        }

        let mut values = [0.0f64; 4];
        for (value, obj) in values.iter_mut().zip(coords) {
            *value = number(obj)
                .ok_or_else(|| PdfError::ParseError("Invalid MediaBox value".to_string()))?;
        }
        let [x1, y1, x2, y2] = values;

        Ok(PageSize {
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        })
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Write all buffered drawing into the document and serialize it
    pub fn to_bytes(mut self) -> Result<Vec<u8>> {
        let embedded = self.embed_fonts()?;
        self.finalize_page_font_resources(&embedded)?;
        self.flush_content_buffers()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Look up the first of `keys` on a page, following the Parent chain
    fn inherited_attribute(&self, page_id: ObjectId, keys: &[&[u8]]) -> Result<Option<Object>> {
        let mut current_id = page_id;

        // Bounded walk guards against Parent cycles
        for _ in 0..32 {
            let dict = self
                .inner
                .get_object(current_id)?
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Some(value) = keys.iter().find_map(|key| dict.get(key).ok()) {
                return Ok(Some(value.clone()));
            }

            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => current_id = *parent_id,
                _ => break,
            }
        }

        Ok(None)
    }

    /// Resolve an object to an owned dictionary, following one reference
    fn resolve_dict(&self, obj: &Object) -> Result<Dictionary> {
        let obj = match obj {
            Object::Reference(id) => self.inner.get_object(*id)?,
            other => other,
        };
        obj.as_dict()
            .cloned()
            .map_err(|_| PdfError::ParseError("Expected a dictionary".to_string()))
    }

    /// Get or create a font resource name for a page
    ///
    /// Names are unique across the document and never collide with fonts the
    /// template already declares on that page.
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> String {
        if let Some(name) = self
            .page_font_resources
            .get(&page)
            .and_then(|fonts| fonts.get(font_name))
        {
            return name.clone();
        }

        let existing = self.existing_font_resource_names(page);
        let resource_name = loop {
            let candidate = format!("F{}", self.next_font_resource);
            self.next_font_resource += 1;
            if !existing.iter().any(|name| name == candidate.as_bytes()) {
                break candidate;
            }
        };

        self.page_font_resources
            .entry(page)
            .or_default()
            .insert(font_name.to_string(), resource_name.clone());

        resource_name
    }

    fn existing_font_resource_names(&self, page: usize) -> Vec<Vec<u8>> {
        let font_dict = self
            .page_id(page)
            .and_then(|page_id| self.inherited_attribute(page_id, &[b"Resources"]))
            .ok()
            .flatten()
            .and_then(|resources| self.resolve_dict(&resources).ok())
            .and_then(|resources| {
                resources
                    .get(b"Font")
                    .ok()
                    .and_then(|font| self.resolve_dict(font).ok())
            });

        font_dict
            .map(|dict| dict.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Embed every font that was drawn with; returns font name -> Type0 object
    fn embed_fonts(&mut self) -> Result<HashMap<String, ObjectId>> {
        let mut embedded = HashMap::new();

        let used: Vec<String> = self
            .fonts
            .iter()
            .filter(|(_, font)| !font.used_chars.is_empty())
            .map(|(name, _)| name.clone())
            .collect();

        for font_name in used {
            let id = self.embed_font_object(&font_name)?;
            embedded.insert(font_name, id);
        }

        Ok(embedded)
    }

    /// Embed a single font object into the PDF
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font_objects = self.font(font_name)?.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(type0_font))
    }

    /// Add font references to the Resources of every page that uses them
    fn finalize_page_font_resources(&mut self, embedded: &HashMap<String, ObjectId>) -> Result<()> {
        let page_resources = std::mem::take(&mut self.page_font_resources);

        for (page, fonts) in page_resources {
            if fonts.is_empty() {
                continue;
            }

            let page_id = self.page_id(page)?;
            let mut resources = match self.inherited_attribute(page_id, &[b"Resources"])? {
                Some(resources) => self.resolve_dict(&resources)?,
                None => Dictionary::new(),
            };
            let mut font_dict = match resources.get(b"Font") {
                Ok(font) => self.resolve_dict(font)?,
                Err(_) => Dictionary::new(),
            };

            for (font_name, resource_name) in &fonts {
                let font_ref = embedded
                    .get(font_name)
                    .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
            }
            resources.set("Font", Object::Dictionary(font_dict));

            // Pages may share an inherited Resources dictionary, so the
            // merged copy is attached to this page only.
            let mut page_dict = self.resolve_dict(&Object::Reference(page_id))?;
            page_dict.set("Resources", Object::Dictionary(resources));
            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }

    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Append buffered operators to each page's content
    ///
    /// The existing streams are left untouched and bracketed by `q`/`Q`, so
    /// graphics state left over by the template cannot shift the new text.
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers = std::mem::take(&mut self.page_content_buffer);

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }

            let page_id = self.page_id(page)?;
            let existing = self.inner.get_page_contents(page_id);

            let mut contents = Vec::with_capacity(existing.len() + 2);
            if !existing.is_empty() {
                let open_id = self
                    .inner
                    .add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
                contents.push(Object::Reference(open_id));
                contents.extend(existing.into_iter().map(Object::Reference));
            }

            let mut appended = Vec::with_capacity(content.len() + 3);
            if !contents.is_empty() {
                appended.extend_from_slice(b"\nQ\n");
            }
            appended.extend_from_slice(&content);
            let appended_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), appended));
            contents.push(Object::Reference(appended_id));

            let mut page_dict = self.resolve_dict(&Object::Reference(page_id))?;
            page_dict.set("Contents", Object::Array(contents));
            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
