//! Template filling

use crate::fonts::{FontProvider, FontTable};
use crate::layout::{CoverLayout, LayoutConfig, TextRole};
use crate::request::{Field, Metadata};
use crate::{FillError, Result};
use pdf_core::{Align, Color, PageSize, PdfDocument};
use std::path::Path;
use tracing::debug;

/// Page the cover is drawn on
const COVER_PAGE: usize = 1;

/// A pre-existing PDF that is filled, never modified in place
#[derive(Debug, Clone)]
pub struct Template {
    bytes: Vec<u8>,
}

impl Template {
    /// Read template bytes from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FillError::TemplateLoad(format!("{}: {e}", path.display())))?;
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Parse a fresh working copy of the template
    pub fn open(&self) -> Result<PdfDocument> {
        let doc = PdfDocument::open_from_bytes(&self.bytes)
            .map_err(|e| FillError::TemplateLoad(e.to_string()))?;
        if doc.page_count() == 0 {
            return Err(FillError::TemplateLoad("template has no pages".to_string()));
        }
        Ok(doc)
    }

    /// Parse once to check the template is usable, returning its cover page size
    pub fn page_size(&self) -> Result<PageSize> {
        Ok(self.open()?.page_size(COVER_PAGE)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Fills one template with one font table, any number of times
///
/// Every call to [`DocumentFiller::fill`] parses the template and loads the
/// fonts afresh, so fills share no state.
#[derive(Debug, Clone)]
pub struct DocumentFiller {
    template: Template,
    fonts: FontTable,
    layout: LayoutConfig,
}

impl DocumentFiller {
    pub fn new(template: Template, fonts: FontTable) -> Self {
        Self {
            template,
            fonts,
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn fonts(&self) -> &FontTable {
        &self.fonts
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Produce a filled PDF
    pub fn fill(&self, meta: &Metadata, fields: &[Field]) -> Result<Vec<u8>> {
        debug!(title = %meta.title, fields = fields.len(), "filling template");

        let mut doc = self.template.open()?;
        let mut provider = FontProvider::new(self.fonts.clone());
        provider.load(&mut doc)?;

        let bytes = fill_document(doc, &provider, &self.layout, meta, fields)?;
        debug!(bytes = bytes.len(), "template filled");
        Ok(bytes)
    }
}

/// Draw the cover onto the first page of `doc` and serialize it
///
/// `provider` must have been loaded into `doc`. Both fonts are resolved before
/// anything is drawn, so a missing weight produces no output.
pub fn fill_document(
    mut doc: PdfDocument,
    provider: &FontProvider,
    config: &LayoutConfig,
    meta: &Metadata,
    fields: &[Field],
) -> Result<Vec<u8>> {
    let heading = provider.get_font(config.heading_weight)?.name().to_string();
    let body = provider.get_font(config.body_weight)?.name().to_string();

    let page = doc.page_size(COVER_PAGE)?;
    let layout = CoverLayout::compute(
        config,
        page,
        meta,
        fields,
        doc.font(&heading)?,
        doc.font(&body)?,
    );

    doc.set_text_color(Color::black());
    for text in layout.texts() {
        let font = match text.role {
            TextRole::Heading => &heading,
            TextRole::Body => &body,
        };
        doc.set_font(font, text.size)?;
        doc.insert_text(&text.text, COVER_PAGE, text.x, text.y, Align::Left)?;
    }

    Ok(doc.to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_rejects_garbage() {
        let template = Template::from_bytes(b"%PDF-not really".to_vec());
        assert!(matches!(template.open(), Err(FillError::TemplateLoad(_))));
        assert!(matches!(template.page_size(), Err(FillError::TemplateLoad(_))));
    }

    #[test]
    fn test_template_missing_file() {
        let result = Template::from_path("no/such/template.pdf");
        match result {
            Err(FillError::TemplateLoad(msg)) => assert!(msg.contains("template.pdf")),
            other => panic!("expected TemplateLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_filler_defaults() {
        let filler = DocumentFiller::new(Template::from_bytes(Vec::new()), FontTable::new());
        assert_eq!(filler.layout(), &LayoutConfig::default());
        assert!(filler.fonts().is_empty());
        assert!(filler.template().as_bytes().is_empty());
    }
}
