//! PDF Core - Low-level PDF manipulation
//!
//! This crate provides functionality for:
//! - Opening a PDF template and reading its page geometry
//! - Embedding TrueType fonts keyed by name
//! - Measuring and inserting text at PDF coordinates
//! - Serializing the filled document back to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PdfDocument};
//!
//! let mut doc = PdfDocument::open_from_bytes(&template_bytes)?;
//! doc.add_font("noto-800", &std::fs::read("NotoSans-ExtraBold.ttf")?)?;
//! doc.set_font("noto-800", 24.0)?;
//! let size = doc.page_size(1)?;
//! doc.insert_text("LAB MANUAL", 1, size.width / 2.0, size.height - 380.0, Align::Center)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod text;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{FontData, FontWeight};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid font weight class: {0}")]
    InvalidWeight(u16),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Horizontal anchoring of inserted text relative to its x coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
