//! Filler - lab manual cover layout on a fixed PDF template
//!
//! This crate provides:
//! - Request types (metadata plus an ordered list of label/value fields)
//! - A font provider that loads one TrueType file per weight class
//! - The cover layout: centered title and subtitle over an aligned
//!   `label    : value` table
//! - Filling the first page of a template with that layout
//!
//! # Example
//!
//! ```ignore
//! use filler::{DocumentFiller, Field, FontTable, Metadata, Template};
//!
//! let filler = DocumentFiller::new(
//!     Template::from_path("templates/base-adgips.pdf")?,
//!     FontTable::noto_sans("public/fonts/static"),
//! );
//! let meta = Metadata::new("LAB MANUAL", "B. Tech - 7th Semester");
//! let fields = vec![Field::new("Faculty Name", "Mr. Neeraj"), Field::new("Section", "T7")];
//! let pdf_bytes = filler.fill(&meta, &fields)?;
//! ```

mod fill;
mod fonts;
pub mod layout;
pub mod request;

pub use fill::{fill_document, DocumentFiller, Template};
pub use fonts::{FontHandle, FontProvider, FontTable};
pub use layout::{CoverLayout, LayoutConfig, TextMeasure};
pub use pdf_core::{FontWeight, PageSize};
pub use request::{parse_request, Field, Fields, FillRequest, Metadata};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while filling a template
#[derive(Debug, Error)]
pub enum FillError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to load template: {0}")]
    TemplateLoad(String),

    #[error("Failed to load font for weight {weight} from {}: {reason}", .path.display())]
    FontLoad {
        weight: FontWeight,
        path: PathBuf,
        reason: String,
    },

    #[error("No font loaded for weight {0}")]
    UnknownWeight(FontWeight),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for fill operations
pub type Result<T> = std::result::Result<T, FillError>;
