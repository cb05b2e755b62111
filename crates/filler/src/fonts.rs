//! Font weight table and per-document font loading

use crate::{FillError, Result};
use pdf_core::{FontWeight, PdfDocument, PdfError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deployment font table: one TrueType file per weight class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    paths: BTreeMap<FontWeight, PathBuf>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static Noto Sans cuts, `NotoSans-Thin.ttf` through `NotoSans-ExtraBold.ttf`
    pub fn noto_sans(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        FontWeight::ALL
            .into_iter()
            .fold(Self::new(), |table, weight| {
                table.with(
                    weight,
                    dir.join(format!("NotoSans-{}.ttf", weight.style_name())),
                )
            })
    }

    /// Builder-style insert
    pub fn with(mut self, weight: FontWeight, path: impl Into<PathBuf>) -> Self {
        self.insert(weight, path);
        self
    }

    /// Set the file for `weight`, returning the path it replaces
    pub fn insert(&mut self, weight: FontWeight, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.paths.insert(weight, path.into())
    }

    pub fn get(&self, weight: FontWeight) -> Option<&Path> {
        self.paths.get(&weight).map(PathBuf::as_path)
    }

    /// Entries, lightest weight first
    pub fn iter(&self) -> impl Iterator<Item = (FontWeight, &Path)> {
        self.paths.iter().map(|(w, p)| (*w, p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// A font registered in a document, addressable by weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontHandle {
    weight: FontWeight,
    name: String,
}

impl FontHandle {
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Name the font is registered under in the document
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Loads a [`FontTable`] into one document and hands out handles by weight
///
/// Handles are only meaningful for the document passed to [`FontProvider::load`].
#[derive(Debug)]
pub struct FontProvider {
    table: FontTable,
    loaded: BTreeMap<FontWeight, FontHandle>,
}

impl FontProvider {
    pub fn new(table: FontTable) -> Self {
        Self {
            table,
            loaded: BTreeMap::new(),
        }
    }

    /// Read every configured font file and register it in `doc`
    ///
    /// Stops at the first file that cannot be read or parsed.
    pub fn load(&mut self, doc: &mut PdfDocument) -> Result<()> {
        for (weight, path) in self.table.iter() {
            let font_error = |reason: String| FillError::FontLoad {
                weight,
                path: path.to_path_buf(),
                reason,
            };

            let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
            let name = font_resource_name(weight, path);

            doc.add_font(&name, &data).map_err(|e| match e {
                PdfError::FontParseError(reason) => font_error(reason),
                other => FillError::Pdf(other),
            })?;

            debug!(weight = weight.class(), path = %path.display(), bytes = data.len(), "loaded font");
            self.loaded.insert(weight, FontHandle { weight, name });
        }

        Ok(())
    }

    /// Handle for a loaded weight
    pub fn get_font(&self, weight: FontWeight) -> Result<&FontHandle> {
        self.loaded
            .get(&weight)
            .ok_or(FillError::UnknownWeight(weight))
    }

    /// Weights loaded so far, lightest first
    pub fn loaded_weights(&self) -> impl Iterator<Item = FontWeight> + '_ {
        self.loaded.keys().copied()
    }
}

/// PDF font name: file stem plus weight, so the same file may back two weights
fn font_resource_name(weight: FontWeight, path: &Path) -> String {
    let stem: String = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Font".to_string())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    format!("{stem}-{}", weight.class())
}
