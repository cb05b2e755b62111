//! Integration tests for pdf-core
//!
//! These tests verify template handling end to end with real lopdf documents.

use lopdf::dictionary;
use pdf_core::{Align, PageSize, PdfDocument, PdfError};
use pretty_assertions::assert_eq;

/// Create a minimal valid PDF for testing
///
/// `page_media_box` goes on the page itself; `parent_media_box` on the
/// Pages node, to exercise inheritance.
fn create_test_pdf(
    page_count: usize,
    page_media_box: Option<[f64; 4]>,
    parent_media_box: Option<[f64; 4]>,
) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for _ in 0..page_count {
        let contents_id = doc.add_object(lopdf::Stream::new(dictionary! {}, vec![]));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => dictionary! {},
            "Contents" => contents_id,
        };
        if let Some(media_box) = page_media_box {
            page.set(
                "MediaBox",
                media_box
                    .iter()
                    .map(|&v| lopdf::Object::from(v))
                    .collect::<Vec<_>>(),
            );
        }
        page_ids.push(doc.add_object(page));
    }

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Count" => page_count as i64,
        "Kids" => page_ids.into_iter().map(lopdf::Object::from).collect::<Vec<_>>(),
    };
    if let Some(media_box) = parent_media_box {
        pages.set(
            "MediaBox",
            media_box
                .iter()
                .map(|&v| lopdf::Object::from(v))
                .collect::<Vec<_>>(),
        );
    }
    doc.objects.insert(pages_id, lopdf::Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

const A4_BOX: [f64; 4] = [0.0, 0.0, 595.0, 842.0];

#[test]
fn test_open_save_roundtrip() {
    let pdf_data = create_test_pdf(1, Some(A4_BOX), None);

    let doc = PdfDocument::open_from_bytes(&pdf_data).expect("Failed to open PDF");
    assert_eq!(doc.page_count(), 1);

    let saved_data = doc.to_bytes().expect("Failed to save PDF");

    let doc2 = PdfDocument::open_from_bytes(&saved_data).expect("Failed to re-open PDF");
    assert_eq!(doc2.page_count(), 1);
}

#[test]
fn test_open_invalid_bytes() {
    let result = PdfDocument::open_from_bytes(b"definitely not a pdf");
    assert!(matches!(result, Err(PdfError::OpenError(_))));
}

#[test]
fn test_open_missing_file() {
    let result = PdfDocument::open("does/not/exist.pdf");
    assert!(matches!(result, Err(PdfError::OpenError(_))));
}

#[test]
fn test_save_to_file() {
    let dir = std::env::temp_dir().join(format!("pdf-core-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("roundtrip.pdf");

    let doc = PdfDocument::open_from_bytes(&create_test_pdf(2, Some(A4_BOX), None)).unwrap();
    doc.save(&path).expect("Failed to save PDF");

    let reopened = PdfDocument::open(&path).unwrap();
    assert_eq!(reopened.page_count(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_page_size_direct() {
    let doc = PdfDocument::open_from_bytes(&create_test_pdf(1, Some(A4_BOX), None)).unwrap();
    assert_eq!(
        doc.page_size(1).unwrap(),
        PageSize {
            width: 595.0,
            height: 842.0
        }
    );
}

#[test]
fn test_page_size_inherited_from_parent() {
    let doc = PdfDocument::open_from_bytes(&create_test_pdf(
        1,
        None,
        Some([0.0, 0.0, 612.0, 792.0]),
    ))
    .unwrap();
    assert_eq!(
        doc.page_size(1).unwrap(),
        PageSize {
            width: 612.0,
            height: 792.0
        }
    );
}

#[test]
fn test_page_size_offset_media_box() {
    let doc = PdfDocument::open_from_bytes(&create_test_pdf(
        1,
        Some([10.0, 20.0, 310.0, 420.0]),
        None,
    ))
    .unwrap();
    assert_eq!(
        doc.page_size(1).unwrap(),
        PageSize {
            width: 300.0,
            height: 400.0
        }
    );
}

#[test]
fn test_page_size_defaults_to_a4() {
    let doc = PdfDocument::open_from_bytes(&create_test_pdf(1, None, None)).unwrap();
    assert_eq!(doc.page_size(1).unwrap(), PageSize::A4);
}

#[test]
fn test_invalid_page_number() {
    let doc = PdfDocument::open_from_bytes(&create_test_pdf(2, Some(A4_BOX), None)).unwrap();

    assert!(matches!(doc.page_size(0), Err(PdfError::InvalidPage(0, 2))));
    assert!(matches!(doc.page_size(3), Err(PdfError::InvalidPage(3, 2))));
}

#[test]
fn test_insert_text_invalid_page() {
    let mut doc = PdfDocument::open_from_bytes(&create_test_pdf(1, Some(A4_BOX), None)).unwrap();

    let result = doc.insert_text("Hello", 5, 100.0, 700.0, Align::Left);
    assert!(matches!(result, Err(PdfError::InvalidPage(5, 1))));
}

#[test]
fn test_font_not_found() {
    let mut doc = PdfDocument::open_from_bytes(&create_test_pdf(1, Some(A4_BOX), None)).unwrap();

    let result = doc.set_font("nonexistent", 12.0);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    assert!(doc.font("nonexistent").is_err());
}

#[test]
fn test_no_font_set() {
    let mut doc = PdfDocument::open_from_bytes(&create_test_pdf(1, Some(A4_BOX), None)).unwrap();

    let result = doc.insert_text("Hello", 1, 100.0, 700.0, Align::Left);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    assert!(doc.get_text_width("Hello").is_err());
}

#[test]
fn test_invalid_font_data() {
    let mut doc = PdfDocument::open_from_bytes(&create_test_pdf(1, Some(A4_BOX), None)).unwrap();

    let result = doc.add_font("broken", b"not a font");
    assert!(matches!(result, Err(PdfError::FontParseError(_))));
    assert!(!doc.has_font("broken"));
}
