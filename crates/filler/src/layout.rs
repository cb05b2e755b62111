//! Cover page geometry
//!
//! The cover is a centered title, a centered subtitle, and a table of
//! `label    : value` rows. The table is laid out as one block: the widest
//! label fixes where every separator starts, the widest value fixes the block
//! width, and the block as a whole is centered on the page.
//!
//! All coordinates are PDF user space (origin bottom-left, `y` is the text
//! baseline). Nothing is clipped: rows below the page bottom keep their
//! negative `y`.

use crate::request::{Field, Metadata};
use pdf_core::{FontData, FontWeight, PageSize};

/// Anything that can report the advance width of a string
pub trait TextMeasure {
    /// Width of `text` at `size` points, in points
    fn measure(&self, text: &str, size: f32) -> f64;
}

impl TextMeasure for FontData {
    fn measure(&self, text: &str, size: f32) -> f64 {
        self.text_width_points(text, size) as f64
    }
}

/// Sizes and spacing of the cover, in points
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Distance from the top edge to the title baseline
    pub top_margin: f64,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    /// Title baseline to subtitle baseline
    pub title_gap: f64,
    /// Subtitle baseline to first row baseline
    pub body_gap: f64,
    /// Row baseline to row baseline
    pub line_gap: f64,
    /// Space between the separator and the value column
    pub column_gap: f64,
    /// Drawn between label and value on every row
    pub separator: String,
    /// Weight for title and subtitle
    pub heading_weight: FontWeight,
    /// Weight for the table
    pub body_weight: FontWeight,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 380.0,
            title_size: 24.0,
            subtitle_size: 18.0,
            body_size: 14.0,
            title_gap: 32.0,
            body_gap: 40.0,
            line_gap: 22.0,
            column_gap: 8.0,
            separator: "    :".to_string(),
            heading_weight: FontWeight::ExtraBold,
            body_weight: FontWeight::Medium,
        }
    }
}

/// Which font a piece of text is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Heading,
    Body,
}

/// A string with its left baseline origin
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f32,
    pub role: TextRole,
}

/// Column geometry shared by every row
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Columns {
    pub max_key_width: f64,
    pub max_value_width: f64,
    pub colon_width: f64,
    pub block_width: f64,
    pub block_x: f64,
    pub key_x: f64,
    pub colon_x: f64,
    pub value_x: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub label: PlacedText,
    pub separator: PlacedText,
    pub value: PlacedText,
}

/// Fully positioned cover, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLayout {
    pub title: PlacedText,
    pub subtitle: PlacedText,
    pub columns: Columns,
    pub rows: Vec<Row>,
}

impl CoverLayout {
    /// Position every string of the cover on a page of size `page`
    ///
    /// `heading` measures title and subtitle, `body` measures the table.
    pub fn compute(
        config: &LayoutConfig,
        page: PageSize,
        meta: &Metadata,
        fields: &[Field],
        heading: &impl TextMeasure,
        body: &impl TextMeasure,
    ) -> Self {
        let mut current_y = page.height - config.top_margin;

        let centered = |text: &str, size: f32, y: f64| PlacedText {
            text: text.to_string(),
            x: (page.width - heading.measure(text, size)) / 2.0,
            y,
            size,
            role: TextRole::Heading,
        };

        let title = centered(&meta.title, config.title_size, current_y);
        current_y -= config.title_gap;
        let subtitle = centered(&meta.subtitle, config.subtitle_size, current_y);
        current_y -= config.body_gap;

        let columns = Columns::compute(config, page.width, fields, body);

        let body_text = |text: &str, x: f64, y: f64| PlacedText {
            text: text.to_string(),
            x,
            y,
            size: config.body_size,
            role: TextRole::Body,
        };

        let mut rows = Vec::with_capacity(fields.len());
        for field in fields {
            rows.push(Row {
                label: body_text(&field.label, columns.key_x, current_y),
                separator: body_text(&config.separator, columns.colon_x, current_y),
                value: body_text(&field.value, columns.value_x, current_y),
            });
            current_y -= config.line_gap;
        }

        Self {
            title,
            subtitle,
            columns,
            rows,
        }
    }

    /// Every string in draw order: title, subtitle, then row by row
    pub fn texts(&self) -> impl Iterator<Item = &PlacedText> {
        [&self.title, &self.subtitle].into_iter().chain(
            self.rows
                .iter()
                .flat_map(|row| [&row.label, &row.separator, &row.value]),
        )
    }
}

impl Columns {
    /// Measure all fields up front; with no fields both maxima are zero
    fn compute(
        config: &LayoutConfig,
        page_width: f64,
        fields: &[Field],
        body: &impl TextMeasure,
    ) -> Self {
        let size = config.body_size;
        let max_key_width = widest(body, size, fields.iter().map(|f| f.label.as_str()));
        let max_value_width = widest(body, size, fields.iter().map(|f| f.value.as_str()));
        let colon_width = body.measure(&config.separator, size);

        let block_width = max_key_width + colon_width + config.column_gap + max_value_width;
        let block_x = (page_width - block_width) / 2.0;
        let key_x = block_x;
        let colon_x = key_x + max_key_width;
        let value_x = colon_x + colon_width + config.column_gap;

        Self {
            max_key_width,
            max_value_width,
            colon_width,
            block_width,
            block_x,
            key_x,
            colon_x,
            value_x,
        }
    }
}

fn widest<'a>(measure: &impl TextMeasure, size: f32, texts: impl Iterator<Item = &'a str>) -> f64 {
    texts.map(|t| measure.measure(t, size)).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every character is `advance` em wide
    struct Monospace(f64);

    impl TextMeasure for Monospace {
        fn measure(&self, text: &str, size: f32) -> f64 {
            text.chars().count() as f64 * self.0 * size as f64
        }
    }

    const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
    const EPS: f64 = 1e-9;

    fn lab_manual() -> Metadata {
        Metadata::new("LAB MANUAL", "B. Tech - 7th Semester")
    }

    fn lab_fields() -> Vec<Field> {
        vec![
            Field::new("Faculty Name", "Mr. Neeraj"),
            Field::new("Subject Name", "Statistics, Statistical Modelling and Data Analytics Lab"),
            Field::new("Paper Code", "DA-304P"),
            Field::new("Section", "T7"),
        ]
    }

    fn compute(fields: &[Field]) -> CoverLayout {
        CoverLayout::compute(
            &LayoutConfig::default(),
            A4,
            &lab_manual(),
            fields,
            &Monospace(0.6),
            &Monospace(0.5),
        )
    }

    #[test]
    fn test_headings_are_centered() {
        let layout = compute(&lab_fields());
        let heading = Monospace(0.6);

        let title_width = heading.measure("LAB MANUAL", 24.0);
        assert!((layout.title.x + title_width / 2.0 - A4.width / 2.0).abs() < EPS);
        let subtitle_width = heading.measure("B. Tech - 7th Semester", 18.0);
        assert!((layout.subtitle.x + subtitle_width / 2.0 - A4.width / 2.0).abs() < EPS);

        assert_eq!(layout.title.role, TextRole::Heading);
        assert_eq!(layout.title.size, 24.0);
        assert_eq!(layout.subtitle.size, 18.0);
    }

    #[test]
    fn test_vertical_stacking() {
        let layout = compute(&lab_fields());

        assert_eq!(layout.title.y, 842.0 - 380.0);
        assert_eq!(layout.subtitle.y, layout.title.y - 32.0);
        assert_eq!(layout.rows[0].label.y, layout.subtitle.y - 40.0);
        for pair in layout.rows.windows(2) {
            assert_eq!(pair[0].label.y - pair[1].label.y, 22.0);
        }
    }

    #[test]
    fn test_columns_align_across_rows() {
        let layout = compute(&lab_fields());
        let columns = layout.columns;

        for row in &layout.rows {
            assert_eq!(row.label.x, columns.key_x);
            assert_eq!(row.separator.x, columns.colon_x);
            assert_eq!(row.value.x, columns.value_x);
            assert_eq!(row.separator.text, "    :");
            assert_eq!(row.label.y, row.separator.y);
            assert_eq!(row.label.y, row.value.y);
        }
    }

    #[test]
    fn test_block_geometry() {
        let layout = compute(&lab_fields());
        let c = layout.columns;
        let body = Monospace(0.5);

        assert_eq!(c.max_key_width, body.measure("Faculty Name", 14.0));
        assert_eq!(
            c.max_value_width,
            body.measure("Statistics, Statistical Modelling and Data Analytics Lab", 14.0)
        );
        assert_eq!(c.colon_width, body.measure("    :", 14.0));
        assert_eq!(
            c.block_width,
            c.max_key_width + c.colon_width + 8.0 + c.max_value_width
        );
        assert!((c.block_x + c.block_width / 2.0 - A4.width / 2.0).abs() < EPS);
        assert!(c.block_x + c.block_width <= A4.width);
        assert_eq!(c.key_x, c.block_x);
        assert_eq!(c.colon_x, c.key_x + c.max_key_width);
        assert_eq!(c.value_x, c.colon_x + c.colon_width + 8.0);
    }

    #[test]
    fn test_two_row_scenario() {
        let fields = vec![
            Field::new("Faculty Name", "Mr. Neeraj"),
            Field::new("Section", "T7"),
        ];
        let layout = compute(&fields);

        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0].label.text, "Faculty Name");
        assert_eq!(layout.rows[1].label.text, "Section");
        assert_eq!(layout.rows[0].label.x, layout.rows[1].label.x);
        assert_eq!(layout.rows[0].value.x, layout.rows[1].value.x);
        assert!(layout.rows[0].value.x > layout.rows[0].separator.x);
        assert_eq!(layout.rows[0].label.y - layout.rows[1].label.y, 22.0);
    }

    #[test]
    fn test_empty_fields() {
        let layout = compute(&[]);

        assert!(layout.rows.is_empty());
        assert_eq!(layout.columns.max_key_width, 0.0);
        assert_eq!(layout.columns.max_value_width, 0.0);
        assert!(layout.columns.block_x.is_finite());
        assert_eq!(layout.texts().count(), 2);
    }

    #[test]
    fn test_texts_draw_order() {
        let fields = vec![Field::new("Section", "T7")];
        let layout = compute(&fields);

        let texts: Vec<&str> = layout.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["LAB MANUAL", "B. Tech - 7th Semester", "Section", "    :", "T7"]
        );
        assert!(layout.texts().skip(2).all(|t| t.role == TextRole::Body));
    }

    #[test]
    fn test_duplicate_labels_keep_both_rows() {
        let fields = vec![Field::new("Name", "A"), Field::new("Name", "B")];
        let layout = compute(&fields);

        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[1].value.text, "B");
    }

    #[test]
    fn test_overflow_rows_run_off_page() {
        let fields: Vec<Field> = (0..40)
            .map(|i| Field::new(format!("Row {i}"), "x"))
            .collect();
        let layout = compute(&fields);

        let last = layout.rows.last().unwrap();
        assert!(last.label.y < 0.0);
    }

    #[test]
    fn test_custom_config() {
        let config = LayoutConfig {
            top_margin: 100.0,
            line_gap: 30.0,
            separator: ":".to_string(),
            ..LayoutConfig::default()
        };
        let fields = vec![Field::new("A", "1"), Field::new("B", "2")];
        let layout = CoverLayout::compute(
            &config,
            A4,
            &lab_manual(),
            &fields,
            &Monospace(0.6),
            &Monospace(0.5),
        );

        assert_eq!(layout.title.y, 742.0);
        assert_eq!(layout.rows[0].label.y - layout.rows[1].label.y, 30.0);
        assert_eq!(layout.columns.colon_width, 7.0);
    }
}
