//! Text rendering utilities

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the text object (BT, rg, Tf, Td, Tj, ET) that draws `text_hex`
/// with its baseline starting at the aligned position.
///
/// # Arguments
/// * `text_hex` - Hex-encoded glyph IDs (e.g., "<0041004200>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - How the text is anchored at `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        format_number(ctx.color.r as f64),
        format_number(ctx.color.g as f64),
        format_number(ctx.color.b as f64)
    ));
    ops.push_str(&format!(
        "/{} {} Tf\n",
        ctx.font_name,
        format_number(ctx.font_size as f64)
    ));
    ops.push_str(&format!(
        "{} {} Td\n",
        format_number(x + x_offset),
        format_number(y)
    ));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Format a number for a content stream: at most 4 decimals, no trailing zeros
pub(crate) fn format_number(value: f64) -> String {
    let mut s = format!("{value:.4}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(font_name: &str, font_size: f32, text_width: f64) -> TextRenderContext {
        TextRenderContext {
            font_name: font_name.to_string(),
            font_size,
            text_width,
            color: Color::black(),
        }
    }

    fn render(text_hex: &str, x: f64, y: f64, align: Align, ctx: &TextRenderContext) -> String {
        String::from_utf8(generate_text_operators(text_hex, x, y, align, ctx)).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(461.89), "461.89");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(-12.5), "-12.5");
    }

    #[test]
    fn test_generate_text_operators_left() {
        let ops = render(
            "<00480065006C006C006F>",
            100.0,
            700.0,
            Align::Left,
            &ctx("F1", 12.0, 100.0),
        );

        assert_eq!(
            ops,
            "BT\n0 0 0 rg\n/F1 12 Tf\n100 700 Td\n<00480065006C006C006F> Tj\nET\n"
        );
    }

    #[test]
    fn test_generate_text_operators_center() {
        let ops = render("<0054>", 297.64, 461.89, Align::Center, &ctx("F2", 24.0, 100.0));

        assert!(ops.contains("/F2 24 Tf"));
        assert!(ops.contains("247.64 461.89 Td")); // 297.64 - 50
    }

    #[test]
    fn test_generate_text_operators_right() {
        let ops = render("<0052>", 300.0, 500.0, Align::Right, &ctx("F3", 16.0, 80.0));

        assert!(ops.contains("220 500 Td")); // 300 - 80
    }

    #[test]
    fn test_generate_text_operators_zero_width_center() {
        let ops = render("<0041>", 100.0, 700.0, Align::Center, &ctx("F1", 14.0, 0.0));

        assert!(ops.contains("100 700 Td"));
    }

    #[test]
    fn test_generate_text_operators_fractional_size() {
        let ops = render("<0041>", 10.0, 10.0, Align::Left, &ctx("F1", 10.5, 1.0));

        assert!(ops.contains("/F1 10.5 Tf"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let ctx = TextRenderContext {
            color: Color::from_rgb(255, 0, 0),
            ..ctx("F1", 12.0, 100.0)
        };

        let ops = render("<0041>", 100.0, 700.0, Align::Left, &ctx);

        assert!(ops.contains("1 0 0 rg"));
    }
}
