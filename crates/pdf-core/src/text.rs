//! Text rendering utilities

use crate::document::Color;
use crate::font::BuiltinFont;
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
/// `x` is the alignment anchor: the left edge, the centre or the right edge
/// of the run depending on `align`.
///
/// # Arguments
/// * `text_hex` - Hex-encoded text (e.g., "<414243>")
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment
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
    let final_x = x + x_offset;

    let mut ops = String::new();
    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Split text into lines that fit `max_width` points
///
/// Explicit newlines always break. Words longer than the line stay on a
/// line of their own rather than being split.
pub fn wrap_to_width(text: &str, font: BuiltinFont, font_size: f32, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
                continue;
            }

            let candidate = format!("{current_line} {word}");
            if font.text_width_points(&candidate, font_size) <= max_width {
                current_line = candidate;
            } else {
                lines.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        lines.push(current_line);
    }

    lines
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

    #[test]
    fn test_generate_text_operators_left() {
        let ops = generate_text_operators("<5061>", 100.0, 700.0, Align::Left, &ctx("F1", 12.0, 100.0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("BT\n"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("<5061> Tj"));
        assert!(ops_str.ends_with("ET\n"));
    }

    #[test]
    fn test_generate_text_operators_center_and_right() {
        let centered =
            generate_text_operators("<41>", 200.0, 600.0, Align::Center, &ctx("F2", 14.0, 100.0));
        assert!(String::from_utf8(centered).unwrap().contains("150 600 Td"));

        let right =
            generate_text_operators("<41>", 300.0, 500.0, Align::Right, &ctx("F2", 9.0, 80.0));
        assert!(String::from_utf8(right).unwrap().contains("220 500 Td"));
    }

    #[test]
    fn test_generate_text_operators_with_color() {
        let context = TextRenderContext {
            color: Color::white(),
            ..ctx("F1", 10.0, 0.0)
        };
        let ops = generate_text_operators("<41>", 0.0, 0.0, Align::Left, &context);
        assert!(String::from_utf8(ops).unwrap().contains("1 1 1 rg"));
    }

    #[test]
    fn test_wrap_explicit_newlines() {
        let lines = wrap_to_width("Line one\nLine two", BuiltinFont::Helvetica, 9.0, 1000.0);
        assert_eq!(lines, vec!["Line one", "Line two"]);
    }

    #[test]
    fn test_wrap_by_width() {
        // "aaaa" at 10pt is 22.24pt wide; two of them plus a space exceed 40pt
        let lines = wrap_to_width("aaaa aaaa aaaa", BuiltinFont::Helvetica, 10.0, 40.0);
        assert_eq!(lines, vec!["aaaa", "aaaa", "aaaa"]);

        let lines = wrap_to_width("aaaa aaaa", BuiltinFont::Helvetica, 10.0, 50.0);
        assert_eq!(lines, vec!["aaaa aaaa"]);
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        let lines = wrap_to_width("Supercalifragilistic", BuiltinFont::Helvetica, 10.0, 10.0);
        assert_eq!(lines, vec!["Supercalifragilistic"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(
            wrap_to_width("", BuiltinFont::Helvetica, 10.0, 10.0),
            vec![String::new()]
        );
    }
}
