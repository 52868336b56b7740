//! Path drawing operators (rectangles, lines)

use crate::document::Color;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RectStyle {
    /// Outline only
    #[default]
    Stroke,
    /// Interior only
    Fill,
    /// Interior, then outline
    FillStroke,
}

impl RectStyle {
    fn paint_operator(&self) -> &'static str {
        match self {
            RectStyle::Stroke => "S",
            RectStyle::Fill => "f",
            RectStyle::FillStroke => "B",
        }
    }
}

/// Stroke/fill state applied to a path
#[derive(Debug, Clone, Copy)]
pub struct PaintState {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
}

/// Generate operators for a rectangle
///
/// `x`/`y` are the lower-left corner in PDF coordinates.
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: RectStyle,
    paint: &PaintState,
) -> Vec<u8> {
    let mut ops = String::from("q\n");
    push_paint_state(&mut ops, paint);
    ops.push_str(&format!("{x} {y} {width} {height} re\n"));
    ops.push_str(style.paint_operator());
    ops.push_str("\nQ\n");
    ops.into_bytes()
}

/// Generate operators for a straight stroked line (PDF coordinates)
pub fn generate_line_operators(x1: f64, y1: f64, x2: f64, y2: f64, paint: &PaintState) -> Vec<u8> {
    let mut ops = String::from("q\n");
    push_paint_state(&mut ops, paint);
    ops.push_str(&format!("{x1} {y1} m\n{x2} {y2} l\nS\nQ\n"));
    ops.into_bytes()
}

fn push_paint_state(ops: &mut String, paint: &PaintState) {
    ops.push_str(&format!("{} w\n", paint.line_width));
    ops.push_str(&format!(
        "{} {} {} RG\n",
        paint.stroke.r, paint.stroke.g, paint.stroke.b
    ));
    ops.push_str(&format!(
        "{} {} {} rg\n",
        paint.fill.r, paint.fill.g, paint.fill.b
    ));
}
