//! PDF Core - Single-page PDF drawing
//!
//! This crate provides functionality for:
//! - Creating blank A4 documents
//! - Placing text in the base-14 Helvetica fonts
//! - Drawing rectangles, lines and cell borders
//! - Inserting images (JPEG, PNG)
//! - Link annotations and document-level JavaScript
//!
//! # Example
//!
//! ```
//! use pdf_core::{Align, BuiltinFont, PdfDocument};
//!
//! let mut doc = PdfDocument::new();
//! doc.set_font(BuiltinFont::HelveticaBold, 12.0);
//! doc.insert_text("Hello, World!", 1, 100.0, 100.0, Align::Left)?;
//! let bytes = doc.to_bytes()?;
//! assert!(bytes.starts_with(b"%PDF"));
//! # Ok::<(), pdf_core::PdfError>(())
//! ```

mod document;
mod font;
mod graphics;
mod image;
mod text;

pub use document::{Color, PdfDocument, A4_HEIGHT_PT, A4_WIDTH_PT};
pub use font::{encode_text_hex, BuiltinFont};
pub use graphics::RectStyle;
pub use image::{ImageScaleMode, ImageXObject};
pub use text::wrap_to_width;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Cell edge flags for [`PdfDocument::draw_border`]
pub mod border {
    /// No edges
    pub const NONE: u8 = 0;
    /// Left edge
    pub const LEFT: u8 = 8; // 1000
    /// Top edge
    pub const TOP: u8 = 4; // 0100
    /// Right edge
    pub const RIGHT: u8 = 2; // 0010
    /// Bottom edge
    pub const BOTTOM: u8 = 1; // 0001
    /// Full frame
    pub const ALL: u8 = LEFT | TOP | RIGHT | BOTTOM;
}
