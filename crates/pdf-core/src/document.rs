//! PDF Document builder

use crate::font::{encode_text_hex, BuiltinFont};
use crate::graphics::{generate_line_operators, generate_rect_operators, PaintState, RectStyle};
use crate::image::{
    calculate_scaled_dimensions, generate_image_operators, ImageScaleMode, ImageXObject,
};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{border, Align, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

/// A4 page width in points
pub const A4_WIDTH_PT: f64 = 595.28;
/// A4 page height in points
pub const A4_HEIGHT_PT: f64 = 841.89;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A page in the document under construction
struct PageEntry {
    /// Page dictionary object
    id: ObjectId,
    /// Content stream object, rewritten at serialization
    contents_id: ObjectId,
}

/// A link annotation waiting for its destination page to be resolved
struct PendingLink {
    page: usize,
    /// [x1 y1 x2 y2] in PDF coordinates
    rect: [f64; 4],
    target_page: usize,
}

/// Builder for a new PDF document with top-left based coordinates
///
/// All drawing is buffered per page and written out by
/// [`to_bytes`](Self::to_bytes) / [`save`](Self::save). Both may be called
/// more than once; each call serializes the drawing done so far.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Catalog object (Root)
    catalog_id: ObjectId,
    /// Page tree root
    pages_id: ObjectId,
    /// Pages in order
    pages: Vec<PageEntry>,
    /// Current font
    current_font: BuiltinFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    text_color: Color,
    /// Current fill color
    fill_color: Color,
    /// Current stroke color
    draw_color: Color,
    /// Current stroke width in points
    line_width: f64,
    /// Font objects (created on first use)
    font_objects: BTreeMap<BuiltinFont, ObjectId>,
    /// Fonts used per page (page number -> fonts)
    page_fonts: HashMap<usize, BTreeSet<BuiltinFont>>,
    /// Embedded images (data hash -> object ID, pixel width, pixel height)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Page image resources (page number -> image name -> object ID)
    page_image_resources: HashMap<usize, BTreeMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Link annotations
    links: Vec<PendingLink>,
    /// Document-level scripts (name, JavaScript action object)
    scripts: Vec<(String, ObjectId)>,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create a document with one blank A4 page
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = inner.add_object(catalog);
        inner.trailer.set("Root", Object::Reference(catalog_id));

        let mut doc = Self {
            inner,
            catalog_id,
            pages_id,
            pages: Vec::new(),
            current_font: BuiltinFont::default(),
            current_font_size: 12.0,
            text_color: Color::black(),
            fill_color: Color::white(),
            draw_color: Color::black(),
            line_width: 1.0,
            font_objects: BTreeMap::new(),
            page_fonts: HashMap::new(),
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            links: Vec::new(),
            scripts: Vec::new(),
            page_content_buffer: HashMap::new(),
        };
        doc.add_blank_page();
        doc
    }

    /// Append a blank A4 page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self) -> usize {
        let contents_id = self
            .inner
            .add_object(Stream::new(Dictionary::new(), Vec::new()));
        let id = self.inner.new_object_id();
        self.pages.push(PageEntry { id, contents_id });
        self.pages.len()
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page == 0 || page > self.pages.len() {
            return Err(PdfError::InvalidPage(page, self.pages.len()));
        }
        Ok(())
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: BuiltinFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Set the fill color used by filled rectangles
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Set the stroke color used by lines, borders and outlines
    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    /// Width of `text` in points in the current font and size
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size)
    }

    fn paint_state(&self) -> PaintState {
        PaintState {
            fill: self.fill_color,
            stroke: self.draw_color,
            line_width: self.line_width,
        }
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - Alignment anchor X in points
    /// * `y` - Baseline Y in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_page(page)?;

        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font;
        self.page_fonts.entry(page).or_default().insert(font);

        let ctx = TextRenderContext {
            font_name: font.resource_name().to_string(),
            font_size: self.current_font_size,
            text_width: self.get_text_width(text),
            color: self.text_color,
        };
        let operators =
            generate_text_operators(&encode_text_hex(text), x, A4_HEIGHT_PT - y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a rectangle whose top-left corner is (`x`, `y`)
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: RectStyle,
    ) -> Result<()> {
        self.check_page(page)?;
        let operators = generate_rect_operators(
            x,
            A4_HEIGHT_PT - y - height,
            width,
            height,
            style,
            &self.paint_state(),
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Draw a straight line between two points
    pub fn draw_line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.check_page(page)?;
        let operators = generate_line_operators(
            x1,
            A4_HEIGHT_PT - y1,
            x2,
            A4_HEIGHT_PT - y2,
            &self.paint_state(),
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Stroke selected edges of a cell
    ///
    /// `edges` is a combination of the [`border`] flags. A full frame is
    /// drawn as one rectangle, partial frames as individual lines.
    pub fn draw_border(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        edges: u8,
    ) -> Result<()> {
        if edges & border::ALL == border::ALL {
            return self.draw_rect(page, x, y, width, height, RectStyle::Stroke);
        }

        let (right, bottom) = (x + width, y + height);
        if edges & border::LEFT != 0 {
            self.draw_line(page, x, y, x, bottom)?;
        }
        if edges & border::TOP != 0 {
            self.draw_line(page, x, y, right, y)?;
        }
        if edges & border::RIGHT != 0 {
            self.draw_line(page, right, y, right, bottom)?;
        }
        if edges & border::BOTTOM != 0 {
            self.draw_line(page, x, bottom, right, bottom)?;
        }
        Ok(())
    }

    /// Insert an image with scaling mode
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate of the top edge in points (from top)
    /// * `width` - Target width in points
    /// * `height` - Target height in points
    /// * `mode` - Scaling mode
    ///
    /// # Returns
    /// The (width, height) actually drawn
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: ImageScaleMode,
    ) -> Result<(f64, f64)> {
        self.check_page(page)?;

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        let pdf_y = A4_HEIGHT_PT - y - actual_height;
        let operators =
            generate_image_operators(&image_resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok((actual_width, actual_height))
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1") and pixel dimensions.
    /// Identical image data is embedded once.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        let (object_id, width, height) = match self.embedded_images.get(&data_hash) {
            Some(entry) => *entry,
            None => {
                let xobject = ImageXObject::from_bytes(data)?;
                let object_id = self.inner.add_object(xobject.to_pdf_stream());
                let entry = (object_id, xobject.width, xobject.height);
                self.embedded_images.insert(data_hash, entry);
                entry
            }
        };

        let resources = self.page_image_resources.entry(page).or_default();
        if let Some((name, _)) = resources.iter().find(|(_, id)| **id == object_id) {
            return Ok((name.clone(), width, height));
        }

        let name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        resources.insert(name.clone(), object_id);

        Ok((name, width, height))
    }

    /// Add a clickable region that jumps to the top of `target_page`
    pub fn add_link(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        target_page: usize,
    ) -> Result<()> {
        self.check_page(page)?;
        self.check_page(target_page)?;
        self.links.push(PendingLink {
            page,
            rect: [x, A4_HEIGHT_PT - y - height, x + width, A4_HEIGHT_PT - y],
            target_page,
        });
        Ok(())
    }

    /// Embed a document-level JavaScript under `name`
    ///
    /// The script is registered in the catalog's name tree; nothing calls
    /// it unless the viewer or an action does.
    pub fn set_javascript(&mut self, name: &str, script: &str) {
        let mut action = Dictionary::new();
        action.set("S", Object::Name(b"JavaScript".to_vec()));
        action.set("JS", Object::string_literal(script));
        let action_id = self.inner.add_object(action);
        self.scripts.push((name.to_string(), action_id));
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        // lopdf adds its xref stream to the document it saves
        let mut snapshot = self.inner.clone();
        let mut buffer = Vec::new();
        snapshot
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Write page tree, page dictionaries, content streams and resources
    fn finalize(&mut self) -> Result<()> {
        self.ensure_font_objects();

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|p| Object::Reference(p.id))
            .collect();
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", self.pages.len() as i64);
        pages_dict.set("Kids", Object::Array(kids));
        self.inner
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        for number in 1..=self.pages.len() {
            self.write_page(number)?;
        }

        if !self.scripts.is_empty() {
            self.write_javascript_names()?;
        }

        Ok(())
    }

    /// Create font objects for every font used on any page
    fn ensure_font_objects(&mut self) {
        let used: BTreeSet<BuiltinFont> = self.page_fonts.values().flatten().copied().collect();
        for font in used {
            if !self.font_objects.contains_key(&font) {
                let id = self.inner.add_object(font.to_pdf_dictionary());
                self.font_objects.insert(font, id);
            }
        }
    }

    fn write_page(&mut self, number: usize) -> Result<()> {
        let (page_id, contents_id) = {
            let entry = &self.pages[number - 1];
            (entry.id, entry.contents_id)
        };

        let content = self
            .page_content_buffer
            .get(&number)
            .cloned()
            .unwrap_or_default();
        self.inner
            .objects
            .insert(contents_id, Object::Stream(compress_content(content)?));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::from(0.0),
                Object::from(0.0),
                Object::from(A4_WIDTH_PT),
                Object::from(A4_HEIGHT_PT),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(self.page_resources(number)?));
        page_dict.set("Contents", Object::Reference(contents_id));

        let annotations = self.page_annotations(number);
        if !annotations.is_empty() {
            page_dict.set("Annots", Object::Array(annotations));
        }

        self.inner
            .objects
            .insert(page_id, Object::Dictionary(page_dict));
        Ok(())
    }

    fn page_resources(&self, number: usize) -> Result<Dictionary> {
        let mut resources = Dictionary::new();

        if let Some(fonts) = self.page_fonts.get(&number) {
            let mut font_dict = Dictionary::new();
            for font in fonts {
                let id = self.font_objects.get(font).ok_or_else(|| {
                    PdfError::ParseError(format!("Font {} was not created", font.base_font()))
                })?;
                font_dict.set(font.resource_name(), Object::Reference(*id));
            }
            resources.set("Font", Object::Dictionary(font_dict));
        }

        if let Some(images) = self.page_image_resources.get(&number) {
            let mut xobject_dict = Dictionary::new();
            for (name, id) in images {
                xobject_dict.set(name.as_bytes().to_vec(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        Ok(resources)
    }

    fn page_annotations(&self, number: usize) -> Vec<Object> {
        self.links
            .iter()
            .filter(|link| link.page == number)
            .map(|link| {
                let target = self.pages[link.target_page - 1].id;
                let mut annot = Dictionary::new();
                annot.set("Type", Object::Name(b"Annot".to_vec()));
                annot.set("Subtype", Object::Name(b"Link".to_vec()));
                annot.set(
                    "Rect",
                    Object::Array(link.rect.iter().map(|v| Object::from(*v)).collect()),
                );
                annot.set(
                    "Border",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(0),
                    ]),
                );
                annot.set(
                    "Dest",
                    Object::Array(vec![
                        Object::Reference(target),
                        Object::Name(b"XYZ".to_vec()),
                        Object::Null,
                        Object::Null,
                        Object::Null,
                    ]),
                );
                Object::Dictionary(annot)
            })
            .collect()
    }

    /// Register scripts in the catalog's /Names /JavaScript tree
    fn write_javascript_names(&mut self) -> Result<()> {
        // Name trees must be sorted by key
        let mut scripts = self.scripts.clone();
        scripts.sort_by(|a, b| a.0.cmp(&b.0));

        let names: Vec<Object> = scripts
            .into_iter()
            .flat_map(|(name, id)| [Object::string_literal(name), Object::Reference(id)])
            .collect();

        let mut javascript = Dictionary::new();
        javascript.set("Names", Object::Array(names));
        let mut name_dict = Dictionary::new();
        name_dict.set("JavaScript", Object::Dictionary(javascript));

        let catalog = self
            .inner
            .get_object_mut(self.catalog_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Catalog is not a dictionary".to_string()))?;
        catalog.set("Names", Object::Dictionary(name_dict));

        Ok(())
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }
}

/// Deflate a content stream
fn compress_content(content: Vec<u8>) -> Result<Stream> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&content)?;
    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    Ok(Stream::new(dict, encoder.finish()?))
}
