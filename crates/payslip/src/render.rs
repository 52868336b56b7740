//! Layout to PDF

use crate::config::PayslipConfig;
use crate::layout::{layout_payslip, Cell, Draw, Layout, CELL_PADDING};
use crate::model::DerivedRecord;
use crate::{PayslipError, Result};
use log::{debug, info};
use pdf_core::{border, Align, Color, ImageScaleMode, PdfDocument, RectStyle};
use std::path::{Path, PathBuf};

/// Payslips are always one page
const PAGE: usize = 1;

/// Stroke width of cell borders, in mm
const LINE_WIDTH: f64 = 0.3;

fn mm(value: f64) -> f64 {
    value * 72.0 / 25.4
}

/// Render one derived record to PDF bytes
pub fn render(record: &DerivedRecord, config: &PayslipConfig) -> Result<Vec<u8>> {
    let layout = layout_payslip(record, &config.company);
    render_layout(&layout, config.company.logo_data())
}

/// Draw a layout on a fresh page
///
/// `logo` is required only if the layout contains a logo command; without
/// it the logo slot is left empty.
pub fn render_layout(layout: &Layout, logo: Option<&[u8]>) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new();
    doc.set_line_width(mm(LINE_WIDTH));
    doc.set_draw_color(Color::black());

    for command in &layout.commands {
        match &command.draw {
            Draw::Cell(cell) => draw_cell(&mut doc, cell)?,
            Draw::Logo { x, y, width } => {
                if let Some(data) = logo {
                    doc.insert_image(
                        data,
                        PAGE,
                        mm(*x),
                        mm(*y),
                        mm(*width),
                        0.0,
                        ImageScaleMode::FitWidth,
                    )?;
                }
            }
            Draw::Link {
                x,
                y,
                width,
                height,
                target_page,
            } => doc.add_link(PAGE, mm(*x), mm(*y), mm(*width), mm(*height), *target_page)?,
            Draw::Script { name, source } => doc.set_javascript(name, source),
        }
    }

    debug!("Rendered {} draw commands", layout.commands.len());
    Ok(doc.to_bytes()?)
}

/// Fill, then borders, then text
fn draw_cell(doc: &mut PdfDocument, cell: &Cell) -> Result<()> {
    let (x, y, width, height) = (mm(cell.x), mm(cell.y), mm(cell.width), mm(cell.height));

    if let Some(fill) = cell.fill {
        doc.set_fill_color(fill);
        doc.draw_rect(PAGE, x, y, width, height, RectStyle::Fill)?;
    }
    if cell.border != border::NONE {
        doc.draw_border(PAGE, x, y, width, height, cell.border)?;
    }

    if cell.text.is_empty() {
        return Ok(());
    }

    doc.set_font(cell.font, cell.font_size);
    doc.set_text_color(cell.text_color);

    let padding = mm(CELL_PADDING);
    let anchor = match cell.align {
        Align::Left => x + padding,
        Align::Center => x + width / 2.0,
        Align::Right => x + width - padding,
    };
    // Baseline roughly centres the glyphs vertically
    let baseline = y + height / 2.0 + 0.3 * cell.font_size as f64;

    doc.insert_text(&cell.text, PAGE, anchor, baseline, cell.align)?;
    Ok(())
}

/// `{out_dir}/{Name}_{Month}_{Year}.pdf`
pub fn output_path(out_dir: &Path, record: &DerivedRecord) -> PathBuf {
    let e = record.employee();
    out_dir.join(format!("{}_{}_{}.pdf", e.name, e.month, e.year))
}

/// Render a payslip and write it into an existing directory
///
/// The directory is not created. Any I/O failure is reported as
/// [`PayslipError::Write`] naming the employee.
pub fn write_payslip(
    record: &DerivedRecord,
    config: &PayslipConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    let bytes = render(record, config)?;
    let path = output_path(out_dir, record);

    std::fs::write(&path, bytes).map_err(|source| PayslipError::Write {
        employee: record.employee().name.clone(),
        path: path.clone(),
        source,
    })?;

    info!("Generated {}", path.display());
    Ok(path)
}
