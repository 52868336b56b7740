//! Payslip page layout as a list of draw commands
//!
//! Geometry is in millimetres on a 210 x 297 page, origin top-left. Font
//! sizes are in points. Every command is tagged with the [`Band`] it
//! belongs to so layouts can be compared band by band.

use crate::config::CompanyProfile;
use crate::model::DerivedRecord;
use pdf_core::{border, wrap_to_width, Align, BuiltinFont, Color};
use rupee_text::{render_amount, rupees_in_words};

/// Left edge of the bordered grid
const LEFT: f64 = 10.0;
/// Width of the bordered grid
const FULL_WIDTH: f64 = 190.0;
/// Horizontal text padding inside a cell
pub(crate) const CELL_PADDING: f64 = 1.0;

const TITLE_Y: f64 = 40.0;
const IDENTITY_Y: f64 = 47.0;
const IDENTITY_ROW_H: f64 = 7.0;
const ATTENDANCE_Y: f64 = 68.0;
const TABLE_HEADER_Y: f64 = 75.0;
const TABLE_HEADER_H: f64 = 8.0;
const TABLE_ROWS_Y: f64 = 83.0;
const TABLE_ROW_H: f64 = 6.0;
const TOTALS_Y: f64 = 113.0;
const NET_PAY_Y: f64 = 121.0;
const DISCLAIMER_Y: f64 = 141.0;
const BUTTON_Y: f64 = 151.0;

/// Table column x positions and widths: label, rate, amount, deduction label, deduction
const COLUMNS: [(f64, f64); 5] = [
    (10.0, 55.0),
    (65.0, 20.0),
    (85.0, 20.0),
    (105.0, 55.0),
    (160.0, 40.0),
];

/// Page regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Header,
    Title,
    Identity,
    Attendance,
    Table,
    Totals,
    NetPay,
    Footer,
}

/// A bordered, optionally filled box with one line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Combination of [`pdf_core::border`] flags
    pub border: u8,
    pub fill: Option<Color>,
    pub text: String,
    pub align: Align,
    pub font: BuiltinFont,
    pub font_size: f32,
    pub text_color: Color,
}

impl Cell {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            border: border::NONE,
            fill: None,
            text: String::new(),
            align: Align::Left,
            font: BuiltinFont::Helvetica,
            font_size: 9.0,
            text_color: Color::black(),
        }
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn border(mut self, edges: u8) -> Self {
        self.border = edges;
        self
    }

    fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn font(mut self, font: BuiltinFont, size: f32) -> Self {
        self.font = font;
        self.font_size = size;
        self
    }

    fn bold(self, size: f32) -> Self {
        self.font(BuiltinFont::HelveticaBold, size)
    }

    fn regular(self, size: f32) -> Self {
        self.font(BuiltinFont::Helvetica, size)
    }

    fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Cell(Cell),
    /// Company logo, scaled to `width` with its aspect ratio kept
    Logo { x: f64, y: f64, width: f64 },
    /// Clickable area jumping to `target_page`
    Link {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        target_page: usize,
    },
    /// Document-level script
    Script { name: String, source: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub band: Band,
    pub draw: Draw,
}

/// Complete page description for one payslip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub commands: Vec<DrawCommand>,
}

impl Layout {
    fn push(&mut self, band: Band, draw: Draw) {
        self.commands.push(DrawCommand { band, draw });
    }

    fn cell(&mut self, band: Band, cell: Cell) {
        self.push(band, Draw::Cell(cell));
    }

    /// Commands of one band, in drawing order
    pub fn band(&self, band: Band) -> impl Iterator<Item = &Draw> + '_ {
        self.commands
            .iter()
            .filter(move |c| c.band == band)
            .map(|c| &c.draw)
    }

    /// Text of every cell in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match &c.draw {
                Draw::Cell(cell) if !cell.text.is_empty() => Some(cell.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Earnings side of a table row
struct EarningsCell<'a> {
    label: &'a str,
    rate: f64,
    amount: f64,
}

/// Deductions side of a table row
struct DeductionsCell<'a> {
    label: &'a str,
    amount: f64,
}

/// Table rows: each earnings line sits beside a deduction purely by position
fn table_rows(record: &DerivedRecord) -> [(EarningsCell<'_>, DeductionsCell<'_>); 5] {
    let e = record.employee();
    let blank = || {
        (
            EarningsCell {
                label: "",
                rate: 0.0,
                amount: 0.0,
            },
            DeductionsCell {
                label: "",
                amount: 0.0,
            },
        )
    };

    [
        (
            EarningsCell {
                label: "Basic Pay",
                rate: e.basic_pay_rate,
                amount: e.basic_pay_amount,
            },
            DeductionsCell {
                label: "Professional Tax",
                amount: e.professional_tax,
            },
        ),
        (
            EarningsCell {
                label: "House Rent Allowance",
                rate: e.hra_rate,
                amount: e.hra_amount,
            },
            DeductionsCell {
                label: "Provident Fund",
                amount: e.provident_fund,
            },
        ),
        (
            EarningsCell {
                label: "Other Allowance",
                rate: e.other_allowance_rate,
                amount: e.other_allowance_amount,
            },
            DeductionsCell {
                label: "Income Tax",
                amount: record.income_tax(),
            },
        ),
        blank(),
        blank(),
    ]
}

fn money(amount: f64) -> String {
    render_amount(amount, 2)
}

/// Lay out one payslip
pub fn layout_payslip(record: &DerivedRecord, company: &CompanyProfile) -> Layout {
    let mut layout = Layout::default();

    layout_header(&mut layout, company);
    layout_identity(&mut layout, record);
    layout_table(&mut layout, record);
    layout_totals(&mut layout, record);
    layout_footer(&mut layout, company);

    layout
}

fn layout_header(layout: &mut Layout, company: &CompanyProfile) {
    if company.logo_data().is_some() {
        layout.push(
            Band::Header,
            Draw::Logo {
                x: 15.0,
                y: 10.0,
                width: 40.0,
            },
        );
    }

    layout.cell(
        Band::Header,
        Cell::new(110.0, 15.0, 85.0, 5.0)
            .text(&company.name)
            .bold(10.0),
    );
    // Long address lines wrap inside the 85 mm column
    let max_width_pt = (85.0 - 2.0 * CELL_PADDING) * 72.0 / 25.4;
    let lines = company
        .address_lines
        .iter()
        .flat_map(|line| wrap_to_width(line, BuiltinFont::Helvetica, 9.0, max_width_pt));
    for (i, line) in lines.enumerate() {
        layout.cell(
            Band::Header,
            Cell::new(110.0, 20.0 + 4.0 * i as f64, 85.0, 4.0)
                .text(line)
                .regular(9.0),
        );
    }
}

fn layout_identity(layout: &mut Layout, record: &DerivedRecord) {
    let e = record.employee();
    let gray = Color::from_rgb(230, 230, 230);

    layout.cell(
        Band::Title,
        Cell::new(LEFT, TITLE_Y, FULL_WIDTH, 7.0)
            .text(format!("Payslip for : {} {}", e.month, e.year))
            .border(border::ALL)
            .fill(gray)
            .align(Align::Right)
            .regular(10.0),
    );

    let rows = [
        (" Emp Name", &e.name, "DOJ", &e.date_of_joining),
        (" Designation", &e.designation, "Gender", &e.gender),
        (" Bank Ac. No.", &e.bank_account, "PAN", &e.tax_id),
    ];
    let last = rows.len() - 1;
    for (i, (left_label, left_value, right_label, right_value)) in rows.into_iter().enumerate() {
        let y = IDENTITY_Y + IDENTITY_ROW_H * i as f64;
        // Only the last row closes the block
        let bottom = if i == last {
            border::BOTTOM
        } else {
            border::NONE
        };

        layout.cell(
            Band::Identity,
            Cell::new(10.0, y, 25.0, IDENTITY_ROW_H)
                .text(left_label)
                .border(border::LEFT | bottom),
        );
        layout.cell(
            Band::Identity,
            Cell::new(35.0, y, 65.0, IDENTITY_ROW_H)
                .text(left_value.as_str())
                .border(bottom)
                .bold(9.0),
        );
        layout.cell(
            Band::Identity,
            Cell::new(100.0, y, 30.0, IDENTITY_ROW_H)
                .text(right_label)
                .border(bottom)
                .align(Align::Right),
        );
        layout.cell(
            Band::Identity,
            Cell::new(130.0, y, 70.0, IDENTITY_ROW_H)
                .text(format!("  {right_value}"))
                .border(border::RIGHT | bottom)
                .bold(9.0),
        );
    }

    layout.cell(
        Band::Attendance,
        Cell::new(LEFT, ATTENDANCE_Y, FULL_WIDTH, 7.0)
            .text(format!(
                "Standard Days: {}          Payable days: {}          Loss of Pay Days : {}",
                e.standard_days, e.payable_days, e.loss_of_pay_days
            ))
            .border(border::ALL)
            .fill(gray),
    );
}

fn layout_table(layout: &mut Layout, record: &DerivedRecord) {
    let [label, rate, amount, deduction_label, deduction] = COLUMNS;
    let y = TABLE_HEADER_Y;
    let h = TABLE_HEADER_H;

    layout.cell(
        Band::Table,
        Cell::new(label.0, y, label.1, h)
            .text(" Earnings")
            .border(border::LEFT | border::BOTTOM | border::TOP)
            .bold(9.0),
    );
    // Rate column header: empty frame with two stacked captions
    layout.cell(
        Band::Table,
        Cell::new(rate.0, y, rate.1, h).border(border::BOTTOM | border::TOP),
    );
    for (i, caption) in ["Standard", "Rate"].into_iter().enumerate() {
        layout.cell(
            Band::Table,
            Cell::new(rate.0, y + h / 2.0 * i as f64, rate.1, h / 2.0)
                .text(caption)
                .align(Align::Center)
                .bold(8.0),
        );
    }
    layout.cell(
        Band::Table,
        Cell::new(amount.0, y, amount.1, h)
            .text("Amount")
            .border(border::BOTTOM | border::TOP | border::RIGHT)
            .align(Align::Right)
            .bold(9.0),
    );
    layout.cell(
        Band::Table,
        Cell::new(deduction_label.0, y, deduction_label.1, h)
            .text(" Deductions")
            .border(border::BOTTOM | border::TOP)
            .bold(9.0),
    );
    layout.cell(
        Band::Table,
        Cell::new(deduction.0, y, deduction.1, h)
            .text("Total")
            .border(border::BOTTOM | border::TOP | border::RIGHT)
            .align(Align::Right)
            .bold(9.0),
    );

    for (i, (earning, deduct)) in table_rows(record).into_iter().enumerate() {
        let y = TABLE_ROWS_Y + TABLE_ROW_H * i as f64;
        let h = TABLE_ROW_H;

        let rate_text = if earning.rate != 0.0 {
            money(earning.rate)
        } else {
            String::new()
        };
        let amount_text = if earning.amount != 0.0 || earning.rate != 0.0 {
            money(earning.amount)
        } else {
            String::new()
        };
        let deduction_text = if deduct.amount != 0.0 {
            money(deduct.amount)
        } else {
            String::new()
        };

        layout.cell(
            Band::Table,
            Cell::new(label.0, y, label.1, h)
                .text(format!(" {}", earning.label))
                .border(border::LEFT),
        );
        layout.cell(
            Band::Table,
            Cell::new(rate.0, y, rate.1, h)
                .text(rate_text)
                .align(Align::Right),
        );
        layout.cell(
            Band::Table,
            Cell::new(amount.0, y, amount.1, h)
                .text(amount_text)
                .border(border::RIGHT)
                .align(Align::Right),
        );
        layout.cell(
            Band::Table,
            Cell::new(deduction_label.0, y, deduction_label.1, h)
                .text(format!(" {}", deduct.label)),
        );
        layout.cell(
            Band::Table,
            Cell::new(deduction.0, y, deduction.1, h)
                .text(deduction_text)
                .border(border::RIGHT)
                .align(Align::Right),
        );
    }
}

fn layout_totals(layout: &mut Layout, record: &DerivedRecord) {
    let [label, rate, amount, deduction_label, deduction] = COLUMNS;
    let y = TOTALS_Y;
    let h = 8.0;
    let gross = money(record.gross_earnings());

    layout.cell(
        Band::Totals,
        Cell::new(label.0, y, label.1, h)
            .text(" Gross Earnings")
            .border(border::LEFT | border::TOP | border::BOTTOM)
            .bold(9.0),
    );
    layout.cell(
        Band::Totals,
        Cell::new(rate.0, y, rate.1, h)
            .text(gross.as_str())
            .border(border::TOP | border::BOTTOM)
            .align(Align::Right)
            .bold(9.0),
    );
    layout.cell(
        Band::Totals,
        Cell::new(amount.0, y, amount.1, h)
            .text(gross)
            .border(border::TOP | border::BOTTOM | border::RIGHT)
            .align(Align::Right)
            .bold(9.0),
    );
    layout.cell(
        Band::Totals,
        Cell::new(deduction_label.0, y, deduction_label.1, h)
            .text(" Total Deductions")
            .border(border::TOP | border::BOTTOM)
            .bold(9.0),
    );
    // Whole rupees here, two decimals everywhere else
    layout.cell(
        Band::Totals,
        Cell::new(deduction.0, y, deduction.1, h)
            .text(render_amount(record.total_deductions(), 0))
            .border(border::TOP | border::BOTTOM | border::RIGHT)
            .align(Align::Right)
            .bold(9.0),
    );

    let y = NET_PAY_Y;
    let h = 10.0;
    layout.cell(
        Band::NetPay,
        Cell::new(10.0, y, 30.0, h)
            .text(" NET PAY")
            .border(border::LEFT | border::TOP | border::BOTTOM)
            .bold(10.0),
    );
    layout.cell(
        Band::NetPay,
        Cell::new(40.0, y, 25.0, h)
            .text(money(record.net_pay()))
            .border(border::TOP | border::BOTTOM)
            .bold(10.0),
    );
    layout.cell(
        Band::NetPay,
        Cell::new(65.0, y, 135.0, h)
            .text(format!("({})", rupees_in_words(record.net_pay())))
            .border(border::TOP | border::BOTTOM | border::RIGHT)
            .regular(8.0),
    );
}

fn layout_footer(layout: &mut Layout, company: &CompanyProfile) {
    layout.cell(
        Band::Footer,
        Cell::new(LEFT, DISCLAIMER_Y, FULL_WIDTH, 5.0)
            .text(&company.disclaimer)
            .align(Align::Center)
            .regular(8.0),
    );

    let (x, y, width, height) = (90.0, BUTTON_Y, 30.0, 10.0);
    layout.cell(
        Band::Footer,
        Cell::new(x, y, width, height)
            .text("PRINT")
            .border(border::ALL)
            .fill(Color::from_rgb(0, 150, 150))
            .align(Align::Center)
            .bold(10.0)
            .text_color(Color::white()),
    );
    layout.push(
        Band::Footer,
        Draw::Link {
            x,
            y,
            width,
            height,
            target_page: 1,
        },
    );
    layout.push(
        Band::Footer,
        Draw::Script {
            name: "Print".to_string(),
            source: "function Print() { print(); }".to_string(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{derive, fill_naive_totals};
    use crate::model::EmployeeRecord;
    use pretty_assertions::assert_eq;

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            month: "Dec".to_string(),
            year: "2024".to_string(),
            name: "Vinay".to_string(),
            designation: "Software Engineer".to_string(),
            bank_account: "1234567890".to_string(),
            date_of_joining: "2023-01-01".to_string(),
            gender: "Male".to_string(),
            tax_id: "ABCDE1234F".to_string(),
            standard_days: "31".to_string(),
            payable_days: "31".to_string(),
            basic_pay_rate: 50_000.0,
            basic_pay_amount: 50_000.0,
            hra_amount: 20_000.0,
            other_allowance_amount: 10_000.0,
            professional_tax: 200.0,
            provident_fund: 1_800.0,
            ..Default::default()
        }
    }

    fn layout_of(mut record: EmployeeRecord) -> Layout {
        fill_naive_totals(&mut record);
        layout_payslip(&derive(record), &CompanyProfile::default())
    }

    fn cells(layout: &Layout, band: Band) -> Vec<Cell> {
        layout
            .band(band)
            .filter_map(|d| match d {
                Draw::Cell(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    /// Table body cells grouped by row, left to right
    fn table_body(layout: &Layout) -> Vec<Vec<Cell>> {
        let body: Vec<Cell> = cells(layout, Band::Table)
            .into_iter()
            .filter(|c| c.y >= TABLE_ROWS_Y)
            .collect();
        body.chunks(COLUMNS.len()).map(|row| row.to_vec()).collect()
    }

    #[test]
    fn test_title_and_attendance() {
        let layout = layout_of(record());

        let title = &cells(&layout, Band::Title)[0];
        assert_eq!(title.text, "Payslip for : Dec 2024");
        assert_eq!(title.align, Align::Right);
        assert_eq!(title.border, border::ALL);
        assert!(title.fill.is_some());
        assert_eq!((title.x, title.y, title.width, title.height), (10.0, 40.0, 190.0, 7.0));

        let attendance = &cells(&layout, Band::Attendance)[0];
        assert_eq!(
            attendance.text,
            "Standard Days: 31          Payable days: 31          Loss of Pay Days : 0"
        );
    }

    #[test]
    fn test_identity_grid() {
        let layout = layout_of(record());
        let identity = cells(&layout, Band::Identity);
        assert_eq!(identity.len(), 12);

        let texts: Vec<&str> = identity.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                " Emp Name",
                "Vinay",
                "DOJ",
                "  2023-01-01",
                " Designation",
                "Software Engineer",
                "Gender",
                "  Male",
                " Bank Ac. No.",
                "1234567890",
                "PAN",
                "  ABCDE1234F",
            ]
        );

        // Bottom edge only on the last row
        assert!(identity[..8].iter().all(|c| c.border & border::BOTTOM == 0));
        assert!(identity[8..].iter().all(|c| c.border & border::BOTTOM != 0));
        assert_eq!(identity[1].font, BuiltinFont::HelveticaBold);
        assert_eq!(identity[0].font, BuiltinFont::Helvetica);
    }

    #[test]
    fn test_table_rows_and_suppression() {
        let layout = layout_of(record());
        let header = cells(&layout, Band::Table)
            .into_iter()
            .filter(|c| c.y < TABLE_ROWS_Y)
            .count();
        // Earnings, rate frame, two rate captions, Amount, Deductions, Total
        assert_eq!(header, 7);

        let body = table_body(&layout);
        assert_eq!(body.len(), 5);
        let rows: Vec<Vec<&str>> = body
            .iter()
            .map(|row| row.iter().map(|c| c.text.as_str()).collect())
            .collect();

        assert_eq!(
            rows[0],
            vec![" Basic Pay", "50000.00", "50000.00", " Professional Tax", "200.00"]
        );
        // No rate: rate cell blank, amount shown
        assert_eq!(
            rows[1],
            vec![" House Rent Allowance", "", "20000.00", " Provident Fund", "1800.00"]
        );
        assert_eq!(
            rows[2],
            vec![" Other Allowance", "", "10000.00", " Income Tax", "8708.33"]
        );
        assert_eq!(rows[3], vec![" ", "", "", " ", ""]);
        assert_eq!(rows[4], vec![" ", "", "", " ", ""]);
    }

    #[test]
    fn test_rate_without_amount_shows_zero_amount() {
        let layout = layout_of(EmployeeRecord {
            hra_rate: 15_000.0,
            hra_amount: 0.0,
            ..record()
        });
        let body = table_body(&layout);
        let hra_row = &body[1];
        assert_eq!(hra_row[0].text, " House Rent Allowance");
        assert_eq!(hra_row[1].text, "15000.00");
        assert_eq!(hra_row[2].text, "0.00");
    }

    #[test]
    fn test_negative_values_are_shown() {
        let layout = layout_of(EmployeeRecord {
            professional_tax: -50.0,
            ..record()
        });
        let body = table_body(&layout);
        assert_eq!(body[0][3].text, " Professional Tax");
        assert_eq!(body[0][4].text, "-50.00");
    }

    #[test]
    fn test_totals_precision() {
        let layout = layout_of(record());
        let totals = cells(&layout, Band::Totals);
        let texts: Vec<&str> = totals.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![" Gross Earnings", "80000.00", "80000.00", " Total Deductions", "10708"]
        );

        let net = cells(&layout, Band::NetPay);
        assert_eq!(net[1].text, "69291.67");
        assert_eq!(
            net[2].text,
            "(RUPEES SIXTY NINE THOUSAND TWO HUNDRED NINETY ONE ONLY)"
        );
    }

    #[test]
    fn test_footer() {
        let layout = layout_of(record());
        let footer: Vec<&Draw> = layout.band(Band::Footer).collect();
        assert_eq!(footer.len(), 4);

        match footer[1] {
            Draw::Cell(button) => {
                assert_eq!(button.text, "PRINT");
                assert_eq!(button.text_color, Color::white());
                assert_eq!(button.fill, Some(Color::from_rgb(0, 150, 150)));
            }
            other => panic!("expected button cell, got {other:?}"),
        }
        assert!(matches!(footer[2], Draw::Link { target_page: 1, .. }));
        assert!(matches!(footer[3], Draw::Script { .. }));
    }

    #[test]
    fn test_no_logo_without_logo_data() {
        let layout = layout_of(record());
        assert!(!layout
            .band(Band::Header)
            .any(|d| matches!(d, Draw::Logo { .. })));
        assert!(layout.texts().contains(&"AbegaTech Pvt. Ltd."));
    }

    #[test]
    fn test_long_address_line_wraps() {
        let mut company = CompanyProfile::default();
        company.address_lines = vec![
            "Plot 12, Second Floor, Cyber Towers Annexe, Hitech City Main Road, Madhapur"
                .to_string(),
        ];
        let mut employee = record();
        fill_naive_totals(&mut employee);
        let layout = layout_payslip(&derive(employee), &company);

        let header = cells(&layout, Band::Header);
        // Company name plus at least two address lines
        assert!(header.len() >= 3);
        assert_eq!(header[2].y, 24.0);
        assert!(header[1..].iter().all(|c| !c.text.is_empty()));
    }

    #[test]
    fn test_identity_changes_only_touch_identity_band() {
        let first = layout_of(record());
        let second = layout_of(EmployeeRecord {
            name: "Meera".to_string(),
            designation: "Analyst".to_string(),
            email: "meera@example.com".to_string(),
            bank_account: "999".to_string(),
            date_of_joining: "2020-05-05".to_string(),
            gender: "Female".to_string(),
            tax_id: "ZZZZZ9999Z".to_string(),
            ..record()
        });

        let outside = |layout: &Layout| -> Vec<DrawCommand> {
            layout
                .commands
                .iter()
                .filter(|c| c.band != Band::Identity)
                .cloned()
                .collect()
        };
        assert_eq!(outside(&first), outside(&second));
        assert_ne!(first, second);
    }
}
