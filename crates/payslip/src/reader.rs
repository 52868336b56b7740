//! CSV record source
//!
//! Column headers are matched case-insensitively against a list of
//! accepted names per field.

use crate::assemble::fill_naive_totals;
use crate::config::RecordDefaults;
use crate::model::EmployeeRecord;
use crate::{PayslipError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::collections::HashMap;
use std::io;
use std::path::Path;

const MONTH: &[&str] = &["Month"];
const YEAR: &[&str] = &["Year"];
const NAME: &[&str] = &["Emp Name", "Name", "Employee Name", "Employee"];
const DESIGNATION: &[&str] = &["Designation", "Role", "Position"];
const EMAIL: &[&str] = &["Email", "Email Address", "E-mail"];
const BANK_ACCOUNT: &[&str] = &["Bank Ac No", "Bank Account", "Account No"];
const DATE_OF_JOINING: &[&str] = &["DOJ", "Date of Joining", "Joining Date"];
const GENDER: &[&str] = &["Gender", "Sex"];
const TAX_ID: &[&str] = &["PAN", "PAN Number"];
const UAN: &[&str] = &["UAN", "UAN Number"];
const PF_NUMBER: &[&str] = &["PF No", "PF Number", "PF Account"];

const STANDARD_DAYS: &[&str] = &["Standard Days", "Std Days", "Total Days"];
const PAYABLE_DAYS: &[&str] = &["Payable Days", "Paid Days"];
const LOSS_OF_PAY_DAYS: &[&str] = &["Loss of Pay Days", "LOP", "LOP Days", "Absent"];

const BASIC_RATE: &[&str] = &["Basic Pay Rate", "Basic Rate"];
const BASIC_AMOUNT: &[&str] = &["Basic Pay", "Basic Pay Amount", "Basic"];
const HRA_RATE: &[&str] = &["HRA Rate"];
const HRA_AMOUNT: &[&str] = &["HRA", "House Rent Allowance"];
const OTHER_RATE: &[&str] = &["Other Allowance Rate", "Other Allw Rate"];
const OTHER_AMOUNT: &[&str] = &["Other Allowance", "Other Allowance Amount", "Other Allw"];

const PROFESSIONAL_TAX: &[&str] = &["Professional Tax", "Prof Tax", "PT"];
const PROVIDENT_FUND: &[&str] = &["PF", "Provident Fund"];
const INCOME_TAX: &[&str] = &["Income Tax", "IT", "TDS"];

const GROSS_EARNINGS: &[&str] = &["Gross Earnings", "Gross Pay", "Total Earnings"];
const TOTAL_DEDUCTIONS: &[&str] = &["Total Deductions", "Total Ded"];
const NET_PAY: &[&str] = &["Net Pay", "Net Salary"];

/// Header name (lower-cased) to column index
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_lowercase(), i))
                .collect(),
        )
    }

    /// First accepted name present in the header wins
    fn text(&self, row: &StringRecord, names: &[&str]) -> String {
        names
            .iter()
            .find_map(|name| {
                self.0
                    .get(&name.to_lowercase())
                    .and_then(|&i| row.get(i))
            })
            .unwrap_or_default()
            .to_string()
    }

    fn amount(&self, row: &StringRecord, names: &[&str]) -> f64 {
        parse_amount(&self.text(row, names))
    }
}

/// Parse a numeric cell; separators are stripped and bad values read as 0
pub(crate) fn parse_amount(cell: &str) -> f64 {
    cell.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Read employee records from a CSV file
pub fn read_employees_csv<P: AsRef<Path>>(
    path: P,
    defaults: &RecordDefaults,
) -> Result<Vec<EmployeeRecord>> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        PayslipError::Csv(csv::Error::from(io::Error::new(
            e.kind(),
            format!("{}: {e}", path.as_ref().display()),
        )))
    })?;
    read_employees_from_reader(file, defaults)
}

/// Read employee records from any CSV source
///
/// Rows without a name are skipped. Zero totals are back-filled from the
/// components (no tax yet).
pub fn read_employees_from_reader<R: io::Read>(
    reader: R,
    defaults: &RecordDefaults,
) -> Result<Vec<EmployeeRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(PayslipError::EmptyInput(
            "CSV file is empty or missing header".to_string(),
        ));
    }
    let columns = Columns::new(&headers);

    let mut rows = 0;
    let mut employees = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        rows += 1;

        let name = columns.text(&row, NAME);
        if name.is_empty() {
            debug!("Skipping row {rows}: no employee name");
            continue;
        }

        let mut record = EmployeeRecord {
            month: columns.text(&row, MONTH),
            year: columns.text(&row, YEAR),
            name,
            designation: columns.text(&row, DESIGNATION),
            email: columns.text(&row, EMAIL),
            bank_account: columns.text(&row, BANK_ACCOUNT),
            date_of_joining: columns.text(&row, DATE_OF_JOINING),
            gender: columns.text(&row, GENDER),
            tax_id: columns.text(&row, TAX_ID),
            uan: columns.text(&row, UAN),
            pf_number: columns.text(&row, PF_NUMBER),

            standard_days: columns.text(&row, STANDARD_DAYS),
            payable_days: columns.text(&row, PAYABLE_DAYS),
            loss_of_pay_days: columns.text(&row, LOSS_OF_PAY_DAYS),

            basic_pay_rate: columns.amount(&row, BASIC_RATE),
            basic_pay_amount: columns.amount(&row, BASIC_AMOUNT),
            hra_rate: columns.amount(&row, HRA_RATE),
            hra_amount: columns.amount(&row, HRA_AMOUNT),
            other_allowance_rate: columns.amount(&row, OTHER_RATE),
            other_allowance_amount: columns.amount(&row, OTHER_AMOUNT),

            professional_tax: columns.amount(&row, PROFESSIONAL_TAX),
            provident_fund: columns.amount(&row, PROVIDENT_FUND),
            income_tax: columns.amount(&row, INCOME_TAX),

            gross_earnings: columns.amount(&row, GROSS_EARNINGS),
            total_deductions: columns.amount(&row, TOTAL_DEDUCTIONS),
            net_pay: columns.amount(&row, NET_PAY),
        };

        fill_naive_totals(&mut record);

        if record.month.is_empty() {
            record.month = defaults.month.clone();
        }
        if record.year.is_empty() {
            record.year = defaults.year.clone();
        }

        employees.push(record);
    }

    if rows == 0 {
        return Err(PayslipError::EmptyInput(
            "CSV file has a header but no data rows".to_string(),
        ));
    }
    if employees.is_empty() {
        warn!(
            "No rows with an employee name; headers found: {}",
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(employees)
}
