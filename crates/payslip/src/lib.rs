//! Payslip - derivation and fixed-layout rendering
//!
//! This crate provides:
//! - Employee records and the two-stage totals derivation
//! - Monthly income tax from annualized slabs
//! - A declarative single-page layout (draw commands grouped by band)
//! - Rendering of the layout to PDF bytes and files
//! - CSV record source, company configuration and batch generation
//!
//! # Example
//!
//! ```
//! use payslip::{derive, render, EmployeeRecord, PayslipConfig};
//!
//! let mut record = EmployeeRecord {
//!     name: "Asha".to_string(),
//!     month: "Dec".to_string(),
//!     year: "2024".to_string(),
//!     basic_pay_amount: 50_000.0,
//!     ..Default::default()
//! };
//! payslip::fill_naive_totals(&mut record);
//!
//! let derived = derive(record);
//! let bytes = render(&derived, &PayslipConfig::default())?;
//! assert!(bytes.starts_with(b"%PDF"));
//! # Ok::<(), payslip::PayslipError>(())
//! ```

mod assemble;
mod batch;
mod config;
pub mod layout;
mod model;
mod reader;
mod render;
mod tax;

pub use assemble::{derive, fill_naive_totals};
pub use batch::{generate_all, BatchReport, EmployeeFailure, Mode};
pub use config::{CompanyProfile, PayslipConfig, RecordDefaults};
pub use layout::{layout_payslip, Band, Layout};
pub use model::{DerivedRecord, EmployeeRecord};
pub use reader::{read_employees_csv, read_employees_from_reader};
pub use render::{output_path, render, render_layout, write_payslip};
pub use tax::monthly_income_tax;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, rendering or writing payslips
#[derive(Debug, Error)]
pub enum PayslipError {
    #[error("Failed to write payslip for {employee} to {}: {source}", .path.display())]
    Write {
        employee: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No employee data: {0}")]
    EmptyInput(String),

    #[error("Invalid logo {}: {reason}", .path.display())]
    Logo { path: PathBuf, reason: String },
}

/// Result type for payslip operations
pub type Result<T> = std::result::Result<T, PayslipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_names_employee() {
        let err = PayslipError::Write {
            employee: "Asha".to_string(),
            path: PathBuf::from("/missing/Asha_Dec_2024.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let message = err.to_string();
        assert!(message.contains("Asha"));
        assert!(message.contains("/missing/Asha_Dec_2024.pdf"));
    }
}
