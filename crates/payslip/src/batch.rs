//! Batch generation over many employees

use crate::assemble::derive;
use crate::config::PayslipConfig;
use crate::model::EmployeeRecord;
use crate::render::write_payslip;
use crate::{PayslipError, Result};
use log::warn;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// How records are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Sequential,
    /// One rayon task per employee
    Parallel,
}

/// A payslip that could not be produced
#[derive(Debug)]
pub struct EmployeeFailure {
    pub employee: String,
    pub error: PayslipError,
}

/// Outcome of a batch run, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub failures: Vec<EmployeeFailure>,
}

impl BatchReport {
    /// Number of records processed
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn generate_one(
    record: EmployeeRecord,
    config: &PayslipConfig,
    out_dir: &Path,
) -> (String, Result<PathBuf>) {
    let employee = record.name.clone();
    let result = write_payslip(&derive(record), config, out_dir);
    (employee, result)
}

/// Derive and write a payslip for every record
///
/// A failure for one employee is logged and recorded; the remaining
/// employees are still processed.
pub fn generate_all(
    records: Vec<EmployeeRecord>,
    config: &PayslipConfig,
    out_dir: &Path,
    mode: Mode,
) -> BatchReport {
    let outcomes: Vec<(String, Result<PathBuf>)> = match mode {
        Mode::Sequential => records
            .into_iter()
            .map(|record| generate_one(record, config, out_dir))
            .collect(),
        Mode::Parallel => records
            .into_par_iter()
            .map(|record| generate_one(record, config, out_dir))
            .collect(),
    };

    let mut report = BatchReport::default();
    for (employee, result) in outcomes {
        match result {
            Ok(path) => report.generated.push(path),
            Err(error) => {
                warn!("Failed to generate payslip for {employee}: {error}");
                report.failures.push(EmployeeFailure { employee, error });
            }
        }
    }
    report
}
