//! Employee record types

/// One employee's payroll row as produced by the record source
///
/// Identity, period and attendance fields are opaque strings. Monetary
/// fields are plain amounts in a single implicit currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRecord {
    pub month: String,
    pub year: String,

    pub name: String,
    pub designation: String,
    pub email: String,
    pub bank_account: String,
    pub date_of_joining: String,
    pub gender: String,
    /// Tax identifier (PAN)
    pub tax_id: String,
    /// Universal account number
    pub uan: String,
    pub pf_number: String,

    pub standard_days: String,
    pub payable_days: String,
    pub loss_of_pay_days: String,

    /// Display-only rate figures; the amounts are what is credited
    pub basic_pay_rate: f64,
    pub basic_pay_amount: f64,
    pub hra_rate: f64,
    pub hra_amount: f64,
    pub other_allowance_rate: f64,
    pub other_allowance_amount: f64,

    pub professional_tax: f64,
    pub provident_fund: f64,
    pub income_tax: f64,

    pub gross_earnings: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
}

impl EmployeeRecord {
    /// Sum of the three credited earning components
    pub fn component_earnings(&self) -> f64 {
        self.basic_pay_amount + self.hra_amount + self.other_allowance_amount
    }
}

/// A record with tax, totals and net pay finalized, ready for layout
///
/// Only [`crate::derive`] builds one, so the totals on the wrapped record
/// are always the derived ones.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    employee: EmployeeRecord,
}

impl DerivedRecord {
    pub(crate) fn new(employee: EmployeeRecord) -> Self {
        Self { employee }
    }

    pub fn employee(&self) -> &EmployeeRecord {
        &self.employee
    }

    pub fn income_tax(&self) -> f64 {
        self.employee.income_tax
    }

    pub fn gross_earnings(&self) -> f64 {
        self.employee.gross_earnings
    }

    /// Professional tax + provident fund + income tax
    pub fn total_deductions(&self) -> f64 {
        self.employee.total_deductions
    }

    /// Gross earnings - total deductions; may be negative
    pub fn net_pay(&self) -> f64 {
        self.employee.net_pay
    }

    /// Unwrap the finalized record
    pub fn into_record(self) -> EmployeeRecord {
        self.employee
    }
}
