//! Two-stage totals derivation
//!
//! Stage 1 ([`fill_naive_totals`]) runs when a record is read and back-fills
//! missing totals without any tax. Stage 2 ([`derive`]) computes the tax from
//! the gross already on the record and recomputes deductions and net pay.
//! Gross earnings are never re-summed in stage 2.

use crate::model::{DerivedRecord, EmployeeRecord};
use crate::tax::monthly_income_tax;
use log::debug;

/// Stage 1: fill zero totals from the components, without tax
pub fn fill_naive_totals(record: &mut EmployeeRecord) {
    if record.gross_earnings == 0.0 {
        record.gross_earnings = record.component_earnings();
    }
    if record.total_deductions == 0.0 {
        record.total_deductions =
            record.professional_tax + record.provident_fund + record.income_tax;
    }
    if record.net_pay == 0.0 {
        record.net_pay = record.gross_earnings - record.total_deductions;
    }
}

/// Stage 2: compute income tax and finalize totals
pub fn derive(mut record: EmployeeRecord) -> DerivedRecord {
    if record.loss_of_pay_days.is_empty() {
        record.loss_of_pay_days = "0".to_string();
    }

    let gross_earnings = record.gross_earnings;
    let income_tax = monthly_income_tax(gross_earnings);
    let total_deductions = record.professional_tax + record.provident_fund + income_tax;
    let net_pay = gross_earnings - total_deductions;

    debug!(
        "Derived {}: gross {gross_earnings:.2}, tax {income_tax:.2}, deductions {total_deductions:.2}, net {net_pay:.2}",
        record.name
    );

    DerivedRecord::new(EmployeeRecord {
        income_tax,
        total_deductions,
        net_pay,
        ..record
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> EmployeeRecord {
        EmployeeRecord {
            name: "Vinay".to_string(),
            basic_pay_amount: 50_000.0,
            hra_amount: 20_000.0,
            other_allowance_amount: 10_000.0,
            professional_tax: 200.0,
            provident_fund: 1_800.0,
            ..Default::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.005,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_stage_one_fills_without_tax() {
        let mut record = sample();
        fill_naive_totals(&mut record);

        assert_eq!(record.gross_earnings, 80_000.0);
        assert_eq!(record.total_deductions, 2_000.0);
        assert_eq!(record.net_pay, 78_000.0);
    }

    #[test]
    fn test_stage_one_keeps_supplied_totals() {
        let mut record = EmployeeRecord {
            gross_earnings: 90_000.0,
            total_deductions: 3_000.0,
            net_pay: 77_000.0,
            ..sample()
        };
        fill_naive_totals(&mut record);

        assert_eq!(record.gross_earnings, 90_000.0);
        assert_eq!(record.total_deductions, 3_000.0);
        assert_eq!(record.net_pay, 77_000.0);
    }

    #[test]
    fn test_end_to_end_figures() {
        let mut record = sample();
        fill_naive_totals(&mut record);
        let derived = derive(record);

        assert_close(derived.gross_earnings(), 80_000.0);
        assert_close(derived.income_tax(), 8_708.33);
        assert_close(derived.total_deductions(), 10_708.33);
        assert_close(derived.net_pay(), 69_291.67);
        assert_eq!(derived.employee().net_pay, derived.net_pay());
    }

    #[test]
    fn test_trusts_supplied_gross() {
        // Gross on the record wins over the component sum
        let record = EmployeeRecord {
            gross_earnings: 20_000.0,
            ..sample()
        };
        let derived = derive(record);

        assert_eq!(derived.gross_earnings(), 20_000.0);
        assert_eq!(derived.income_tax(), 0.0);
        assert_eq!(derived.total_deductions(), 2_000.0);
        assert_eq!(derived.net_pay(), 18_000.0);
    }

    #[test]
    fn test_supplied_income_tax_is_replaced() {
        let record = EmployeeRecord {
            gross_earnings: 20_000.0,
            income_tax: 1_000.0,
            total_deductions: 3_000.0,
            ..sample()
        };
        let derived = derive(record);
        assert_eq!(derived.income_tax(), 0.0);
        assert_eq!(derived.total_deductions(), 2_000.0);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let mut record = sample();
        fill_naive_totals(&mut record);

        let once = derive(record);
        let twice = derive(once.clone().into_record());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_loss_of_pay_defaults_to_zero() {
        let derived = derive(sample());
        assert_eq!(derived.employee().loss_of_pay_days, "0");

        let record = EmployeeRecord {
            loss_of_pay_days: "2".to_string(),
            ..sample()
        };
        assert_eq!(derive(record).employee().loss_of_pay_days, "2");
    }

    #[test]
    fn test_negative_net_pay() {
        let record = EmployeeRecord {
            gross_earnings: 1_000.0,
            professional_tax: 200.0,
            provident_fund: 1_800.0,
            ..Default::default()
        };
        let derived = derive(record);
        assert_eq!(derived.net_pay(), -1_000.0);
    }
}
