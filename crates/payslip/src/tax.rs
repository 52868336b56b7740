//! Monthly income tax from annualized progressive slabs

/// (upper bound of the band, marginal rate), applied in order
const SLABS: [(f64, f64); 4] = [
    (250_000.0, 0.0),
    (500_000.0, 0.05),
    (1_000_000.0, 0.20),
    (f64::INFINITY, 0.30),
];

/// Monthly income tax for a monthly gross figure
///
/// The gross is projected over twelve months, taxed band by band and the
/// annual figure divided back by twelve. The result is not rounded.
/// Negative gross yields zero.
pub fn monthly_income_tax(monthly_gross: f64) -> f64 {
    let annual = monthly_gross * 12.0;

    let mut tax = 0.0;
    let mut lower = 0.0;
    for (upper, rate) in SLABS {
        if annual <= lower {
            break;
        }
        tax += (annual.min(upper) - lower) * rate;
        lower = upper;
    }

    tax / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_slab_boundaries() {
        assert_close(monthly_income_tax(250_000.0 / 12.0), 0.0);
        assert_close(monthly_income_tax(500_000.0 / 12.0), 12_500.0 / 12.0);
        assert_close(monthly_income_tax(1_000_000.0 / 12.0), 112_500.0 / 12.0);
    }

    #[test]
    fn test_inside_slabs() {
        // 960,000 a year: 12,500 + 20% of 460,000
        assert_close(monthly_income_tax(80_000.0), 104_500.0 / 12.0);
        // 300,000 a year: 5% of 50,000
        assert_close(monthly_income_tax(25_000.0), 2_500.0 / 12.0);
        // 1,200,000 a year: 112,500 + 30% of 200,000
        assert_close(monthly_income_tax(100_000.0), 172_500.0 / 12.0);
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(monthly_income_tax(0.0), 0.0);
        assert_eq!(monthly_income_tax(-5_000.0), 0.0);
    }

    #[test]
    fn test_non_decreasing_and_continuous() {
        let mut previous = monthly_income_tax(0.0);
        let mut gross = 0.0;
        while gross <= 200_000.0 {
            let tax = monthly_income_tax(gross);
            assert!(tax >= 0.0);
            assert!(tax >= previous, "tax dropped at gross {gross}");
            // A 50 step can move the monthly tax by at most 30% of it
            assert!(tax - previous <= 50.0 * 0.30 + 1e-9);
            previous = tax;
            gross += 50.0;
        }
    }
}
