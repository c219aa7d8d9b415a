//! Fixed monthly payment for an amortizing balance

use super::convert::{monthly_nominal, MONTHS_PER_YEAR};

/// Number of monthly periods in a term, kept fractional for the payment formula
pub fn term_months(term_years: f64) -> f64 {
    term_years * MONTHS_PER_YEAR
}

/// Monthly payment (PMT) that fully repays `principal` over `term_years`
///
/// Interest accrues at the nominal annual rate divided by 12. A zero rate
/// collapses to straight-line repayment. Returns 0 for a non-positive
/// principal or term; callers that cannot accept that validate upstream.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_years: f64) -> f64 {
    if term_years <= 0.0 || principal <= 0.0 {
        return 0.0;
    }

    let months = term_months(term_years);
    let monthly_rate = monthly_nominal(annual_rate_pct);

    if monthly_rate == 0.0 {
        principal / months
    } else {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(100_000.0, 0.0, 10.0);
        assert_abs_diff_eq!(pmt, 833.333_333_333, epsilon = 1e-6);
        assert_abs_diff_eq!(pmt * 120.0, 100_000.0, epsilon = 1e-6);

        for (principal, years) in [(1.0, 1.0), (250_000.0, 25.0), (12_345.67, 3.5)] {
            assert_relative_eq!(
                monthly_payment(principal, 0.0, years),
                principal / (years * 12.0),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_standard_mortgage_payment() {
        // 250k at 5% over 30 years
        let pmt = monthly_payment(250_000.0, 5.0, 30.0);
        assert_abs_diff_eq!(pmt, 1342.05, epsilon = 0.01);
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        assert_eq!(monthly_payment(100_000.0, 5.0, 0.0), 0.0);
        assert_eq!(monthly_payment(100_000.0, 5.0, -1.0), 0.0);
        assert_eq!(monthly_payment(0.0, 5.0, 10.0), 0.0);
        assert_eq!(monthly_payment(-10.0, 5.0, 10.0), 0.0);
    }

    #[test]
    fn test_higher_rate_higher_payment() {
        let low = monthly_payment(100_000.0, 3.0, 20.0);
        let high = monthly_payment(100_000.0, 4.0, 20.0);
        assert!(high > low);
    }
}
