//! Annual to monthly rate conversions
//!
//! Two conventions live side by side and are never interchangeable:
//! - loan interest accrues at the nominal annual rate divided by 12
//! - investment growth and inflation indexation compound geometrically

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Geometric monthly rate equivalent to an effective annual percentage
///
/// `(1 + annual_pct/100)^(1/12) - 1`
pub fn monthly_effective(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / MONTHS_PER_YEAR) - 1.0
}

/// Simple monthly rate from a nominal annual percentage
///
/// `annual_pct / 100 / 12`
pub fn monthly_nominal(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / MONTHS_PER_YEAR
}
