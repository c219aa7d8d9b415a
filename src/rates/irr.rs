//! Internal rate of return for monthly cash flow streams
//!
//! Used to express the all-in cost of an indexed loan as one annual rate.

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Periodic rate bounds searched by the solver
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Annualised IRR of a periodic cash flow stream
///
/// Newton-Raphson on the periodic rate, falling back to bisection when the
/// derivative vanishes or the iteration stalls. The periodic rate is
/// annualised geometrically: `(1 + r)^periods_per_year - 1`.
///
/// Returns `None` for an empty stream or one without a sign change.
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let annualise = |periodic: f64| (1.0 + periodic).powi(periods_per_year as i32) - 1.0;

    let mut rate = 0.05 / periods_per_year as f64;
    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = (rate - npv / slope).clamp(RATE_FLOOR, RATE_CEILING);
        if (next - rate).abs() < TOLERANCE {
            return Some(annualise(next));
        }
        rate = next;
    }

    bisect(cashflows).map(annualise)
}

/// Effective annual cost of borrowing from the borrower's cash flows
///
/// `cashflows[0]` is the amount received, later entries the (negative)
/// payments made each month.
pub fn effective_annual_cost(cashflows: &[f64]) -> Option<f64> {
    calculate_irr(cashflows, 12)
}

fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut slope = 0.0;
    let growth = 1.0 + rate;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / growth.powi(t as i32);
        if t > 0 {
            slope -= t as f64 * cf / growth.powi(t as i32 + 1);
        }
    }

    (npv, slope)
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut npv_low = npv(cashflows, low);

    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = 0.5 * (low + high);
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < TOLERANCE || 0.5 * (high - low) < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}
