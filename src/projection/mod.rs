//! Monthly simulators for investment growth and indexed loan amortization

mod samples;
mod state;
mod growth;
mod amortization;

pub use samples::{write_samples_csv, PeriodSample, SampleLabel};
pub use state::{GrowthState, LoanState};
pub use growth::{CompoundGrowthSimulator, GrowthResult};
pub use amortization::{AmortizationResult, AmortizationRow, IndexedAmortizationSimulator};

/// Whole months simulated for a term in years
///
/// A fractional final month is dropped, the same way a `month <= years*12`
/// loop would stop.
pub fn simulated_months(term_years: f64) -> u32 {
    if term_years <= 0.0 {
        return 0;
    }
    (term_years * 12.0 + 1e-9).floor() as u32
}
