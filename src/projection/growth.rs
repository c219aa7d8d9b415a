//! Compound-interest investment growth with fees and optional gains tax

use log::debug;
use serde::Serialize;

use super::samples::{PeriodSample, SampleLabel};
use super::simulated_months;
use super::state::GrowthState;
use crate::error::{require_valid_term, Result};
use crate::inputs::GrowthParams;
use crate::rates::monthly_effective;

/// Outcome of a growth projection
#[derive(Debug, Clone, Serialize)]
pub struct GrowthResult {
    /// Balance after fees and, when enabled, gains tax
    pub final_balance: f64,

    /// Gross deposits, opening principal included
    pub total_deposited: f64,

    /// Deposit fees plus accumulation fees
    pub total_fees_paid: f64,

    pub tax_paid: f64,

    /// One sample at the end of every projection year
    pub yearly_samples: Vec<PeriodSample>,
}

impl GrowthResult {
    /// Final balance above total deposits
    pub fn net_profit(&self) -> f64 {
        self.final_balance - self.total_deposited
    }
}

/// Monthly compounding of a deposit plan
///
/// Each month: deposit net of the deposit fee, grow at the geometric monthly
/// equivalent of the annual return, then charge the accumulation fee on the
/// grown balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundGrowthSimulator;

impl CompoundGrowthSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, params: &GrowthParams) -> Result<GrowthResult> {
        require_valid_term(params.term_years)?;

        let months = simulated_months(params.term_years);
        let monthly_rate = monthly_effective(params.annual_rate_pct);
        let monthly_fee_rate = params.accumulation_fee_pct / 100.0 / 12.0;
        let deposit_fee_rate = params.deposit_fee_pct / 100.0;

        debug!(
            "Growth run: {} months, monthly rate {:.6}, fee rate {:.6}",
            months, monthly_rate, monthly_fee_rate
        );

        let mut state = GrowthState::new(params.principal);
        let mut yearly_samples = Vec::with_capacity((months / 12) as usize);
        let mut deposited_at_year_start = state.total_deposited;

        for _ in 0..months {
            state.step(
                params.monthly_deposit,
                deposit_fee_rate,
                monthly_rate,
                monthly_fee_rate,
            );

            if state.month % 12 == 0 {
                let year = (state.month / 12) as i32;
                yearly_samples.push(PeriodSample {
                    label: SampleLabel::CalendarYear(params.start_year + year),
                    principal_component: state.total_deposited,
                    interest_component: state.profit(),
                    total_payment: state.total_deposited - deposited_at_year_start,
                    balance: state.balance,
                });
                deposited_at_year_start = state.total_deposited;
            }
        }

        let mut tax_paid = 0.0;
        let profit = state.profit();
        if params.apply_tax && profit > 0.0 {
            tax_paid = profit * (params.tax_rate_pct / 100.0);
            state.balance -= tax_paid;
        }

        debug!(
            "Growth result: balance {:.2}, deposited {:.2}, fees {:.2}, tax {:.2}",
            state.balance, state.total_deposited, state.total_fees, tax_paid
        );

        Ok(GrowthResult {
            final_balance: state.balance,
            total_deposited: state.total_deposited,
            total_fees_paid: state.total_fees,
            tax_paid,
            yearly_samples,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn params() -> GrowthParams {
        GrowthParams {
            principal: 10_000.0,
            monthly_deposit: 1_000.0,
            annual_rate_pct: 6.0,
            term_years: 20.0,
            start_year: 2026,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_rate_deposits_only() {
        let result = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                monthly_deposit: 1_000.0,
                term_years: 1.0,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(result.final_balance, 12_000.0);
        assert_eq!(result.total_deposited, 12_000.0);
        assert_eq!(result.total_fees_paid, 0.0);
        assert_eq!(result.yearly_samples.len(), 1);
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                monthly_deposit: 1_000.0,
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveTerm { years: 0.0 });
    }

    #[test]
    fn test_overlong_term_rejected_before_allocating() {
        let err = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                monthly_deposit: 1.0,
                term_years: 1e9,
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ValidationError::TermTooLong { years, .. } if years == 1e9));

        let longest = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                monthly_deposit: 1.0,
                term_years: crate::error::MAX_TERM_YEARS,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(longest.total_deposited, 1_200.0);
    }

    #[test]
    fn test_lump_sum_matches_annual_compounding() {
        let result = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                principal: 10_000.0,
                annual_rate_pct: 5.0,
                term_years: 10.0,
                ..Default::default()
            })
            .unwrap();

        assert_relative_eq!(
            result.final_balance,
            10_000.0 * 1.05_f64.powi(10),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_yearly_samples_labelled_by_calendar_year() {
        let result = CompoundGrowthSimulator::new().run(&params()).unwrap();

        assert_eq!(result.yearly_samples.len(), 20);
        assert_eq!(result.yearly_samples[0].label, SampleLabel::CalendarYear(2027));
        assert_eq!(result.yearly_samples[19].label, SampleLabel::CalendarYear(2046));
        // Opening principal counts as deposited but not as a deposit of year one
        assert_eq!(result.yearly_samples[0].total_payment, 12_000.0);
        assert_eq!(result.yearly_samples[1].total_payment, 12_000.0);
        assert_eq!(result.yearly_samples[0].principal_component, 22_000.0);

        let last = result.yearly_samples.last().unwrap();
        assert_eq!(last.balance, result.final_balance);
    }

    #[test]
    fn test_fees_reduce_balance_and_are_reported() {
        let plain = CompoundGrowthSimulator::new().run(&params()).unwrap();
        let with_fees = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                accumulation_fee_pct: 0.5,
                deposit_fee_pct: 1.0,
                ..params()
            })
            .unwrap();

        assert!(with_fees.final_balance < plain.final_balance);
        assert!(with_fees.total_fees_paid > 0.0);
        // Deposit fees alone: 1% of 240 deposits of 1000
        assert!(with_fees.total_fees_paid > 2_400.0);
        assert_eq!(with_fees.total_deposited, plain.total_deposited);
    }

    #[test]
    fn test_tax_on_profit() {
        let untaxed = CompoundGrowthSimulator::new().run(&params()).unwrap();
        let taxed = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                apply_tax: true,
                ..params()
            })
            .unwrap();

        let profit = untaxed.final_balance - untaxed.total_deposited;
        assert_abs_diff_eq!(taxed.tax_paid, profit * 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(
            taxed.final_balance,
            untaxed.final_balance - profit * 0.25,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(taxed.net_profit(), profit * 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_no_tax_on_loss() {
        let result = CompoundGrowthSimulator::new()
            .run(&GrowthParams {
                annual_rate_pct: -5.0,
                apply_tax: true,
                ..params()
            })
            .unwrap();

        assert_eq!(result.tax_paid, 0.0);
        assert!(result.final_balance < result.total_deposited);
    }
}
