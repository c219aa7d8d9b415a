//! Month-by-month amortization of an indexed loan with a balloon slice
//!
//! The principal splits into an amortized slice, repaid through a fixed real
//! annuity payment, and a balloon slice that only pays interest until it is
//! settled in full at term end. With CPI linkage every component is scaled by
//! the index accumulated to date, and the balloon is settled at its indexed
//! value.

use log::{debug, warn};
use serde::Serialize;

use super::samples::{PeriodSample, SampleLabel};
use super::simulated_months;
use super::state::LoanState;
use crate::config::SimulationConfig;
use crate::error::{require_valid_term, Result, ValidationError};
use crate::inputs::LoanParams;
use crate::rates::{effective_annual_cost, monthly_effective, monthly_nominal, monthly_payment};

/// One month of the repayment schedule
#[derive(Debug, Clone, Serialize)]
pub struct AmortizationRow {
    pub month: u32,

    /// Accumulated CPI factor for this month
    pub index_factor: f64,

    /// Principal repaid in real (non-indexed) terms
    pub real_principal: f64,

    /// Principal repaid in nominal terms
    pub principal: f64,

    /// Nominal interest on the amortized slice
    pub interest_amortized: f64,

    /// Nominal interest on the balloon slice
    pub interest_balloon: f64,

    /// Total nominal payment for the month
    pub payment: f64,

    /// Real balance of the amortized slice after the payment
    pub real_balance: f64,

    /// Nominal outstanding principal (amortized + balloon) after the payment
    pub nominal_balance: f64,
}

impl AmortizationRow {
    pub fn interest(&self) -> f64 {
        self.interest_amortized + self.interest_balloon
    }
}

/// Outcome of an indexed amortization run
#[derive(Debug, Clone, Serialize)]
pub struct AmortizationResult {
    pub total_principal: f64,
    pub amortized_principal: f64,
    pub balloon_principal: f64,

    /// Real monthly annuity payment on the amortized slice
    pub base_payment: f64,

    /// Nominal payment of month one
    pub first_payment: f64,

    /// Nominal monthly payments, balloon settlement excluded
    pub sum_of_monthly_payments: f64,

    /// Balloon principal settled at term end, indexed
    pub final_balloon_payment: f64,

    /// Monthly payments plus the balloon settlement
    pub grand_total_paid: f64,

    /// Nominal interest paid over the term
    pub total_interest: f64,

    /// Everything paid beyond the borrowed principal: interest plus indexation
    pub total_interest_and_indexation: f64,

    pub final_index_factor: f64,

    /// Real balance of the amortized slice left after the last payment (≈0)
    pub residual_real_balance: f64,

    /// Annualised IRR of the borrower's cash flows
    pub effective_annual_cost: Option<f64>,

    pub rows: Vec<AmortizationRow>,

    /// Charting series; ends with the balloon settlement when there is one
    pub series: Vec<PeriodSample>,
}

impl AmortizationResult {
    /// Borrower's cash flows: principal received, then every month's outlay
    /// with the balloon settlement added to the last month
    pub fn borrower_cashflows(&self) -> Vec<f64> {
        let mut cashflows = Vec::with_capacity(self.rows.len() + 1);
        cashflows.push(self.total_principal);
        cashflows.extend(self.rows.iter().map(|row| -row.payment));
        if !self.rows.is_empty() {
            if let Some(last) = cashflows.last_mut() {
                *last -= self.final_balloon_payment;
            }
        }
        cashflows
    }

    /// Real principal repaid over the schedule
    pub fn real_principal_repaid(&self) -> f64 {
        self.rows.iter().map(|row| row.real_principal).sum()
    }
}

/// Amortization engine for annuity loans with CPI linkage and a balloon
#[derive(Debug, Clone, Default)]
pub struct IndexedAmortizationSimulator {
    config: SimulationConfig,
}

impl IndexedAmortizationSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, params: &LoanParams) -> Result<AmortizationResult> {
        validate(params)?;

        let months = simulated_months(params.term_years);
        let amortized_principal = params.amortized_portion();
        let base_payment = monthly_payment(
            amortized_principal,
            params.annual_rate_pct,
            params.term_years,
        );
        let monthly_rate = monthly_nominal(params.annual_rate_pct);
        let cpi_monthly_rate = if params.apply_indexation {
            monthly_effective(params.annual_inflation_pct)
        } else {
            0.0
        };

        debug!(
            "Loan run: {} months, amortized {:.2}, balloon {:.2}, base payment {:.4}, cpi {:.6}",
            months, amortized_principal, params.balloon_principal, base_payment, cpi_monthly_rate
        );

        let mut state = LoanState::new(amortized_principal, params.balloon_principal);
        let mut rows = Vec::with_capacity(months as usize);
        let mut series = Vec::new();
        let sample_monthly = months <= self.config.monthly_sample_threshold_months;

        for _ in 0..months {
            state.advance_month(cpi_monthly_rate);
            let row = calculate_month(&mut state, base_payment, monthly_rate);

            if sample_monthly || row.month % 12 == 0 {
                let label = if sample_monthly {
                    SampleLabel::Month(row.month)
                } else {
                    SampleLabel::YearsElapsed(row.month as f64 / 12.0)
                };
                series.push(PeriodSample {
                    label,
                    principal_component: row.principal,
                    interest_component: row.interest(),
                    total_payment: row.payment,
                    balance: row.nominal_balance,
                });
            }

            rows.push(row);
        }

        let final_balloon_payment = state.indexed_balloon();
        if final_balloon_payment > 0.0 {
            series.push(PeriodSample {
                label: SampleLabel::BalloonSettlement,
                principal_component: final_balloon_payment,
                interest_component: 0.0,
                total_payment: final_balloon_payment,
                balance: 0.0,
            });
        }

        let grand_total_paid = state.total_paid + final_balloon_payment;
        let first_payment = rows.first().map(|row| row.payment).unwrap_or(0.0);

        let mut result = AmortizationResult {
            total_principal: params.total_principal,
            amortized_principal,
            balloon_principal: params.balloon_principal,
            base_payment,
            first_payment,
            sum_of_monthly_payments: state.total_paid,
            final_balloon_payment,
            grand_total_paid,
            total_interest: state.total_interest,
            total_interest_and_indexation: grand_total_paid - params.total_principal,
            final_index_factor: state.index_factor,
            residual_real_balance: state.real_balance,
            effective_annual_cost: None,
            rows,
            series,
        };
        result.effective_annual_cost = effective_annual_cost(&result.borrower_cashflows());

        debug!(
            "Loan result: first payment {:.2}, total paid {:.2}, balloon {:.2}, residual {:.6}",
            result.first_payment,
            result.grand_total_paid,
            result.final_balloon_payment,
            result.residual_real_balance
        );

        Ok(result)
    }
}

/// Full validation before any state exists
fn validate(params: &LoanParams) -> Result<()> {
    if params.balloon_principal > params.total_principal {
        warn!(
            "Rejected loan: balloon {} exceeds principal {}",
            params.balloon_principal, params.total_principal
        );
        return Err(ValidationError::BalloonExceedsPrincipal {
            balloon: params.balloon_principal,
            principal: params.total_principal,
        });
    }
    require_valid_term(params.term_years)
}

/// Compute one month's payment; state must already be advanced
///
/// Interest and principal are computed on the real track, converted to
/// nominal with the current index factor, and only the real principal
/// reduces the balance.
fn calculate_month(state: &mut LoanState, base_payment: f64, monthly_rate: f64) -> AmortizationRow {
    let interest_amortized = state.real_balance * monthly_rate;
    let interest_balloon = state.balloon_balance * monthly_rate;
    let real_principal = base_payment - interest_amortized;

    let factor = state.index_factor;
    let principal = real_principal * factor;
    let nominal_interest_amortized = interest_amortized * factor;
    let nominal_interest_balloon = interest_balloon * factor;

    let interest = nominal_interest_amortized + nominal_interest_balloon;
    let payment = interest + principal;

    state.apply_payment(real_principal, interest, payment);

    AmortizationRow {
        month: state.month,
        index_factor: factor,
        real_principal,
        principal,
        interest_amortized: nominal_interest_amortized,
        interest_balloon: nominal_interest_balloon,
        payment,
        real_balance: state.real_balance,
        nominal_balance: state.nominal_outstanding(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn mortgage() -> LoanParams {
        LoanParams {
            total_principal: 1_000_000.0,
            annual_rate_pct: 4.5,
            term_years: 25.0,
            apply_indexation: true,
            annual_inflation_pct: 2.5,
            balloon_principal: 250_000.0,
        }
    }

    fn run(params: &LoanParams) -> AmortizationResult {
        IndexedAmortizationSimulator::default().run(params).unwrap()
    }

    #[test]
    fn test_balloon_above_principal_rejected() {
        let params = LoanParams {
            balloon_principal: 1_000_001.0,
            ..mortgage()
        };
        let err = IndexedAmortizationSimulator::default().run(&params).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BalloonExceedsPrincipal {
                balloon: 1_000_001.0,
                principal: 1_000_000.0
            }
        );
    }

    #[test]
    fn test_zero_term_rejected() {
        let params = LoanParams {
            term_years: 0.0,
            ..mortgage()
        };
        assert!(matches!(
            IndexedAmortizationSimulator::default().run(&params),
            Err(ValidationError::NonPositiveTerm { .. })
        ));
    }

    #[test]
    fn test_overlong_term_rejected() {
        let params = LoanParams {
            term_years: 1e9,
            ..mortgage()
        };
        assert!(matches!(
            IndexedAmortizationSimulator::default().run(&params),
            Err(ValidationError::TermTooLong { .. })
        ));
    }

    #[test]
    fn test_fractional_month_term_leaves_residual() {
        // 1.05 years prices the annuity over 12.6 months but only 12 are run
        let params = LoanParams {
            total_principal: 12_600.0,
            term_years: 1.05,
            ..Default::default()
        };
        let result = run(&params);

        assert_eq!(result.rows.len(), 12);
        assert_abs_diff_eq!(result.base_payment, 1_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.real_principal_repaid(), 12_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.residual_real_balance, 600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_real_principal_sums_to_amortized_slice() {
        for (rate, inflation, indexed) in [(0.0, 0.0, false), (4.5, 2.5, true), (7.0, 6.0, true), (3.0, 3.0, false)] {
            let params = LoanParams {
                annual_rate_pct: rate,
                annual_inflation_pct: inflation,
                apply_indexation: indexed,
                ..mortgage()
            };
            let result = run(&params);

            assert_relative_eq!(
                result.real_principal_repaid(),
                params.total_principal - params.balloon_principal,
                max_relative = 1e-9
            );
            assert_abs_diff_eq!(result.residual_real_balance, 0.0, epsilon = 1e-4);
            assert_eq!(
                result.amortized_principal + result.balloon_principal,
                result.total_principal
            );
        }
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let result = run(&LoanParams {
            total_principal: 120_000.0,
            term_years: 10.0,
            ..Default::default()
        });

        assert_abs_diff_eq!(result.base_payment, 1_000.0, epsilon = 1e-9);
        assert_eq!(result.total_interest, 0.0);
        assert!(result.rows.iter().all(|row| row.interest() == 0.0));
        assert_abs_diff_eq!(result.grand_total_paid, 120_000.0, epsilon = 1e-6);
        assert_eq!(result.final_balloon_payment, 0.0);
    }

    #[test]
    fn test_unindexed_totals() {
        let result = run(&LoanParams {
            total_principal: 200_000.0,
            annual_rate_pct: 5.0,
            term_years: 30.0,
            ..Default::default()
        });

        let pmt = monthly_payment(200_000.0, 5.0, 30.0);
        assert_abs_diff_eq!(result.first_payment, pmt, epsilon = 1e-9);
        assert_abs_diff_eq!(result.grand_total_paid, pmt * 360.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            result.total_interest,
            result.total_interest_and_indexation,
            epsilon = 1e-6
        );
        assert_eq!(result.final_index_factor, 1.0);

        // 5% nominal monthly accrual annualises geometrically
        let cost = result.effective_annual_cost.unwrap();
        assert_abs_diff_eq!(cost, (1.0 + 0.05 / 12.0_f64).powi(12) - 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_indexation_disabled_ignores_inflation() {
        let indexed_off = run(&LoanParams {
            apply_indexation: false,
            ..mortgage()
        });
        let zero_inflation = run(&LoanParams {
            annual_inflation_pct: 0.0,
            ..mortgage()
        });
        assert_eq!(indexed_off.grand_total_paid, zero_inflation.grand_total_paid);
    }

    #[test]
    fn test_balloon_interest_only_and_indexed_settlement() {
        let params = mortgage();
        let result = run(&params);

        let monthly_rate = monthly_nominal(params.annual_rate_pct);
        let first = &result.rows[0];
        assert_relative_eq!(
            first.interest_balloon,
            params.balloon_principal * monthly_rate * first.index_factor,
            max_relative = 1e-12
        );

        // Index after 300 months of 2.5% effective inflation
        assert_relative_eq!(result.final_index_factor, 1.025_f64.powi(25), max_relative = 1e-9);
        assert_relative_eq!(
            result.final_balloon_payment,
            params.balloon_principal * result.final_index_factor,
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(
            result.grand_total_paid,
            result.sum_of_monthly_payments + result.final_balloon_payment,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_index_factor_non_decreasing() {
        let result = run(&mortgage());
        assert!(result
            .rows
            .windows(2)
            .all(|pair| pair[1].index_factor >= pair[0].index_factor));
        assert!(result.rows[0].index_factor > 1.0);
    }

    #[test]
    fn test_indexed_payments_grow() {
        let result = run(&mortgage());
        let first = result.rows.first().unwrap().payment;
        let last = result.rows.last().unwrap().payment;
        assert!(last > first);
        assert!(result.total_interest_and_indexation > result.total_interest);
    }

    #[test]
    fn test_long_loan_sampled_yearly_with_balloon() {
        let result = run(&mortgage());

        assert_eq!(result.series.len(), 25 + 1);
        assert_eq!(result.series[0].label, SampleLabel::YearsElapsed(1.0));
        assert_eq!(result.series[24].label, SampleLabel::YearsElapsed(25.0));
        let settlement = result.series.last().unwrap();
        assert_eq!(settlement.label, SampleLabel::BalloonSettlement);
        assert_eq!(settlement.principal_component, result.final_balloon_payment);
        assert_eq!(settlement.interest_component, 0.0);
    }

    #[test]
    fn test_short_loan_sampled_monthly() {
        let result = run(&LoanParams {
            total_principal: 30_000.0,
            annual_rate_pct: 6.0,
            term_years: 3.0,
            ..Default::default()
        });

        assert_eq!(result.series.len(), 36);
        assert_eq!(result.series[0].label, SampleLabel::Month(1));
        assert_eq!(result.series[35].label, SampleLabel::Month(36));
        assert_abs_diff_eq!(result.series[35].balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_full_balloon_pays_interest_only() {
        let result = run(&LoanParams {
            total_principal: 100_000.0,
            annual_rate_pct: 6.0,
            term_years: 5.0,
            balloon_principal: 100_000.0,
            ..Default::default()
        });

        assert_eq!(result.base_payment, 0.0);
        assert_abs_diff_eq!(result.first_payment, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.grand_total_paid, 100_000.0 + 500.0 * 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_borrower_cashflows_shape() {
        let result = run(&mortgage());
        let cashflows = result.borrower_cashflows();

        assert_eq!(cashflows.len(), result.rows.len() + 1);
        assert_eq!(cashflows[0], 1_000_000.0);
        let last_row = result.rows.last().unwrap();
        assert_relative_eq!(
            *cashflows.last().unwrap(),
            -(last_row.payment + result.final_balloon_payment),
            max_relative = 1e-12
        );
    }
}
