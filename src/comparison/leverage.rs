//! Borrow-to-invest versus investing the loan payments
//!
//! Scenario A borrows the principal, invests it as a lump sum, and services
//! the loan (indexation and balloon included). Scenario B invests the same
//! monthly amounts the loan would have cost, plus the balloon settlement at
//! the end. Both are measured as net profit over what was paid out.

use log::debug;
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::inputs::LeverageParams;
use crate::projection::{
    AmortizationResult, GrowthState, IndexedAmortizationSimulator, PeriodSample, SampleLabel,
};
use crate::rates::monthly_effective;

/// Differences smaller than this are reported as a tie
const NEUTRAL_BAND: f64 = 0.5;

/// Metrics of one investment scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Investment value at term end, before tax
    pub gross_value: f64,

    /// Gross amount invested
    pub invested: f64,

    /// Cash paid out: loan payments (A) or contributions (B)
    pub total_outlay: f64,

    pub fees_paid: f64,
    pub tax_paid: f64,

    /// `gross_value - tax_paid - total_outlay`
    pub net_profit: f64,
}

/// Strategy favoured by the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    Leverage,
    PeriodicInvesting,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeverageComparison {
    /// Lump-sum investment financed by the loan
    pub scenario_a: ScenarioOutcome,

    /// Loan payments invested monthly instead
    pub scenario_b: ScenarioOutcome,

    /// `scenario_a.net_profit - scenario_b.net_profit`; positive favours leverage
    pub recommended_diff: f64,

    pub favoured: Strategy,

    /// Month-one loan payment, the amount scenario B starts contributing
    pub first_payment: f64,

    /// Year-end samples: principal = scenario A's value, interest = scenario
    /// B's gain, payment = loan payments to date, balance = scenario B's value
    pub yearly_samples: Vec<PeriodSample>,
}

/// Runs both scenarios over one shared loan schedule
#[derive(Debug, Clone, Default)]
pub struct LeverageComparator {
    amortization: IndexedAmortizationSimulator,
}

impl LeverageComparator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            amortization: IndexedAmortizationSimulator::new(config),
        }
    }

    pub fn run(&self, params: &LeverageParams) -> Result<LeverageComparison> {
        let loan = self.amortization.run(&params.loan())?;

        let tax_rate = if params.apply_tax {
            params.tax_rate_pct / 100.0
        } else {
            0.0
        };
        let deposit_fee_rate = params.deposit_fee_pct / 100.0;
        let monthly_fee_rate = params.accumulation_fee_pct / 100.0 / 12.0;
        let annual_growth = 1.0 + params.invest_return_pct / 100.0;

        let scenario_a = lump_sum_outcome(params, &loan, annual_growth, deposit_fee_rate, monthly_fee_rate, tax_rate);
        let (scenario_b, yearly_samples) =
            periodic_outcome(params, &loan, annual_growth, deposit_fee_rate, monthly_fee_rate, tax_rate);

        let recommended_diff = scenario_a.net_profit - scenario_b.net_profit;
        let favoured = if recommended_diff > NEUTRAL_BAND {
            Strategy::Leverage
        } else if recommended_diff < -NEUTRAL_BAND {
            Strategy::PeriodicInvesting
        } else {
            Strategy::Neutral
        };

        debug!(
            "Leverage: A net {:.2}, B net {:.2}, diff {:.2} ({:?})",
            scenario_a.net_profit, scenario_b.net_profit, recommended_diff, favoured
        );

        Ok(LeverageComparison {
            scenario_a,
            scenario_b,
            recommended_diff,
            favoured,
            first_payment: loan.first_payment,
            yearly_samples,
        })
    }
}

/// Tax on the gain over what was invested; losses are untaxed
fn gains_tax(gross_value: f64, invested: f64, tax_rate: f64) -> f64 {
    let profit = gross_value - invested;
    if tax_rate > 0.0 && profit > 0.0 {
        profit * tax_rate
    } else {
        0.0
    }
}

/// Scenario A: annual compounding of the borrowed lump sum
fn lump_sum_outcome(
    params: &LeverageParams,
    loan: &AmortizationResult,
    annual_growth: f64,
    deposit_fee_rate: f64,
    monthly_fee_rate: f64,
    tax_rate: f64,
) -> ScenarioOutcome {
    let deposit_fee = params.principal * deposit_fee_rate;
    let net_invested = params.principal - deposit_fee;
    let grown = net_invested * annual_growth.powf(params.term_years);
    let fee_drag = (1.0 - monthly_fee_rate).powf(12.0 * params.term_years);
    let gross_value = grown * fee_drag;

    let tax_paid = gains_tax(gross_value, params.principal, tax_rate);
    let total_outlay = loan.grand_total_paid;

    ScenarioOutcome {
        gross_value,
        invested: params.principal,
        total_outlay,
        fees_paid: deposit_fee + (grown - gross_value),
        tax_paid,
        net_profit: gross_value - tax_paid - total_outlay,
    }
}

/// Scenario B: every nominal loan payment becomes a monthly contribution
fn periodic_outcome(
    params: &LeverageParams,
    loan: &AmortizationResult,
    annual_growth: f64,
    deposit_fee_rate: f64,
    monthly_fee_rate: f64,
    tax_rate: f64,
) -> (ScenarioOutcome, Vec<PeriodSample>) {
    let monthly_rate = monthly_effective(params.invest_return_pct);
    let mut state = GrowthState::new(0.0);
    let mut yearly_samples = Vec::with_capacity(loan.rows.len() / 12);
    let mut paid_to_bank = 0.0;

    for row in &loan.rows {
        state.step(row.payment, deposit_fee_rate, monthly_rate, monthly_fee_rate);
        paid_to_bank += row.payment;

        if row.month % 12 == 0 {
            let year = row.month / 12;
            yearly_samples.push(PeriodSample {
                label: SampleLabel::CalendarYear(params.start_year + year as i32),
                principal_component: params.principal
                    * (1.0 - deposit_fee_rate)
                    * annual_growth.powi(year as i32)
                    * (1.0 - monthly_fee_rate).powi(row.month as i32),
                interest_component: state.profit(),
                total_payment: paid_to_bank,
                balance: state.balance,
            });
        }
    }

    if loan.final_balloon_payment > 0.0 {
        state.deposit(loan.final_balloon_payment, deposit_fee_rate);
    }

    let gross_value = state.balance;
    let tax_paid = gains_tax(gross_value, state.total_deposited, tax_rate);

    let outcome = ScenarioOutcome {
        gross_value,
        invested: state.total_deposited,
        total_outlay: state.total_deposited,
        fees_paid: state.total_fees,
        tax_paid,
        net_profit: gross_value - tax_paid - state.total_deposited,
    };
    (outcome, yearly_samples)
}
