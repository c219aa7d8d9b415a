//! Consolidating existing loans into one new loan
//!
//! Each existing loan is valued as an annuity over its remaining term; the
//! new loan as an annuity over its own term plus the setup cost. The single
//! loan, rate-difference-only question is the one-entry case of the same model.

use log::{debug, warn};
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::{Result, ValidationError};
use crate::inputs::{LoanEntry, NewLoan, RefinanceParams};
use crate::rates::monthly_payment;

/// Outcome category, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefinanceVerdict {
    /// Lower monthly payment and lower total cost
    BothImprove,
    /// Lower monthly payment, but more paid overall
    MonthlyBetterCostlier,
    /// Less paid overall, but a higher monthly payment
    CheaperHigherMonthly,
    NotWorthwhile,
}

impl RefinanceVerdict {
    pub fn classify(monthly_saving: f64, total_saving: f64) -> Self {
        if monthly_saving > 0.0 && total_saving > 0.0 {
            RefinanceVerdict::BothImprove
        } else if monthly_saving > 0.0 {
            RefinanceVerdict::MonthlyBetterCostlier
        } else if total_saving > 0.0 {
            RefinanceVerdict::CheaperHigherMonthly
        } else {
            RefinanceVerdict::NotWorthwhile
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RefinanceVerdict::BothImprove => "worthwhile: lower monthly payment and lower total cost",
            RefinanceVerdict::MonthlyBetterCostlier => {
                "lower monthly payment, but higher total cost over the term"
            }
            RefinanceVerdict::CheaperHigherMonthly => {
                "lower total cost, but a higher monthly payment"
            }
            RefinanceVerdict::NotWorthwhile => "not worthwhile",
        }
    }
}

/// Existing loans against the consolidated offer
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    /// Sum of the existing loans' monthly payments
    pub old_total_monthly: f64,

    /// Sum of the existing loans' remaining payments
    pub old_total_cost: f64,

    pub new_monthly: f64,

    /// Remaining payments on the new loan plus its setup cost
    pub new_total_cost: f64,

    pub monthly_saving: f64,
    pub total_saving: f64,
    pub verdict: RefinanceVerdict,

    /// Existing entries with a positive balance and remaining term
    pub qualifying_loans: usize,
    pub skipped_loans: usize,

    /// Months of monthly saving needed to recover the setup cost
    pub break_even_months: Option<f64>,

    /// Break-even beyond the configured horizon
    pub borderline: bool,
}

/// Compares a set of existing loans with one refinancing offer
#[derive(Debug, Clone, Default)]
pub struct RefinanceComparator {
    config: SimulationConfig,
}

impl RefinanceComparator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn run_params(&self, params: &RefinanceParams) -> Result<ComparisonResult> {
        self.run(&params.existing_loans, &params.new_loan)
    }

    pub fn run(&self, existing_loans: &[LoanEntry], new_loan: &NewLoan) -> Result<ComparisonResult> {
        let qualifying: Vec<&LoanEntry> = existing_loans.iter().filter(|e| e.qualifies()).collect();
        let skipped_loans = existing_loans.len() - qualifying.len();

        if qualifying.is_empty() {
            warn!("Refinance rejected: none of {} loan entries qualify", existing_loans.len());
            return Err(ValidationError::NoValidLoans);
        }
        if skipped_loans > 0 {
            warn!("Skipping {} loan entries without balance or remaining term", skipped_loans);
        }

        let mut old_total_monthly = 0.0;
        let mut old_total_cost = 0.0;
        for entry in &qualifying {
            let monthly = monthly_payment(
                entry.outstanding_balance,
                entry.annual_rate_pct,
                entry.remaining_years,
            );
            old_total_monthly += monthly;
            old_total_cost += monthly * entry.remaining_years * 12.0;
        }

        let new_monthly = monthly_payment(new_loan.amount, new_loan.annual_rate_pct, new_loan.term_years);
        let new_total_cost = new_monthly * new_loan.term_years * 12.0 + new_loan.setup_cost;

        let monthly_saving = old_total_monthly - new_monthly;
        let total_saving = old_total_cost - new_total_cost;
        let verdict = RefinanceVerdict::classify(monthly_saving, total_saving);

        let break_even_months = if monthly_saving > 0.0 {
            Some(new_loan.setup_cost.max(0.0) / monthly_saving)
        } else {
            None
        };
        let borderline = break_even_months
            .map(|months| months > self.config.break_even_borderline_months)
            .unwrap_or(false);

        debug!(
            "Refinance: old monthly {:.2}, new monthly {:.2}, total saving {:.2}, verdict {:?}",
            old_total_monthly, new_monthly, total_saving, verdict
        );

        Ok(ComparisonResult {
            old_total_monthly,
            old_total_cost,
            new_monthly,
            new_total_cost,
            monthly_saving,
            total_saving,
            verdict,
            qualifying_loans: qualifying.len(),
            skipped_loans,
            break_even_months,
            borderline,
        })
    }

    /// Refinance one loan at a new rate, keeping balance and remaining term
    pub fn single_loan(
        &self,
        balance: f64,
        current_rate_pct: f64,
        new_rate_pct: f64,
        remaining_years: f64,
        setup_cost: f64,
    ) -> Result<ComparisonResult> {
        let existing = [LoanEntry::new(balance, current_rate_pct, remaining_years)];
        let offer = NewLoan {
            amount: balance,
            annual_rate_pct: new_rate_pct,
            term_years: remaining_years,
            setup_cost,
        };
        self.run(&existing, &offer)
    }
}
