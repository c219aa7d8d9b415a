//! Per-calculator parameter records

use serde::{Deserialize, Serialize};

use super::coerce::{lenient_amount, lenient_flag, lenient_year};

/// Gains tax applied when a record enables tax without naming a rate
pub const DEFAULT_TAX_RATE_PCT: f64 = 25.0;

/// Compound-interest investment calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Opening balance, also counted as deposited
    #[serde(deserialize_with = "lenient_amount")]
    pub principal: f64,

    /// Gross deposit made at the start of every month
    #[serde(deserialize_with = "lenient_amount")]
    pub monthly_deposit: f64,

    /// Effective annual return (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub annual_rate_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub term_years: f64,

    /// Annual management fee on the accumulated balance (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub accumulation_fee_pct: f64,

    /// Fee taken off every deposit (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub deposit_fee_pct: f64,

    #[serde(deserialize_with = "lenient_flag")]
    pub apply_tax: bool,

    #[serde(deserialize_with = "lenient_amount")]
    pub tax_rate_pct: f64,

    /// Calendar year the projection starts in; used for sample labels only
    #[serde(deserialize_with = "lenient_year")]
    pub start_year: i32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            principal: 0.0,
            monthly_deposit: 0.0,
            annual_rate_pct: 0.0,
            term_years: 0.0,
            accumulation_fee_pct: 0.0,
            deposit_fee_pct: 0.0,
            apply_tax: false,
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            start_year: 0,
        }
    }
}

/// Loan / mortgage calculator inputs (annuity + CPI linkage + balloon)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParams {
    /// Whole loan amount, balloon slice included
    #[serde(deserialize_with = "lenient_amount")]
    pub total_principal: f64,

    /// Nominal annual interest rate (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub annual_rate_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub term_years: f64,

    /// Link payments to the CPI
    #[serde(deserialize_with = "lenient_flag")]
    pub apply_indexation: bool,

    /// Expected annual inflation (percent); ignored without indexation
    #[serde(deserialize_with = "lenient_amount")]
    pub annual_inflation_pct: f64,

    /// Principal slice settled in one payment at term end
    #[serde(deserialize_with = "lenient_amount")]
    pub balloon_principal: f64,
}

impl LoanParams {
    /// Portion of the principal repaid monthly
    pub fn amortized_portion(&self) -> f64 {
        self.total_principal - self.balloon_principal
    }
}

/// One loan already held by the borrower
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanEntry {
    #[serde(deserialize_with = "lenient_amount")]
    pub outstanding_balance: f64,

    /// Nominal annual rate (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub annual_rate_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub remaining_years: f64,
}

impl LoanEntry {
    pub fn new(outstanding_balance: f64, annual_rate_pct: f64, remaining_years: f64) -> Self {
        Self {
            outstanding_balance,
            annual_rate_pct,
            remaining_years,
        }
    }

    /// Entries without a balance or remaining term are ignored by refinance
    pub fn qualifies(&self) -> bool {
        self.outstanding_balance > 0.0 && self.remaining_years > 0.0
    }
}

/// The consolidated loan offered in place of the existing ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewLoan {
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,

    /// Nominal annual rate (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub annual_rate_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub term_years: f64,

    /// One-off cost of refinancing (fees, early repayment charges)
    #[serde(deserialize_with = "lenient_amount")]
    pub setup_cost: f64,
}

/// Refinance calculator inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinanceParams {
    pub existing_loans: Vec<LoanEntry>,
    pub new_loan: NewLoan,
}

/// Borrow-to-invest calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeverageParams {
    /// Amount borrowed and invested up front
    #[serde(deserialize_with = "lenient_amount")]
    pub principal: f64,

    /// Nominal annual loan rate (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub loan_rate_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub term_years: f64,

    #[serde(deserialize_with = "lenient_flag")]
    pub apply_indexation: bool,

    #[serde(deserialize_with = "lenient_amount")]
    pub annual_inflation_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub balloon_principal: f64,

    /// Effective annual investment return (percent)
    #[serde(deserialize_with = "lenient_amount")]
    pub invest_return_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub accumulation_fee_pct: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub deposit_fee_pct: f64,

    #[serde(deserialize_with = "lenient_flag")]
    pub apply_tax: bool,

    #[serde(deserialize_with = "lenient_amount")]
    pub tax_rate_pct: f64,

    /// Calendar year the projection starts in; used for sample labels only
    #[serde(deserialize_with = "lenient_year")]
    pub start_year: i32,
}

impl Default for LeverageParams {
    fn default() -> Self {
        Self {
            principal: 0.0,
            loan_rate_pct: 0.0,
            term_years: 0.0,
            apply_indexation: false,
            annual_inflation_pct: 0.0,
            balloon_principal: 0.0,
            invest_return_pct: 0.0,
            accumulation_fee_pct: 0.0,
            deposit_fee_pct: 0.0,
            apply_tax: false,
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            start_year: 0,
        }
    }
}

impl LeverageParams {
    /// The loan financing the lump-sum investment
    pub fn loan(&self) -> LoanParams {
        LoanParams {
            total_principal: self.principal,
            annual_rate_pct: self.loan_rate_pct,
            term_years: self.term_years,
            apply_indexation: self.apply_indexation,
            annual_inflation_pct: self.annual_inflation_pct,
            balloon_principal: self.balloon_principal,
        }
    }
}

/// Loan-to-value risk inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtvParams {
    #[serde(deserialize_with = "lenient_amount")]
    pub asset_value: f64,

    #[serde(deserialize_with = "lenient_amount")]
    pub outstanding_loans: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_garbled_fields() {
        let params: GrowthParams = serde_json::from_str(
            r#"{"principal": "10000", "monthly_deposit": "", "annual_rate_pct": "x", "term_years": 10}"#,
        )
        .unwrap();

        assert_eq!(params.principal, 10_000.0);
        assert_eq!(params.monthly_deposit, 0.0);
        assert_eq!(params.annual_rate_pct, 0.0);
        assert_eq!(params.term_years, 10.0);
        assert!(!params.apply_tax);
        assert_eq!(params.tax_rate_pct, DEFAULT_TAX_RATE_PCT);
        assert_eq!(params.start_year, 0);

        let params: GrowthParams =
            serde_json::from_str(r#"{"term_years": "10", "start_year": "2026"}"#).unwrap();
        assert_eq!(params.term_years, 10.0);
        assert_eq!(params.start_year, 2026);

        let params: LeverageParams = serde_json::from_str(r#"{"start_year": "abc"}"#).unwrap();
        assert_eq!(params.start_year, 0);
    }

    #[test]
    fn test_amortized_portion() {
        let loan = LoanParams {
            total_principal: 1_000_000.0,
            balloon_principal: 300_000.0,
            ..Default::default()
        };
        assert_eq!(loan.amortized_portion() + loan.balloon_principal, loan.total_principal);
    }

    #[test]
    fn test_entry_qualification() {
        assert!(LoanEntry::new(50_000.0, 4.0, 10.0).qualifies());
        assert!(!LoanEntry::new(0.0, 4.0, 10.0).qualifies());
        assert!(!LoanEntry::new(50_000.0, 4.0, 0.0).qualifies());
    }

    #[test]
    fn test_leverage_loan_mirrors_fields() {
        let params = LeverageParams {
            principal: 200_000.0,
            loan_rate_pct: 4.5,
            term_years: 15.0,
            balloon_principal: 50_000.0,
            apply_indexation: true,
            annual_inflation_pct: 2.0,
            ..Default::default()
        };
        let loan = params.loan();
        assert_eq!(loan.total_principal, 200_000.0);
        assert_eq!(loan.annual_rate_pct, 4.5);
        assert_eq!(loan.balloon_principal, 50_000.0);
        assert!(loan.apply_indexation);
    }
}
