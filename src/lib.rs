//! Finance Projections - monthly projection engine for personal-finance estimates
//!
//! This library provides:
//! - Compound-interest investment growth with fees and gains tax
//! - CPI-linked annuity loan amortization with a balloon slice
//! - Multi-loan refinance comparison
//! - Borrow-to-invest leverage comparison and LTV risk banding
//! - Parallel batch and sensitivity runs
//!
//! Every simulator is a pure function of its parameter record: nothing is
//! retained between calls.

pub mod error;
pub mod config;
pub mod rates;
pub mod inputs;
pub mod projection;
pub mod comparison;
pub mod scenario;

// Re-export commonly used types
pub use error::{Result, ValidationError};
pub use config::SimulationConfig;
pub use inputs::{GrowthParams, LeverageParams, LoanEntry, LoanParams, LtvParams, NewLoan, RefinanceParams};
pub use projection::{
    AmortizationResult, CompoundGrowthSimulator, GrowthResult, IndexedAmortizationSimulator, PeriodSample,
};
pub use comparison::{
    assess_ltv, ComparisonResult, LeverageComparator, LeverageComparison, RefinanceComparator, RefinanceVerdict,
};
pub use scenario::ScenarioRunner;
