//! Side-by-side comparisons built on the simulators

mod refinance;
mod leverage;
mod ltv;

pub use refinance::{ComparisonResult, RefinanceComparator, RefinanceVerdict};
pub use leverage::{LeverageComparator, LeverageComparison, ScenarioOutcome, Strategy};
pub use ltv::{assess_ltv, LtvAssessment, LtvRisk};
