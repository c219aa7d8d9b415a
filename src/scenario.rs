//! Scenario runner for batch and sensitivity runs
//!
//! Every simulator call is pure, so batches fan out across threads with no
//! shared state.

use rayon::prelude::*;
use serde::Serialize;

use crate::comparison::{ComparisonResult, LeverageComparator, RefinanceComparator, Strategy};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::inputs::{GrowthParams, LeverageParams, LoanEntry, LoanParams, NewLoan};
use crate::projection::{
    AmortizationResult, CompoundGrowthSimulator, GrowthResult, IndexedAmortizationSimulator,
};

/// One point of a leverage sensitivity sweep
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LeverageSweepPoint {
    pub invest_return_pct: f64,
    pub loan_rate_pct: f64,
    pub leverage_net_profit: f64,
    pub periodic_net_profit: f64,
    pub recommended_diff: f64,
    pub favoured: Strategy,
}

/// Runs many parameter records against one configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let points = runner.sweep_invest_returns(&base, &[2.0, 4.0, 6.0, 8.0])?;
/// for p in points {
///     println!("{:.1}% -> {:.0}", p.invest_return_pct, p.recommended_diff);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: SimulationConfig,
}

impl ScenarioRunner {
    /// Runner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Growth projections, one result per record in input order
    pub fn run_growth_batch(&self, batch: &[GrowthParams]) -> Vec<Result<GrowthResult>> {
        let simulator = CompoundGrowthSimulator::new();
        batch.par_iter().map(|params| simulator.run(params)).collect()
    }

    /// Loan schedules, one result per record in input order
    pub fn run_loan_batch(&self, batch: &[LoanParams]) -> Vec<Result<AmortizationResult>> {
        let simulator = IndexedAmortizationSimulator::new(self.config.clone());
        batch.par_iter().map(|params| simulator.run(params)).collect()
    }

    /// Leverage comparison across investment returns, everything else fixed
    pub fn sweep_invest_returns(
        &self,
        base: &LeverageParams,
        invest_returns_pct: &[f64],
    ) -> Result<Vec<LeverageSweepPoint>> {
        let comparator = LeverageComparator::new(self.config.clone());

        invest_returns_pct
            .par_iter()
            .map(|&invest_return_pct| {
                let params = LeverageParams {
                    invest_return_pct,
                    ..base.clone()
                };
                let result = comparator.run(&params)?;
                Ok(LeverageSweepPoint {
                    invest_return_pct,
                    loan_rate_pct: params.loan_rate_pct,
                    leverage_net_profit: result.scenario_a.net_profit,
                    periodic_net_profit: result.scenario_b.net_profit,
                    recommended_diff: result.recommended_diff,
                    favoured: result.favoured,
                })
            })
            .collect()
    }

    /// Refinance comparison across offered rates
    pub fn sweep_refinance_rates(
        &self,
        existing_loans: &[LoanEntry],
        offer: &NewLoan,
        rates_pct: &[f64],
    ) -> Result<Vec<(f64, ComparisonResult)>> {
        let comparator = RefinanceComparator::new(self.config.clone());

        rates_pct
            .par_iter()
            .map(|&rate| {
                let offer = NewLoan {
                    annual_rate_pct: rate,
                    ..*offer
                };
                comparator.run(existing_loans, &offer).map(|result| (rate, result))
            })
            .collect()
    }
}
