//! Sweep the leverage comparison across investment returns
//!
//! Writes one CSV row per return so the break-even return can be read off.
//!
//! Usage: cargo run --bin leverage_sweep -- --principal 500000 --loan-rate 4.5 --years 20

use anyhow::Context;
use clap::Parser;
use finance_projections::{LeverageParams, ScenarioRunner};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Leverage vs periodic investing across investment returns")]
struct SweepArgs {
    #[arg(long, default_value_t = 500_000.0)]
    principal: f64,
    #[arg(long, default_value_t = 4.5)]
    loan_rate: f64,
    #[arg(long, default_value_t = 20.0)]
    years: f64,
    #[arg(long)]
    indexed: bool,
    #[arg(long, default_value_t = 0.0)]
    inflation: f64,
    #[arg(long, default_value_t = 0.0)]
    balloon: f64,
    #[arg(long)]
    tax: bool,
    /// Lowest investment return (percent)
    #[arg(long, default_value_t = 0.0)]
    from: f64,
    /// Highest investment return (percent)
    #[arg(long, default_value_t = 12.0)]
    to: f64,
    #[arg(long, default_value_t = 0.25)]
    step: f64,
    #[arg(long, default_value = "leverage_sweep.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = SweepArgs::parse();

    if args.step <= 0.0 || args.to < args.from {
        anyhow::bail!("sweep range must be increasing with a positive step");
    }

    let base = LeverageParams {
        principal: args.principal,
        loan_rate_pct: args.loan_rate,
        term_years: args.years,
        apply_indexation: args.indexed,
        annual_inflation_pct: args.inflation,
        balloon_principal: args.balloon,
        apply_tax: args.tax,
        ..Default::default()
    };

    let steps = ((args.to - args.from) / args.step).floor() as usize;
    let returns: Vec<f64> = (0..=steps).map(|i| args.from + i as f64 * args.step).collect();

    let start = Instant::now();
    let runner = ScenarioRunner::new();
    let points = runner.sweep_invest_returns(&base, &returns)?;
    println!("Ran {} scenarios in {:?}", points.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for point in &points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    match points.iter().find(|p| p.recommended_diff > 0.0) {
        Some(p) => println!(
            "Leverage starts paying off at about {:.2}% annual return",
            p.invest_return_pct
        ),
        None => println!("Leverage never beats periodic investing in this range"),
    }

    Ok(())
}
