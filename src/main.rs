//! Finance Projections CLI
//!
//! Runs one calculator per invocation and prints its summary.

use anyhow::{anyhow, Context};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use finance_projections::{
    assess_ltv,
    inputs::{load_loan_entries, parse_amount, DEFAULT_TAX_RATE_PCT},
    projection::write_samples_csv,
    CompoundGrowthSimulator, GrowthParams, IndexedAmortizationSimulator, LeverageComparator,
    LeverageParams, LoanEntry, LoanParams, LtvParams, NewLoan, PeriodSample, RefinanceComparator,
    SimulationConfig,
};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finance_projections", version, about = "Personal-finance projection calculators")]
struct Cli {
    /// JSON configuration overriding the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the chart series to this CSV file
    #[arg(long, global = true)]
    samples_csv: Option<PathBuf>,

    /// Print the full result record as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compound-interest investment growth
    Growth(GrowthArgs),
    /// Annuity loan with optional CPI linkage and balloon
    Loan(LoanArgs),
    /// Existing loans against one consolidated offer
    Refinance(RefinanceArgs),
    /// Borrow-to-invest against investing the loan payments
    Leverage(LeverageArgs),
    /// Loan-to-value risk band
    Ltv(LtvArgs),
}

/// Amounts are read like form fields: garbage becomes 0
fn amount(raw: &str) -> Result<f64, String> {
    Ok(parse_amount(raw))
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Args, Debug)]
struct GrowthArgs {
    #[arg(long, default_value = "0", value_parser = amount)]
    principal: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    monthly_deposit: f64,
    /// Annual return (percent)
    #[arg(long, default_value = "0", value_parser = amount)]
    rate: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    years: f64,
    /// Annual management fee on the balance (percent)
    #[arg(long, default_value = "0", value_parser = amount)]
    accumulation_fee: f64,
    /// Fee on each deposit (percent)
    #[arg(long, default_value = "0", value_parser = amount)]
    deposit_fee: f64,
    /// Deduct gains tax at the end
    #[arg(long)]
    tax: bool,
    #[arg(long, default_value_t = DEFAULT_TAX_RATE_PCT, value_parser = amount)]
    tax_rate: f64,
    /// First projection year (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long, default_value = "0", value_parser = amount)]
    amount: f64,
    /// Nominal annual rate (percent)
    #[arg(long, default_value = "0", value_parser = amount)]
    rate: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    years: f64,
    /// Link payments to the CPI
    #[arg(long)]
    indexed: bool,
    /// Expected annual inflation (percent)
    #[arg(long, default_value = "0", value_parser = amount)]
    inflation: f64,
    /// Principal settled in one payment at term end
    #[arg(long, default_value = "0", value_parser = amount)]
    balloon: f64,
}

#[derive(Args, Debug)]
struct RefinanceArgs {
    /// Existing loan as balance:rate:years (repeatable)
    #[arg(long = "loan")]
    loans: Vec<String>,
    /// CSV file of existing loans
    #[arg(long)]
    loans_csv: Option<PathBuf>,
    #[arg(long, default_value = "0", value_parser = amount)]
    new_amount: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    new_rate: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    new_years: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    setup_cost: f64,
}

#[derive(Args, Debug)]
struct LeverageArgs {
    #[arg(long, default_value = "0", value_parser = amount)]
    principal: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    loan_rate: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    years: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    invest_return: f64,
    #[arg(long)]
    indexed: bool,
    #[arg(long, default_value = "0", value_parser = amount)]
    inflation: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    balloon: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    accumulation_fee: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    deposit_fee: f64,
    #[arg(long)]
    tax: bool,
    #[arg(long, default_value_t = DEFAULT_TAX_RATE_PCT, value_parser = amount)]
    tax_rate: f64,
    #[arg(long)]
    start_year: Option<i32>,
}

#[derive(Args, Debug)]
struct LtvArgs {
    #[arg(long, default_value = "0", value_parser = amount)]
    asset_value: f64,
    #[arg(long, default_value = "0", value_parser = amount)]
    loans: f64,
}

/// Parse `balance:rate:years`; missing parts are 0
fn parse_loan_spec(raw: &str) -> LoanEntry {
    let mut parts = raw.split(':').map(parse_amount);
    LoanEntry::new(
        parts.next().unwrap_or(0.0),
        parts.next().unwrap_or(0.0),
        parts.next().unwrap_or(0.0),
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SimulationConfig::from_json_path(path)
            .map_err(|e| anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => SimulationConfig::default(),
    };

    match &cli.command {
        Command::Growth(args) => {
            let params = GrowthParams {
                principal: args.principal,
                monthly_deposit: args.monthly_deposit,
                annual_rate_pct: args.rate,
                term_years: args.years,
                accumulation_fee_pct: args.accumulation_fee,
                deposit_fee_pct: args.deposit_fee,
                apply_tax: args.tax,
                tax_rate_pct: args.tax_rate,
                start_year: args.start_year.unwrap_or_else(current_year),
            };
            let result = CompoundGrowthSimulator::new().run(&params)?;

            if !emit_json(&cli, &result)? {
                println!("Final balance:      {:>14.0}", result.final_balance);
                println!("Total deposited:    {:>14.0}", result.total_deposited);
                println!("Net profit:         {:>14.0}", result.net_profit());
                println!("Fees paid:          {:>14.0}", result.total_fees_paid);
                if params.apply_tax {
                    println!("Gains tax ({:.0}%):    {:>14.0}", params.tax_rate_pct, result.tax_paid);
                }
            }
            write_series(&cli, &result.yearly_samples)?;
        }
        Command::Loan(args) => {
            let params = LoanParams {
                total_principal: args.amount,
                annual_rate_pct: args.rate,
                term_years: args.years,
                apply_indexation: args.indexed,
                annual_inflation_pct: args.inflation,
                balloon_principal: args.balloon,
            };
            let result = IndexedAmortizationSimulator::new(config).run(&params)?;

            if !emit_json(&cli, &result)? {
                println!("First payment:          {:>14.0}", result.first_payment);
                println!("Total paid:             {:>14.0}", result.grand_total_paid);
                println!("Interest + indexation:  {:>14.0}", result.total_interest_and_indexation);
                if result.final_balloon_payment > 0.0 {
                    println!("Balloon settlement:     {:>14.0}", result.final_balloon_payment);
                }
                if let Some(cost) = result.effective_annual_cost {
                    println!("Effective annual cost:  {:>13.2}%", cost * 100.0);
                }
            }
            write_series(&cli, &result.series)?;
        }
        Command::Refinance(args) => {
            let mut existing: Vec<LoanEntry> = args.loans.iter().map(|s| parse_loan_spec(s)).collect();
            if let Some(path) = &args.loans_csv {
                let loaded = load_loan_entries(path)
                    .map_err(|e| anyhow!("failed to load loans from {}: {}", path.display(), e))?;
                existing.extend(loaded);
            }
            let offer = NewLoan {
                amount: args.new_amount,
                annual_rate_pct: args.new_rate,
                term_years: args.new_years,
                setup_cost: args.setup_cost,
            };
            let result = RefinanceComparator::new(config).run(&existing, &offer)?;

            if !emit_json(&cli, &result)? {
                println!("Current monthly:   {:>14.0}", result.old_total_monthly);
                println!("New monthly:       {:>14.0}", result.new_monthly);
                println!("Monthly saving:    {:>14.0}", result.monthly_saving);
                println!("Total saving:      {:>14.0}", result.total_saving);
                if let Some(months) = result.break_even_months {
                    println!("Break-even:        {:>11.0} months", months.ceil());
                }
                println!("Verdict: {}", result.verdict.description());
            }
        }
        Command::Leverage(args) => {
            let params = LeverageParams {
                principal: args.principal,
                loan_rate_pct: args.loan_rate,
                term_years: args.years,
                apply_indexation: args.indexed,
                annual_inflation_pct: args.inflation,
                balloon_principal: args.balloon,
                invest_return_pct: args.invest_return,
                accumulation_fee_pct: args.accumulation_fee,
                deposit_fee_pct: args.deposit_fee,
                apply_tax: args.tax,
                tax_rate_pct: args.tax_rate,
                start_year: args.start_year.unwrap_or_else(current_year),
            };
            let result = LeverageComparator::new(config).run(&params)?;

            if !emit_json(&cli, &result)? {
                println!("{:<26} {:>14} {:>14}", "", "Leverage", "Periodic");
                println!(
                    "{:<26} {:>14.0} {:>14.0}",
                    "Gross value", result.scenario_a.gross_value, result.scenario_b.gross_value
                );
                println!(
                    "{:<26} {:>14.0} {:>14.0}",
                    "Paid out", result.scenario_a.total_outlay, result.scenario_b.total_outlay
                );
                println!(
                    "{:<26} {:>14.0} {:>14.0}",
                    "Tax", result.scenario_a.tax_paid, result.scenario_b.tax_paid
                );
                println!(
                    "{:<26} {:>14.0} {:>14.0}",
                    "Net profit", result.scenario_a.net_profit, result.scenario_b.net_profit
                );
                println!("Difference (A - B): {:.0} -> {:?}", result.recommended_diff, result.favoured);
            }
            write_series(&cli, &result.yearly_samples)?;
        }
        Command::Ltv(args) => {
            let params = LtvParams {
                asset_value: args.asset_value,
                outstanding_loans: args.loans,
            };
            let result = assess_ltv(&params, &config.ltv_bands)?;

            if !emit_json(&cli, &result)? {
                println!("LTV: {:.2}%", result.ltv_pct);
                println!("Risk: {}", result.risk.description());
            }
        }
    }

    Ok(())
}

/// Print the result as JSON when requested; returns whether it did
fn emit_json<T: Serialize>(cli: &Cli, result: &T) -> anyhow::Result<bool> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(cli.json)
}

fn write_series(cli: &Cli, samples: &[PeriodSample]) -> anyhow::Result<()> {
    if let Some(path) = &cli.samples_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_samples_csv(file, samples)
            .map_err(|e| anyhow!("failed to write samples to {}: {}", path.display(), e))?;
        eprintln!("Chart series written to {}", path.display());
    }
    Ok(())
}
