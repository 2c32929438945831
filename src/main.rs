//! Loan Projection CLI
//!
//! Command-line interface for projecting a single borrower's repayments

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use loan_projection::assumptions::{Assumptions, CareerTrack, Plan, SchemeTable};
use loan_projection::export;
use loan_projection::projection::{ProjectionConfig, ProjectionResult, ProjectionSummary};
use loan_projection::{BorrowerProfile, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "loan-projection", version, about = "Student loan repayment projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project one borrower and print the yearly trajectory
    Simulate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Write yearly snapshots to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write every simulated month to this CSV file
        #[arg(long)]
        monthly_csv: Option<PathBuf>,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compare outcomes across monthly overpayment amounts
    Sweep {
        #[command(flatten)]
        inputs: InputArgs,

        /// Overpayment amounts to try, comma separated
        #[arg(long, value_delimiter = ',', default_value = "0,50,100,250,500")]
        amounts: Vec<f64>,
    },
    /// Compare the same borrower across repayment plans
    Compare {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

/// JSON document printed by `simulate --json`
#[derive(Debug, Serialize)]
struct SimulationOutput<'a> {
    summary: ProjectionSummary,
    #[serde(flatten)]
    result: &'a ProjectionResult,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Current loan balance
    #[arg(long, default_value_t = 45_000.0)]
    balance: f64,

    /// Current annual salary
    #[arg(long, default_value_t = 30_000.0)]
    salary: f64,

    /// Career trajectory
    #[arg(long, value_enum, default_value_t = CareerTrack::Steady)]
    career: CareerTrack,

    /// Annual salary growth in percent (custom career only)
    #[arg(long)]
    growth_pct: Option<f64>,

    /// RPI (base interest rate) in percent
    #[arg(long, default_value_t = 3.5)]
    rpi_pct: f64,

    /// Voluntary monthly overpayment
    #[arg(long, default_value_t = 0.0)]
    overpayment: f64,

    /// Repayment plan
    #[arg(long, value_enum, default_value_t = Plan::Plan2)]
    plan: Plan,

    /// Read plan parameters from a scheme table CSV instead of the presets
    #[arg(long)]
    scheme_table: Option<PathBuf>,
}

impl InputArgs {
    fn profile(&self) -> BorrowerProfile {
        BorrowerProfile::new(self.balance, self.salary).with_overpayment(self.overpayment)
    }

    fn assumptions(&self) -> Result<Assumptions> {
        let base_rate = self.rpi_pct / 100.0;
        let growth = self.career.growth_policy(self.growth_pct.map(|pct| pct / 100.0));

        let scheme = match &self.scheme_table {
            Some(path) => SchemeTable::load_from(path)
                .with_context(|| format!("failed to load scheme table {}", path.display()))?
                .scheme(self.plan.as_str(), base_rate)?,
            None => self.plan.scheme(base_rate),
        };

        Ok(Assumptions::new(scheme, growth))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { inputs, csv, monthly_csv, json } => {
            let config = ProjectionConfig {
                detailed_output: monthly_csv.is_some(),
            };
            let runner = ScenarioRunner::new(inputs.assumptions()?).with_config(config);
            let result = runner.run(&inputs.profile())?;

            if json {
                let output = SimulationOutput {
                    summary: result.summary(),
                    result: &result,
                };
                export::write_json(io::stdout().lock(), &output)?;
                println!();
            } else {
                print_result(&inputs, &result);
            }

            if let Some(path) = csv {
                export::write_snapshots_csv(&path, &result.snapshots)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("snapshots written to {}", path.display());
            }
            if let Some(path) = monthly_csv {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                export::write_monthly(file, &result.monthly)?;
                info!("monthly rows written to {}", path.display());
            }
        }
        Command::Sweep { inputs, amounts } => {
            let runner = ScenarioRunner::new(inputs.assumptions()?);
            let points = runner.sweep_overpayments(&inputs.profile(), &amounts)?;

            println!("{:>12} {:>14} {:>14} {:>8} {:>10}", "Overpay/mo", "Total Paid", "Written Off", "Multiple", "Clears");
            println!("{}", "-".repeat(62));
            for point in &points {
                let s = &point.summary;
                println!(
                    "{:>12.0} {:>14.0} {:>14.0} {:>7.2}x {:>10}",
                    point.monthly_overpayment,
                    s.total_paid,
                    s.written_off,
                    s.multiple,
                    clears_label(s.clearance_year),
                );
            }
        }
        Command::Compare { inputs } => {
            let runner = ScenarioRunner::new(inputs.assumptions()?);
            let outcomes = runner.compare_plans(&inputs.profile(), &[Plan::Plan2, Plan::Plan5])?;

            println!("{:>6} {:>14} {:>14} {:>8} {:>10} {:>18}", "Plan", "Total Paid", "Written Off", "Multiple", "Clears", "Verdict");
            println!("{}", "-".repeat(76));
            for outcome in &outcomes {
                let s = &outcome.summary;
                println!(
                    "{:>6} {:>14.0} {:>14.0} {:>7.2}x {:>10} {:>18}",
                    outcome.plan,
                    s.total_paid,
                    s.written_off,
                    s.multiple,
                    clears_label(s.clearance_year),
                    s.verdict.headline(),
                );
            }
        }
    }

    Ok(())
}

fn clears_label(clearance_year: Option<u32>) -> String {
    match clearance_year {
        Some(year) => format!("year {}", year),
        None => "never".to_string(),
    }
}

fn print_result(inputs: &InputArgs, result: &ProjectionResult) {
    let summary = result.summary();

    println!("Loan Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Borrower:");
    println!("  Balance:     {:.2}", inputs.balance);
    println!("  Salary:      {:.2}", inputs.salary);
    println!("  Career:      {}", inputs.career);
    println!("  Plan:        {}", inputs.plan);
    println!("  RPI:         {:.2}%", inputs.rpi_pct);
    println!("  Overpayment: {:.2}/month", inputs.overpayment);
    println!();

    println!("{:>5} {:>14} {:>14} {:>12} {:>12}", "Year", "Balance", "Paid", "Salary", "Interest");
    println!("{}", "-".repeat(61));
    for snapshot in &result.snapshots {
        println!(
            "{:>5} {:>14.0} {:>14.0} {:>12.0} {:>12.0}",
            snapshot.year,
            snapshot.balance,
            snapshot.cumulative_paid,
            snapshot.salary,
            snapshot.annualized_interest,
        );
    }

    println!("\nVerdict: {}", summary.verdict.headline());
    println!("  Total Paid:   {:.2} ({:.2}x original)", summary.total_paid, summary.multiple);
    println!("  Written Off:  {:.2}", summary.written_off);
    println!("  Debt Clear:   {}", clears_label(summary.clearance_year));
    if let Some(rate) = summary.effective_annual_rate {
        println!("  Effective Rate: {:.2}% a year", rate * 100.0);
    }
}
