//! Run projections for a whole borrower cohort from CSV
//!
//! Outputs one summary row per borrower plus cohort totals

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use loan_projection::assumptions::{Plan, SchemeTable};
use loan_projection::borrower::load_cohort;
use loan_projection::export::write_summaries_csv;
use loan_projection::projection::{ProjectionSummary, Verdict};
use loan_projection::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(name = "run_cohort", about = "Project every borrower in a cohort CSV")]
struct Args {
    /// Cohort CSV (BorrowerID,Balance,Salary,Overpayment,Career,CustomGrowth)
    #[arg(long, default_value = "data/sample_cohort.csv")]
    cohort: PathBuf,

    /// Summary output CSV
    #[arg(long, default_value = "cohort_projection_output.csv")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Plan::Plan2)]
    plan: Plan,

    /// RPI (base interest rate) in percent
    #[arg(long, default_value_t = 3.5)]
    rpi_pct: f64,

    /// Read plan parameters from a scheme table CSV instead of the presets
    #[arg(long)]
    scheme_table: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading cohort from {}...", args.cohort.display());
    let members = load_cohort(&args.cohort)
        .with_context(|| format!("failed to load cohort {}", args.cohort.display()))?;
    println!("Loaded {} borrowers in {:?}", members.len(), start.elapsed());

    let base_rate = args.rpi_pct / 100.0;
    let scheme = match &args.scheme_table {
        Some(path) => SchemeTable::load_from(path)
            .with_context(|| format!("failed to load scheme table {}", path.display()))?
            .scheme(args.plan.as_str(), base_rate)?,
        None => args.plan.scheme(base_rate),
    };

    let runner = ScenarioRunner::for_scheme(scheme);

    println!("Running projections...");
    let proj_start = Instant::now();
    let results = runner.run_cohort(&members)?;
    println!("Projections complete in {:?}", proj_start.elapsed());

    let summaries: Vec<ProjectionSummary> = results.iter().map(|r| r.summary()).collect();
    write_summaries_csv(&args.output, &summaries)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Output written to {}", args.output.display());

    let total_borrowed: f64 = summaries.iter().map(|s| s.initial_balance).sum();
    let total_paid: f64 = summaries.iter().map(|s| s.total_paid).sum();
    let total_written_off: f64 = summaries.iter().map(|s| s.written_off).sum();
    let count = |verdict: Verdict| summaries.iter().filter(|s| s.verdict == verdict).count();

    println!("\nCohort Summary ({}):", args.plan);
    println!("  Borrowers:      {}", summaries.len());
    println!("  Total Borrowed: {:.0}", total_borrowed);
    println!("  Total Paid:     {:.0}", total_paid);
    println!("  Written Off:    {:.0}", total_written_off);
    for verdict in [Verdict::EscapeArtist, Verdict::LifetimeTax, Verdict::DebtTrap] {
        println!("  {:<18} {}", format!("{}:", verdict.headline()), count(verdict));
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
