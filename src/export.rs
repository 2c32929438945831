//! CSV and JSON writers for projection output
//!
//! Column names follow the field names of the serialized records so the
//! files load directly into spreadsheets or dataframes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::projection::{MonthRow, ProjectionSummary, YearSnapshot};

fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_snapshots<W: Write>(writer: W, snapshots: &[YearSnapshot]) -> Result<()> {
    write_records(writer, snapshots)
}

pub fn write_monthly<W: Write>(writer: W, rows: &[MonthRow]) -> Result<()> {
    write_records(writer, rows)
}

pub fn write_summaries<W: Write>(writer: W, summaries: &[ProjectionSummary]) -> Result<()> {
    write_records(writer, summaries)
}

pub fn write_snapshots_csv(path: &Path, snapshots: &[YearSnapshot]) -> Result<()> {
    write_snapshots(File::create(path)?, snapshots)
}

pub fn write_summaries_csv(path: &Path, summaries: &[ProjectionSummary]) -> Result<()> {
    write_summaries(File::create(path)?, summaries)
}

/// Pretty-printed JSON of any serializable result
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::borrower::BorrowerProfile;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    fn sample_result() -> crate::projection::ProjectionResult {
        ProjectionEngine::new(
            Assumptions::default_plan2(),
            ProjectionConfig { detailed_output: true },
        )
        .project(&BorrowerProfile::new(5_000.0, 30_000.0))
        .unwrap()
    }

    #[test]
    fn test_snapshot_csv() {
        let result = sample_result();
        let mut buffer = Vec::new();
        write_snapshots(&mut buffer, &result.snapshots).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "year,month,balance,cumulative_paid,salary,annualized_interest"
        );
        assert_eq!(lines.count(), result.snapshots.len());
    }

    #[test]
    fn test_summary_csv_handles_options() {
        let result = sample_result();
        let mut buffer = Vec::new();
        write_summaries(&mut buffer, &[result.summary()]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("borrower_id,initial_balance,total_paid"));
        assert!(text.contains("escape-artist"));
    }

    #[test]
    fn test_monthly_csv_row_count() {
        let result = sample_result();
        let mut buffer = Vec::new();
        write_monthly(&mut buffer, &result.monthly).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), result.monthly.len() + 1);
    }

    #[test]
    fn test_json_summary_parses_back() {
        let summary = sample_result().summary();
        let mut buffer = Vec::new();
        write_json(&mut buffer, &summary).unwrap();

        let parsed: ProjectionSummary = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.verdict, summary.verdict);
        assert_eq!(parsed.months_simulated, summary.months_simulated);
        assert_eq!(parsed.clearance_year, summary.clearance_year);
        assert!((parsed.total_paid - summary.total_paid).abs() < 1e-6);
    }
}
