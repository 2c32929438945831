//! Load borrower cohorts from CSV

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Serialize;

use super::BorrowerProfile;
use crate::assumptions::{CareerTrack, GrowthPolicy};
use crate::error::{ProjectionError, Result};

/// Raw CSV row matching cohort.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "BorrowerID")]
    borrower_id: u32,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "Overpayment", default)]
    overpayment: Option<f64>,
    #[serde(rename = "Career")]
    career: String,
    #[serde(rename = "CustomGrowth", default)]
    custom_growth: Option<f64>,
}

/// A borrower together with their own career assumption
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortMember {
    pub profile: BorrowerProfile,
    pub career: CareerTrack,
    pub custom_growth_rate: Option<f64>,
}

impl CohortMember {
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.career.growth_policy(self.custom_growth_rate)
    }
}

impl CsvRow {
    fn into_member(self) -> Result<CohortMember> {
        let career: CareerTrack = self.career.parse()?;
        if let Some(rate) = self.custom_growth {
            if career != CareerTrack::Custom {
                return Err(ProjectionError::invalid(
                    "custom_growth",
                    rate,
                    "only applies to the custom career track",
                ));
            }
        }
        let profile = BorrowerProfile::new(self.balance, self.salary)
            .with_overpayment(self.overpayment.unwrap_or(0.0))
            .with_id(self.borrower_id);
        profile.validate()?;

        Ok(CohortMember {
            profile,
            career,
            custom_growth_rate: self.custom_growth,
        })
    }
}

/// Load all cohort members from a CSV file
pub fn load_cohort<P: AsRef<Path>>(path: P) -> Result<Vec<CohortMember>> {
    collect_members(Reader::from_path(path)?)
}

/// Load cohort members from any reader (e.g., string buffer, network stream)
pub fn load_cohort_from_reader<R: Read>(reader: R) -> Result<Vec<CohortMember>> {
    collect_members(Reader::from_reader(reader))
}

fn collect_members<R: Read>(mut reader: Reader<R>) -> Result<Vec<CohortMember>> {
    let mut members = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        members.push(row.into_member()?);
    }
    Ok(members)
}
