//! CSV-based scheme table loader
//!
//! A scheme table lists plan parameters one row per plan. The base rate is
//! not part of the table; it is supplied per run.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::warn;

use super::scheme::{InterestBasis, SchemePolicy};
use crate::error::{ProjectionError, Result};

/// Default path to the scheme table
pub const DEFAULT_SCHEME_TABLE_PATH: &str = "data/schemes.csv";

/// Raw CSV row matching schemes.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Plan")]
    plan: String,
    #[serde(rename = "RepaymentThreshold")]
    repayment_threshold: f64,
    #[serde(rename = "LowerInterestThreshold")]
    lower_interest_threshold: f64,
    #[serde(rename = "UpperInterestThreshold")]
    upper_interest_threshold: f64,
    #[serde(rename = "RateSpread")]
    rate_spread: f64,
    #[serde(rename = "RepaymentRate")]
    repayment_rate: f64,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "InterestBasis")]
    interest_basis: String,
}

/// Scheme parameters without the base rate
#[derive(Debug, Clone, PartialEq)]
struct SchemeTemplate {
    repayment_threshold: f64,
    lower_interest_threshold: f64,
    upper_interest_threshold: f64,
    rate_spread: f64,
    repayment_rate: f64,
    term_months: u32,
    interest_basis: InterestBasis,
}

impl CsvRow {
    fn into_template(self) -> Result<(String, SchemeTemplate)> {
        let interest_basis: InterestBasis = self.interest_basis.parse()?;
        Ok((
            self.plan.trim().to_ascii_lowercase(),
            SchemeTemplate {
                repayment_threshold: self.repayment_threshold,
                lower_interest_threshold: self.lower_interest_threshold,
                upper_interest_threshold: self.upper_interest_threshold,
                rate_spread: self.rate_spread,
                repayment_rate: self.repayment_rate,
                term_months: self.term_months,
                interest_basis,
            },
        ))
    }
}

/// Plan parameters keyed by lower-cased plan name
#[derive(Debug, Clone, Default)]
pub struct SchemeTable {
    schemes: HashMap<String, SchemeTemplate>,
}

impl SchemeTable {
    /// Load from the default location
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_SCHEME_TABLE_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    /// Load from any reader (e.g., string buffer, request body)
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut schemes = HashMap::new();

        for result in reader.deserialize() {
            let row: CsvRow = result?;
            let (name, template) = row.into_template()?;
            if schemes.insert(name.clone(), template).is_some() {
                warn!("scheme table lists plan '{}' more than once; keeping the last row", name);
            }
        }

        Ok(Self { schemes })
    }

    /// Build the validated scheme for `plan` at the given base rate
    pub fn scheme(&self, plan: &str, base_rate: f64) -> Result<SchemePolicy> {
        let template = self
            .schemes
            .get(&plan.trim().to_ascii_lowercase())
            .ok_or_else(|| ProjectionError::UnknownPlan(plan.to_string()))?;

        let scheme = SchemePolicy {
            repayment_threshold: template.repayment_threshold,
            lower_interest_threshold: template.lower_interest_threshold,
            upper_interest_threshold: template.upper_interest_threshold,
            base_rate,
            rate_spread: template.rate_spread,
            repayment_rate: template.repayment_rate,
            term_months: template.term_months,
            interest_basis: template.interest_basis,
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Plan names in sorted order
    pub fn plans(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Plan;

    const TABLE: &str = "\
Plan,RepaymentThreshold,LowerInterestThreshold,UpperInterestThreshold,RateSpread,RepaymentRate,TermMonths,InterestBasis
plan2,27295,28470,51245,0.03,0.09,360,salary-banded
plan5,25000,25000,25000,0,0.09,480,flat
";

    #[test]
    fn test_load_table_matches_presets() {
        let table = SchemeTable::load_from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.plans(), vec!["plan2", "plan5"]);

        assert_eq!(table.scheme("plan2", 0.035).unwrap(), Plan::Plan2.scheme(0.035));
        assert_eq!(table.scheme("PLAN5", 0.02).unwrap(), Plan::Plan5.scheme(0.02));
    }

    #[test]
    fn test_unknown_plan() {
        let table = SchemeTable::load_from_reader(TABLE.as_bytes()).unwrap();
        assert!(matches!(table.scheme("plan1", 0.035), Err(ProjectionError::UnknownPlan(_))));
    }

    #[test]
    fn test_invalid_row_rejected_on_lookup() {
        let csv = "\
Plan,RepaymentThreshold,LowerInterestThreshold,UpperInterestThreshold,RateSpread,RepaymentRate,TermMonths,InterestBasis
broken,27295,40000,40000,0.03,0.09,360,salary-banded
";
        let table = SchemeTable::load_from_reader(csv.as_bytes()).unwrap();
        assert!(matches!(
            table.scheme("broken", 0.035),
            Err(ProjectionError::DegenerateInterestBand { .. })
        ));
    }

    #[test]
    fn test_bad_basis_fails_load() {
        let csv = "\
Plan,RepaymentThreshold,LowerInterestThreshold,UpperInterestThreshold,RateSpread,RepaymentRate,TermMonths,InterestBasis
odd,27295,28470,51245,0.03,0.09,360,stepped
";
        assert!(matches!(
            SchemeTable::load_from_reader(csv.as_bytes()),
            Err(ProjectionError::UnknownInterestBasis(_))
        ));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let csv = "\
Plan,RepaymentThreshold,LowerInterestThreshold,UpperInterestThreshold,RateSpread,RepaymentRate,TermMonths,InterestBasis
plan2,lots,28470,51245,0.03,0.09,360,flat
";
        assert!(matches!(
            SchemeTable::load_from_reader(csv.as_bytes()),
            Err(ProjectionError::Csv(_))
        ));
    }
}
