//! Repayment scheme parameters, plan presets and the rate/repayment model

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{check_money, check_rate, ProjectionError, Result};

/// Longest term accepted by validation (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// How the scheme sets the interest rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestBasis {
    /// Base rate plus a spread that scales linearly across the salary band
    SalaryBanded,
    /// Base rate regardless of salary
    Flat,
}

impl FromStr for InterestBasis {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary-banded" | "banded" => Ok(InterestBasis::SalaryBanded),
            "flat" => Ok(InterestBasis::Flat),
            _ => Err(ProjectionError::UnknownInterestBasis(s.to_string())),
        }
    }
}

/// Thresholds, rates and term governing one repayment regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemePolicy {
    /// Annual salary below which nothing is deducted
    pub repayment_threshold: f64,
    /// Salary at or below which interest is the base rate
    pub lower_interest_threshold: f64,
    /// Salary at or above which interest is base rate + full spread
    pub upper_interest_threshold: f64,
    /// Economy-wide reference rate (RPI)
    pub base_rate: f64,
    /// Maximum rate added on top of the base rate
    pub rate_spread: f64,
    /// Fraction of salary above the threshold collected
    pub repayment_rate: f64,
    /// Months until the remaining balance is written off
    pub term_months: u32,
    pub interest_basis: InterestBasis,
}

impl SchemePolicy {
    pub fn validate(&self) -> Result<()> {
        check_money("repayment_threshold", self.repayment_threshold)?;
        check_money("lower_interest_threshold", self.lower_interest_threshold)?;
        check_money("upper_interest_threshold", self.upper_interest_threshold)?;
        check_rate("base_rate", self.base_rate)?;
        check_rate("rate_spread", self.rate_spread)?;
        check_rate("repayment_rate", self.repayment_rate)?;

        if self.term_months == 0 {
            return Err(ProjectionError::invalid("term_months", 0.0, "must be positive"));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(ProjectionError::invalid(
                "term_months",
                self.term_months as f64,
                "exceeds the 600 month limit",
            ));
        }

        if self.lower_interest_threshold > self.upper_interest_threshold {
            return Err(ProjectionError::invalid(
                "upper_interest_threshold",
                self.upper_interest_threshold,
                "must not be below the lower interest threshold",
            ));
        }
        if self.interest_basis == InterestBasis::SalaryBanded
            && self.upper_interest_threshold <= self.lower_interest_threshold
        {
            return Err(ProjectionError::DegenerateInterestBand {
                lower: self.lower_interest_threshold,
                upper: self.upper_interest_threshold,
            });
        }

        Ok(())
    }

    /// Annual interest rate for a salary, always within
    /// `[base_rate, base_rate + rate_spread]`
    pub fn rate_for_salary(&self, salary: f64) -> f64 {
        if self.interest_basis == InterestBasis::Flat {
            return self.base_rate;
        }

        if salary <= self.lower_interest_threshold {
            self.base_rate
        } else if salary >= self.upper_interest_threshold {
            self.base_rate + self.rate_spread
        } else {
            let scale = (salary - self.lower_interest_threshold)
                / (self.upper_interest_threshold - self.lower_interest_threshold);
            self.base_rate + self.rate_spread * scale
        }
    }

    /// Deduction owed for one month at the given annual salary
    pub fn mandatory_repayment(&self, salary: f64) -> f64 {
        let excess = salary / 12.0 - self.repayment_threshold / 12.0;
        (excess * self.repayment_rate).max(0.0)
    }

    /// Mandatory deduction plus the voluntary overpayment.
    /// The overpayment applies even below the repayment threshold.
    pub fn monthly_repayment(&self, salary: f64, overpayment: f64) -> f64 {
        self.mandatory_repayment(salary) + overpayment
    }
}

/// Named repayment plans with preset thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    /// Standard plan: salary-banded interest, 30-year term
    Plan2,
    /// Later-cohort plan: interest at the base rate, 40-year term
    Plan5,
}

impl Plan {
    /// Scheme parameters for this plan at the given base rate
    pub fn scheme(self, base_rate: f64) -> SchemePolicy {
        match self {
            Plan::Plan2 => SchemePolicy {
                repayment_threshold: 27_295.0,
                lower_interest_threshold: 28_470.0,
                upper_interest_threshold: 51_245.0,
                base_rate,
                rate_spread: 0.03,
                repayment_rate: 0.09,
                term_months: 360,
                interest_basis: InterestBasis::SalaryBanded,
            },
            Plan::Plan5 => SchemePolicy {
                repayment_threshold: 25_000.0,
                lower_interest_threshold: 25_000.0,
                upper_interest_threshold: 25_000.0,
                base_rate,
                rate_spread: 0.0,
                repayment_rate: 0.09,
                term_months: 480,
                interest_basis: InterestBasis::Flat,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Plan2 => "plan2",
            Plan::Plan5 => "plan5",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plan2" | "plan-2" | "standard" => Ok(Plan::Plan2),
            "plan5" | "plan-5" | "extended" | "flat-rate" => Ok(Plan::Plan5),
            _ => Err(ProjectionError::UnknownPlan(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_band_boundaries_exact() {
        for &(base, spread) in &[(0.035, 0.03), (0.0, 0.0), (0.123, 0.071), (1.0, 0.0)] {
            let mut scheme = Plan::Plan2.scheme(base);
            scheme.rate_spread = spread;
            assert_eq!(scheme.rate_for_salary(scheme.lower_interest_threshold), base);
            assert_eq!(scheme.rate_for_salary(scheme.upper_interest_threshold), base + spread);
        }
    }

    #[test]
    fn test_band_interpolation() {
        let scheme = Plan::Plan2.scheme(0.035);
        let midpoint = (28_470.0 + 51_245.0) / 2.0;
        assert_relative_eq!(scheme.rate_for_salary(midpoint), 0.05, epsilon = 1e-12);
        assert_eq!(scheme.rate_for_salary(10_000.0), 0.035);
        assert_eq!(scheme.rate_for_salary(100_000.0), 0.065);
    }

    #[test]
    fn test_flat_basis_ignores_salary() {
        let scheme = Plan::Plan5.scheme(0.04);
        for salary in [0.0, 25_000.0, 60_000.0, 250_000.0] {
            assert_eq!(scheme.rate_for_salary(salary), 0.04);
        }
    }

    #[test]
    fn test_mandatory_repayment() {
        let scheme = Plan::Plan2.scheme(0.035);
        assert_relative_eq!(
            scheme.mandatory_repayment(30_000.0),
            (30_000.0 - 27_295.0) / 12.0 * 0.09,
            epsilon = 1e-9
        );
        assert_eq!(scheme.mandatory_repayment(27_295.0), 0.0);
        assert_eq!(scheme.mandatory_repayment(12_000.0), 0.0);
    }

    #[test]
    fn test_overpayment_not_gated_by_threshold() {
        let scheme = Plan::Plan2.scheme(0.035);
        assert_eq!(scheme.monthly_repayment(10_000.0, 100.0), 100.0);
        assert_relative_eq!(
            scheme.monthly_repayment(30_000.0, 100.0),
            scheme.mandatory_repayment(30_000.0) + 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_presets_validate() {
        assert!(Plan::Plan2.scheme(0.035).validate().is_ok());
        assert!(Plan::Plan5.scheme(0.035).validate().is_ok());
    }

    #[test]
    fn test_degenerate_band() {
        let mut scheme = Plan::Plan2.scheme(0.035);
        scheme.upper_interest_threshold = scheme.lower_interest_threshold;
        assert!(matches!(
            scheme.validate(),
            Err(ProjectionError::DegenerateInterestBand { .. })
        ));

        scheme.upper_interest_threshold = scheme.lower_interest_threshold - 1.0;
        assert!(matches!(
            scheme.validate(),
            Err(ProjectionError::InvalidParameter { field: "upper_interest_threshold", .. })
        ));
    }

    #[test]
    fn test_invalid_rates_and_term() {
        let mut scheme = Plan::Plan2.scheme(1.2);
        assert!(scheme.validate().is_err());

        scheme.base_rate = 0.035;
        scheme.repayment_rate = -0.09;
        assert!(scheme.validate().is_err());

        scheme.repayment_rate = 0.09;
        scheme.term_months = 0;
        assert!(scheme.validate().is_err());

        scheme.term_months = MAX_TERM_MONTHS + 1;
        assert!(scheme.validate().is_err());
    }

    #[test]
    fn test_plan_parsing() {
        assert_eq!("standard".parse::<Plan>().unwrap(), Plan::Plan2);
        assert_eq!("Plan5".parse::<Plan>().unwrap(), Plan::Plan5);
        assert!(matches!("plan9".parse::<Plan>(), Err(ProjectionError::UnknownPlan(_))));
        assert_eq!("flat".parse::<InterestBasis>().unwrap(), InterestBasis::Flat);
    }
}
