//! Salary growth policies by career track

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{check_rate, ProjectionError, Result};

/// Annual growth used by the steady track and as the custom default
pub const STEADY_GROWTH_RATE: f64 = 0.025;

/// Career archetypes offered to borrowers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CareerTrack {
    /// Public sector / standard progression
    Steady,
    /// Tech, finance, law: big raises early on
    FastTrack,
    /// Doctor, PhD: slow start then one large jump
    LateBloomer,
    /// Caller-supplied flat rate
    Custom,
}

impl CareerTrack {
    /// Resolve the track into a growth policy.
    ///
    /// `custom_rate` is only read for [`CareerTrack::Custom`] and falls back
    /// to [`STEADY_GROWTH_RATE`] when absent.
    pub fn growth_policy(self, custom_rate: Option<f64>) -> GrowthPolicy {
        match self {
            CareerTrack::Steady => GrowthPolicy::Flat(STEADY_GROWTH_RATE),
            CareerTrack::FastTrack => GrowthPolicy::Staged(StagedSchedule::fast_track()),
            CareerTrack::LateBloomer => GrowthPolicy::Staged(StagedSchedule::late_bloomer()),
            CareerTrack::Custom => GrowthPolicy::Custom(custom_rate.unwrap_or(STEADY_GROWTH_RATE)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerTrack::Steady => "steady",
            CareerTrack::FastTrack => "fast-track",
            CareerTrack::LateBloomer => "late-bloomer",
            CareerTrack::Custom => "custom",
        }
    }
}

impl fmt::Display for CareerTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CareerTrack {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steady" => Ok(CareerTrack::Steady),
            "fast-track" | "fast_track" | "fasttrack" => Ok(CareerTrack::FastTrack),
            "late-bloomer" | "late_bloomer" | "latebloomer" => Ok(CareerTrack::LateBloomer),
            "custom" => Ok(CareerTrack::Custom),
            _ => Err(ProjectionError::UnknownCareerTrack(s.to_string())),
        }
    }
}

/// One step of a staged schedule: `rate` applies from `from_year` until the
/// next stage begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthStage {
    pub from_year: u32,
    pub rate: f64,
}

/// Piecewise-constant growth keyed by elapsed whole years
#[derive(Debug, Clone, PartialEq)]
pub struct StagedSchedule {
    /// Sorted by `from_year`, first stage starts at year 0
    stages: Vec<GrowthStage>,
}

impl StagedSchedule {
    /// Build a schedule from `(from_year, rate)` breakpoints
    pub fn new(breakpoints: &[(u32, f64)]) -> Result<Self> {
        let first = breakpoints
            .first()
            .ok_or_else(|| ProjectionError::invalid("growth_schedule", 0.0, "needs at least one stage"))?;
        if first.0 != 0 {
            return Err(ProjectionError::invalid(
                "growth_schedule",
                first.0 as f64,
                "first stage must start at year 0",
            ));
        }
        for pair in breakpoints.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ProjectionError::invalid(
                    "growth_schedule",
                    pair[1].0 as f64,
                    "stage years must be strictly increasing",
                ));
            }
        }
        for &(_, rate) in breakpoints {
            check_rate("growth_rate", rate)?;
        }

        Ok(Self {
            stages: breakpoints
                .iter()
                .map(|&(from_year, rate)| GrowthStage { from_year, rate })
                .collect(),
        })
    }

    /// 10% for years 0-4, 5% for years 5-9, 3% after
    pub fn fast_track() -> Self {
        Self {
            stages: vec![
                GrowthStage { from_year: 0, rate: 0.10 },
                GrowthStage { from_year: 5, rate: 0.05 },
                GrowthStage { from_year: 10, rate: 0.03 },
            ],
        }
    }

    /// 1% for years 0-3, a one-off 25% at year 4, 3% after
    pub fn late_bloomer() -> Self {
        Self {
            stages: vec![
                GrowthStage { from_year: 0, rate: 0.01 },
                GrowthStage { from_year: 4, rate: 0.25 },
                GrowthStage { from_year: 5, rate: 0.03 },
            ],
        }
    }

    pub fn rate_for_year(&self, year_index: u32) -> f64 {
        let idx = self.stages.partition_point(|s| s.from_year <= year_index);
        // idx >= 1 because the first stage starts at year 0
        self.stages[idx.saturating_sub(1)].rate
    }

    pub fn stages(&self) -> &[GrowthStage] {
        &self.stages
    }
}

/// Annual multiplicative salary growth as a function of elapsed years
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthPolicy {
    /// Same rate every year
    Flat(f64),
    /// Rate looked up from a breakpoint schedule
    Staged(StagedSchedule),
    /// Caller-supplied constant rate
    Custom(f64),
}

impl GrowthPolicy {
    pub fn rate_for_year(&self, year_index: u32) -> f64 {
        match self {
            GrowthPolicy::Flat(rate) | GrowthPolicy::Custom(rate) => *rate,
            GrowthPolicy::Staged(schedule) => schedule.rate_for_year(year_index),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            GrowthPolicy::Flat(rate) | GrowthPolicy::Custom(rate) => check_rate("growth_rate", *rate),
            GrowthPolicy::Staged(schedule) => schedule
                .stages
                .iter()
                .try_for_each(|s| check_rate("growth_rate", s.rate)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_is_flat() {
        let policy = CareerTrack::Steady.growth_policy(None);
        for year in [0, 1, 4, 10, 29] {
            assert_eq!(policy.rate_for_year(year), 0.025);
        }
    }

    #[test]
    fn test_fast_track_breakpoints() {
        let policy = CareerTrack::FastTrack.growth_policy(None);
        assert_eq!(policy.rate_for_year(0), 0.10);
        assert_eq!(policy.rate_for_year(4), 0.10);
        assert_eq!(policy.rate_for_year(5), 0.05);
        assert_eq!(policy.rate_for_year(9), 0.05);
        assert_eq!(policy.rate_for_year(10), 0.03);
        assert_eq!(policy.rate_for_year(35), 0.03);
    }

    #[test]
    fn test_late_bloomer_one_off_jump() {
        let policy = CareerTrack::LateBloomer.growth_policy(None);
        assert_eq!(policy.rate_for_year(0), 0.01);
        assert_eq!(policy.rate_for_year(3), 0.01);
        assert_eq!(policy.rate_for_year(4), 0.25);
        assert_eq!(policy.rate_for_year(5), 0.03);
        assert_eq!(policy.rate_for_year(20), 0.03);
    }

    #[test]
    fn test_custom_rate() {
        assert_eq!(CareerTrack::Custom.growth_policy(Some(0.07)).rate_for_year(12), 0.07);
        assert_eq!(CareerTrack::Custom.growth_policy(None).rate_for_year(12), STEADY_GROWTH_RATE);
        // Non-custom tracks ignore the supplied rate
        assert_eq!(CareerTrack::Steady.growth_policy(Some(0.07)).rate_for_year(1), 0.025);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("fast-track".parse::<CareerTrack>().unwrap(), CareerTrack::FastTrack);
        assert_eq!("Late_Bloomer".parse::<CareerTrack>().unwrap(), CareerTrack::LateBloomer);
        assert!("Fast Track (Tech/Finance/Law)".parse::<CareerTrack>().is_err());
        assert!("steady growth".parse::<CareerTrack>().is_err());
    }

    #[test]
    fn test_schedule_validation() {
        assert!(StagedSchedule::new(&[]).is_err());
        assert!(StagedSchedule::new(&[(1, 0.02)]).is_err());
        assert!(StagedSchedule::new(&[(0, 0.02), (3, 0.04), (3, 0.01)]).is_err());
        assert!(StagedSchedule::new(&[(0, 0.02), (3, 1.5)]).is_err());

        let schedule = StagedSchedule::new(&[(0, 0.02), (3, 0.04)]).unwrap();
        assert_eq!(schedule.rate_for_year(2), 0.02);
        assert_eq!(schedule.rate_for_year(3), 0.04);
        assert_eq!(schedule.stages().len(), 2);
    }

    #[test]
    fn test_policy_validation() {
        assert!(GrowthPolicy::Custom(-0.01).validate().is_err());
        assert!(GrowthPolicy::Flat(f64::NAN).validate().is_err());
        assert!(CareerTrack::FastTrack.growth_policy(None).validate().is_ok());
    }
}
