//! Economic and career assumptions: repayment scheme plus salary growth

mod growth;
mod scheme;
pub mod loader;

pub use growth::{CareerTrack, GrowthPolicy, GrowthStage, StagedSchedule, STEADY_GROWTH_RATE};
pub use scheme::{InterestBasis, Plan, SchemePolicy, MAX_TERM_MONTHS};
pub use loader::SchemeTable;

use crate::error::Result;

/// Container for everything a projection assumes beyond the borrower
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub scheme: SchemePolicy,
    pub growth: GrowthPolicy,
}

impl Assumptions {
    pub fn new(scheme: SchemePolicy, growth: GrowthPolicy) -> Self {
        Self { scheme, growth }
    }

    /// Preset plan at `base_rate` with the growth of a career track
    pub fn for_plan(plan: Plan, base_rate: f64, career: CareerTrack, custom_rate: Option<f64>) -> Self {
        Self {
            scheme: plan.scheme(base_rate),
            growth: career.growth_policy(custom_rate),
        }
    }

    /// Standard plan, steady career, 3.5% base rate
    pub fn default_plan2() -> Self {
        Self::for_plan(Plan::Plan2, 0.035, CareerTrack::Steady, None)
    }

    pub fn validate(&self) -> Result<()> {
        self.scheme.validate()?;
        self.growth.validate()
    }
}
