//! Scenario runner for batch projections
//!
//! Holds one set of base assumptions and runs many borrowers, overpayment
//! levels or plans against it. Every run is independent, so batches are
//! spread across threads with rayon.

use std::time::Instant;

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::{Assumptions, CareerTrack, Plan, SchemePolicy};
use crate::borrower::{BorrowerProfile, CohortMember};
use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary};

/// Outcome of one point in an overpayment sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverpaymentPoint {
    pub monthly_overpayment: f64,
    pub summary: ProjectionSummary,
}

/// Outcome of one plan in a plan comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub summary: ProjectionSummary,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Assumptions::default_plan2());
/// let sweep = runner.sweep_overpayments(&profile, &[0.0, 100.0, 250.0, 500.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
            config: ProjectionConfig::default(),
        }
    }

    /// Runner for one scheme with steady-career growth.
    ///
    /// Cohort runs ignore the growth and use each member's own career track.
    pub fn for_scheme(scheme: SchemePolicy) -> Self {
        Self::new(Assumptions::new(scheme, CareerTrack::Steady.growth_policy(None)))
    }

    pub fn with_config(mut self, config: ProjectionConfig) -> Self {
        self.config = config;
        self
    }

    fn engine(&self, assumptions: Assumptions) -> ProjectionEngine {
        ProjectionEngine::new(assumptions, self.config.clone())
    }

    /// Run a single projection with the base assumptions
    pub fn run(&self, profile: &BorrowerProfile) -> Result<ProjectionResult> {
        self.engine(self.base_assumptions.clone()).project(profile)
    }

    /// Run many borrowers under the same assumptions
    pub fn run_batch(&self, profiles: &[BorrowerProfile]) -> Result<Vec<ProjectionResult>> {
        let start = Instant::now();
        let engine = self.engine(self.base_assumptions.clone());
        let results = profiles
            .par_iter()
            .map(|profile| engine.project(profile))
            .collect::<Result<Vec<_>>>()?;

        info!("projected {} borrowers in {:?}", results.len(), start.elapsed());
        Ok(results)
    }

    /// Run a cohort where each member carries their own career track
    pub fn run_cohort(&self, members: &[CohortMember]) -> Result<Vec<ProjectionResult>> {
        let start = Instant::now();
        let results = members
            .par_iter()
            .map(|member| {
                let assumptions =
                    Assumptions::new(self.base_assumptions.scheme.clone(), member.growth_policy());
                self.engine(assumptions).project(&member.profile)
            })
            .collect::<Result<Vec<_>>>()?;

        info!("projected cohort of {} in {:?}", results.len(), start.elapsed());
        Ok(results)
    }

    /// Re-run one borrower at each monthly overpayment amount, in input order
    pub fn sweep_overpayments(
        &self,
        profile: &BorrowerProfile,
        amounts: &[f64],
    ) -> Result<Vec<OverpaymentPoint>> {
        let engine = self.engine(self.base_assumptions.clone());
        amounts
            .par_iter()
            .map(|&amount| -> Result<OverpaymentPoint> {
                let result = engine.project(&profile.clone().with_overpayment(amount))?;
                Ok(OverpaymentPoint {
                    monthly_overpayment: amount,
                    summary: result.summary(),
                })
            })
            .collect()
    }

    /// Run one borrower under several plan presets at the base rate
    /// and growth of the base assumptions
    pub fn compare_plans(&self, profile: &BorrowerProfile, plans: &[Plan]) -> Result<Vec<PlanOutcome>> {
        let base_rate = self.base_assumptions.scheme.base_rate;
        plans
            .par_iter()
            .map(|&plan| -> Result<PlanOutcome> {
                let assumptions = Assumptions::new(plan.scheme(base_rate), self.base_assumptions.growth.clone());
                let result = self.engine(assumptions).project(profile)?;
                Ok(PlanOutcome {
                    plan,
                    summary: result.summary(),
                })
            })
            .collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(Assumptions::default_plan2())
    }
}
