//! Monthly repayment projection engine

use log::debug;

use super::cashflows::{MonthRow, ProjectionResult, Termination, YearSnapshot};
use super::state::SimulationState;
use crate::assumptions::{Assumptions, GrowthPolicy, SchemePolicy};
use crate::borrower::BorrowerProfile;
use crate::error::Result;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Keep a [`MonthRow`] for every simulated month
    pub detailed_output: bool,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the projection for one borrower.
    ///
    /// Inputs are validated up front; an invalid profile or assumption set
    /// returns an error before any month is simulated.
    pub fn project(&self, profile: &BorrowerProfile) -> Result<ProjectionResult> {
        profile.validate()?;
        self.assumptions.validate()?;

        let scheme = &self.assumptions.scheme;
        let mut result = ProjectionResult::new(profile.borrower_id, profile.initial_balance);
        result.payments.reserve(scheme.term_months as usize);
        let mut state = SimulationState::from_profile(profile);

        for month in 0..scheme.term_months {
            state.enter_month(month, &self.assumptions.growth);

            let row = self.calculate_month(profile, &mut state);
            let cleared = state.is_cleared();
            let last_month = cleared || month + 1 == scheme.term_months;

            result.payments.push(row.payment);
            if month % 12 == 0 || last_month {
                result.add_snapshot(YearSnapshot::from_row(&row));
            }
            if self.config.detailed_output {
                result.add_row(row);
            }

            if cleared {
                result.termination = Termination::Cleared { month };
                break;
            }
        }

        result.final_balance = state.balance;
        result.total_paid = state.cumulative_paid;

        match result.termination {
            Termination::Cleared { month } => debug!(
                "borrower {} cleared in month {} after paying {:.2}",
                profile.borrower_id, month, result.total_paid
            ),
            Termination::TermExhausted => debug!(
                "borrower {} reached the end of the term, {:.2} written off after paying {:.2}",
                profile.borrower_id, result.final_balance, result.total_paid
            ),
        }

        Ok(result)
    }

    /// Apply one month of interest and repayment to `state`.
    ///
    /// When the payment would take the balance below zero, only the amount
    /// needed to reach zero is counted as paid.
    fn calculate_month(&self, profile: &BorrowerProfile, state: &mut SimulationState) -> MonthRow {
        let scheme = &self.assumptions.scheme;

        let interest_rate = scheme.rate_for_salary(state.salary);
        let mandatory_payment = scheme.mandatory_repayment(state.salary);
        let overpayment = profile.monthly_overpayment;

        let interest = state.balance * interest_rate / 12.0;
        let due = mandatory_payment + overpayment;
        let mut balance = state.balance + interest - due;
        let mut payment = due;

        if balance <= 0.0 {
            payment = (state.balance + interest).max(0.0);
            balance = 0.0;
        }

        state.balance = balance;
        state.cumulative_paid += payment;

        MonthRow {
            month: state.month,
            year: state.year_index(),
            salary: state.salary,
            interest_rate,
            interest,
            mandatory_payment,
            overpayment,
            payment,
            balance,
            cumulative_paid: state.cumulative_paid,
        }
    }
}

/// Project one borrower under an explicit growth policy and scheme
pub fn simulate(
    profile: &BorrowerProfile,
    growth: &GrowthPolicy,
    scheme: &SchemePolicy,
) -> Result<ProjectionResult> {
    let assumptions = Assumptions::new(scheme.clone(), growth.clone());
    ProjectionEngine::new(assumptions, ProjectionConfig::default()).project(profile)
}
