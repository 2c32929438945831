//! Borrower profile supplied to a single projection run

use serde::{Deserialize, Serialize};

use crate::error::{check_money, Result};

/// Loan and earnings position of one borrower at the start of repayment.
///
/// Immutable for the duration of a run; the engine copies what it needs
/// into its own [`SimulationState`](crate::projection::SimulationState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    /// Identifier used when running cohorts (0 for ad-hoc runs)
    #[serde(default)]
    pub borrower_id: u32,

    /// Outstanding loan balance at month 0
    pub initial_balance: f64,

    /// Gross annual salary at month 0
    pub initial_annual_salary: f64,

    /// Voluntary payment made every month on top of the mandatory deduction
    #[serde(default)]
    pub monthly_overpayment: f64,
}

impl BorrowerProfile {
    /// Create a profile with no voluntary overpayment
    pub fn new(initial_balance: f64, initial_annual_salary: f64) -> Self {
        Self {
            borrower_id: 0,
            initial_balance,
            initial_annual_salary,
            monthly_overpayment: 0.0,
        }
    }

    pub fn with_overpayment(mut self, monthly_overpayment: f64) -> Self {
        self.monthly_overpayment = monthly_overpayment;
        self
    }

    pub fn with_id(mut self, borrower_id: u32) -> Self {
        self.borrower_id = borrower_id;
        self
    }

    /// Check every amount is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        check_money("initial_balance", self.initial_balance)?;
        check_money("initial_annual_salary", self.initial_annual_salary)?;
        check_money("monthly_overpayment", self.monthly_overpayment)?;
        Ok(())
    }
}
