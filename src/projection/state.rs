//! Running state of a single projection

use crate::assumptions::GrowthPolicy;
use crate::borrower::BorrowerProfile;

/// Balance and salary carried from one month to the next.
///
/// Created fresh for every run and dropped when the run ends.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current month (0-indexed)
    pub month: u32,

    /// Outstanding balance; never negative once a month has been applied
    pub balance: f64,

    /// Current annual salary
    pub salary: f64,

    /// Total counted towards repayment so far
    pub cumulative_paid: f64,
}

impl SimulationState {
    pub fn from_profile(profile: &BorrowerProfile) -> Self {
        Self {
            month: 0,
            balance: profile.initial_balance,
            salary: profile.initial_annual_salary,
            cumulative_paid: 0.0,
        }
    }

    /// Whole years elapsed since the start
    pub fn year_index(&self) -> u32 {
        self.month / 12
    }

    /// First month of every year after the first
    pub fn is_anniversary(&self) -> bool {
        self.month > 0 && self.month % 12 == 0
    }

    /// Move to `month` and apply the annual raise if it is an anniversary
    pub fn enter_month(&mut self, month: u32, growth: &GrowthPolicy) {
        self.month = month;
        if self.is_anniversary() {
            self.salary *= 1.0 + growth.rate_for_year(self.year_index());
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.balance <= 0.0
    }
}
