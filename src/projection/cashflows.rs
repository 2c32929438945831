//! Output structures for projections

use serde::{Deserialize, Serialize};

use super::irr::calculate_irr;

/// Multiple above which an uncleared loan is reported as a debt trap
pub const DEBT_TRAP_MULTIPLE: f64 = 2.0;

/// Detail of a single simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: u32,
    pub year: u32,
    pub salary: f64,
    /// Annual interest rate applied this month
    pub interest_rate: f64,
    pub interest: f64,
    pub mandatory_payment: f64,
    pub overpayment: f64,
    /// Amount counted towards the loan (capped at what clears it)
    pub payment: f64,
    pub balance: f64,
    pub cumulative_paid: f64,
}

/// One recorded point of the trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub year: u32,
    pub month: u32,
    pub balance: f64,
    pub cumulative_paid: f64,
    pub salary: f64,
    /// The recorded month's interest scaled to a year
    pub annualized_interest: f64,
}

impl YearSnapshot {
    pub fn from_row(row: &MonthRow) -> Self {
        Self {
            year: row.year,
            month: row.month,
            balance: row.balance,
            cumulative_paid: row.cumulative_paid,
            salary: row.salary,
            annualized_interest: row.interest * 12.0,
        }
    }
}

/// How a projection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Termination {
    /// Balance reached zero during `month` (0-indexed)
    Cleared { month: u32 },
    /// Ran the full term; the remaining balance is written off
    TermExhausted,
}

/// Headline classification shown to the borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Not cleared and repaid more than twice the original balance
    DebtTrap,
    /// Not cleared; repayments behave like a tax on income
    LifetimeTax,
    /// Cleared within the term
    EscapeArtist,
}

impl Verdict {
    pub fn classify(termination: Termination, multiple: f64) -> Self {
        match termination {
            Termination::Cleared { .. } => Verdict::EscapeArtist,
            Termination::TermExhausted if multiple > DEBT_TRAP_MULTIPLE => Verdict::DebtTrap,
            Termination::TermExhausted => Verdict::LifetimeTax,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::DebtTrap => "The Debt Trap",
            Verdict::LifetimeTax => "The Lifetime Tax",
            Verdict::EscapeArtist => "The Escape Artist",
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub borrower_id: u32,
    pub initial_balance: f64,

    /// Snapshots ascending by month; first is month 0, last is the final month
    pub snapshots: Vec<YearSnapshot>,

    /// Monthly detail, only filled when the engine runs with `detailed_output`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<MonthRow>,

    /// Payment counted in each simulated month; its length is the month count
    #[serde(default)]
    pub payments: Vec<f64>,

    pub final_balance: f64,
    pub total_paid: f64,
    pub termination: Termination,
}

impl ProjectionResult {
    pub fn new(borrower_id: u32, initial_balance: f64) -> Self {
        Self {
            borrower_id,
            initial_balance,
            snapshots: Vec::new(),
            monthly: Vec::new(),
            payments: Vec::new(),
            final_balance: initial_balance,
            total_paid: 0.0,
            termination: Termination::TermExhausted,
        }
    }

    pub fn add_snapshot(&mut self, snapshot: YearSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn add_row(&mut self, row: MonthRow) {
        self.monthly.push(row);
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self.termination, Termination::Cleared { .. })
    }

    pub fn months_simulated(&self) -> u32 {
        self.payments.len() as u32
    }

    /// Total paid over the original balance; 0 for a zero balance
    pub fn multiple(&self) -> f64 {
        if self.initial_balance > 0.0 {
            self.total_paid / self.initial_balance
        } else {
            0.0
        }
    }

    /// Balance forgiven at the end of the term
    pub fn written_off(&self) -> f64 {
        match self.termination {
            Termination::Cleared { .. } => 0.0,
            Termination::TermExhausted => self.final_balance,
        }
    }

    /// Years taken to clear, counting the clearance year itself
    pub fn clearance_year(&self) -> Option<u32> {
        match self.termination {
            Termination::Cleared { month } => Some(month / 12 + 1),
            Termination::TermExhausted => None,
        }
    }

    /// Annual rate equating the balance borrowed with the payments made.
    ///
    /// Payments are taken at the end of each month; a written-off balance
    /// counts as never repaid.
    pub fn effective_annual_rate(&self) -> Option<f64> {
        if self.initial_balance <= 0.0 {
            return None;
        }
        let mut cashflows = Vec::with_capacity(self.payments.len() + 1);
        cashflows.push(self.initial_balance);
        cashflows.extend(self.payments.iter().map(|p| -p));
        calculate_irr(&cashflows, 12)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.termination, self.multiple())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            borrower_id: self.borrower_id,
            initial_balance: self.initial_balance,
            total_paid: self.total_paid,
            final_balance: self.final_balance,
            written_off: self.written_off(),
            multiple: self.multiple(),
            months_simulated: self.months_simulated(),
            clearance_year: self.clearance_year(),
            effective_annual_rate: self.effective_annual_rate(),
            verdict: self.verdict(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub borrower_id: u32,
    pub initial_balance: f64,
    pub total_paid: f64,
    pub final_balance: f64,
    pub written_off: f64,
    pub multiple: f64,
    pub months_simulated: u32,
    pub clearance_year: Option<u32>,
    pub effective_annual_rate: Option<f64>,
    pub verdict: Verdict,
}
