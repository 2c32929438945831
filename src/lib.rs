//! Loan Projection - repayment trajectories for income-contingent student loans
//!
//! This library provides:
//! - Month-by-month balance projection under a repayment scheme
//! - Salary growth policies by career track
//! - Salary-banded and flat interest models with plan presets
//! - Batch, overpayment-sweep and plan-comparison runners
//! - CSV/JSON export of yearly snapshots and summaries

pub mod error;
pub mod borrower;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use borrower::BorrowerProfile;
pub use assumptions::{Assumptions, CareerTrack, GrowthPolicy, Plan, SchemePolicy};
pub use projection::{
    simulate, ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary, Termination,
    Verdict, YearSnapshot,
};
pub use scenario::ScenarioRunner;
