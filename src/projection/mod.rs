//! Projection engine for borrower repayment trajectories

mod state;
mod engine;
mod cashflows;
mod irr;

pub use state::SimulationState;
pub use engine::{simulate, ProjectionConfig, ProjectionEngine};
pub use cashflows::{
    MonthRow, ProjectionResult, ProjectionSummary, Termination, Verdict, YearSnapshot,
    DEBT_TRAP_MULTIPLE,
};
pub use irr::calculate_irr;
