//! Borrower data structures and cohort loading

mod data;
pub mod loader;

pub use data::BorrowerProfile;
pub use loader::{load_cohort, load_cohort_from_reader, CohortMember};
