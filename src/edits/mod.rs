//! Planning and applying reference insertions.

pub mod commit;
pub mod planner;

pub use commit::{CommitSummary, Transaction};
pub use planner::{include_line, plan, INCLUDE_PREFIX};
