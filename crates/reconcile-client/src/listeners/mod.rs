//! Event bus consumers

mod problem_summary;

pub use problem_summary::{ProblemCounts, ProblemSummaryListener};
