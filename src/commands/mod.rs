//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod simple;
pub mod solve;

pub use analyze::{AnalysisResult, analyze_game};
pub use benchmark::{BenchmarkResult, run_benchmark, select_truths};
pub use simple::{run_session, run_simple};
pub use solve::{SolveConfig, SolveResult, Target, solve_assignment, solve_game};
