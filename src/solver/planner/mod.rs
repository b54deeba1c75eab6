//! Entropy-guided query planning
//!
//! Scores candidate queries by the binary entropy of the answer they would
//! produce and searches rounds of up to K queries with depth-bounded lookahead.

mod entropy;
mod lookahead;

pub use entropy::{SplitCounts, binary_entropy};
pub use lookahead::{Query, Round, explore, plan_round, rank_rounds};
