//! Deduction engine
//!
//! Enumerates the hidden assignments a game allows, plans query rounds by
//! entropy lookahead, and narrows the belief state as answers arrive.

mod belief;
mod engine;
mod enumerate;
mod error;
mod game;
pub mod planner;
mod report;
mod responder;

pub use belief::{Assignment, BeliefState, Hidden, Observation};
pub use engine::{DEFAULT_QUERIES_PER_ROUND, RoundOutcome, Solver, SolverConfig, SolverStatus};
pub use enumerate::{
    enumerate_assignments, filter_useless, find_useless_validator, qualifying_codes, resolve_code,
};
pub use error::{SolverError, SolverResult};
pub use game::Game;
pub use planner::{Query, Round};
pub use report::{Report, RoundRecord};
pub use responder::{GroundTruth, Responder};
