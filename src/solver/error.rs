//! Solver errors

use crate::core::ValidatorId;
use thiserror::Error;

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors surfaced by the solver
///
/// `Configuration`, `Contradiction` and `NoInformation` are terminal for a
/// solver instance; start a new one with a different game to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The selected validators do not form a well-posed puzzle
    #[error("invalid game configuration: {0}")]
    Configuration(String),

    #[error("validator {0} is not in the catalog")]
    UnknownValidator(ValidatorId),

    #[error("validator position {position} out of range (game has {count} validators)")]
    InvalidValidator { position: usize, count: usize },

    /// Observations are mutually inconsistent; no assignment remains
    #[error("answers are contradictory: no possible assignment remains")]
    Contradiction,

    /// More than one assignment remains but no query can tell them apart
    #[error("no query yields information ({remaining} assignments remain)")]
    NoInformation { remaining: usize },

    /// The responder stopped answering
    #[error("aborted: {0}")]
    Aborted(String),
}
