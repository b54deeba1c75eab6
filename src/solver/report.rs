//! Solver summary: outcome and chronological history

use super::belief::{Assignment, Observation};
use super::engine::SolverStatus;
use crate::core::Code;

/// The observations made while testing one code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based round number
    pub number: usize,
    pub code: Code,
    pub observations: Vec<Observation>,
}

/// Summary of a solver's state and history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: SolverStatus,
    pub solution: Option<Assignment>,
    /// Belief-state size right after construction
    pub initial: usize,
    pub remaining: usize,
    pub rounds: Vec<RoundRecord>,
}

impl Report {
    /// Group a chronological observation history into rounds
    #[must_use]
    pub fn group_rounds(history: &[Observation]) -> Vec<RoundRecord> {
        let mut rounds: Vec<RoundRecord> = Vec::new();
        for observation in history {
            match rounds.last_mut() {
                Some(record) if record.number == observation.round => {
                    record.observations.push(*observation);
                }
                _ => rounds.push(RoundRecord {
                    number: observation.round,
                    code: observation.code,
                    observations: vec![*observation],
                }),
            }
        }
        rounds
    }

    /// Total number of answered queries
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.rounds.iter().map(|r| r.observations.len()).sum()
    }
}
