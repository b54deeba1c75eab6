//! Scripted solving command
//!
//! Plays a game against a known ground truth and records every round.

use crate::core::Code;
use crate::solver::{Assignment, GroundTruth, Hidden, Query, Report, Round, Solver};
use anyhow::{Result, anyhow};

/// Which assignment the responder answers from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Hidden(Hidden),
    /// First assignment in the belief state with this code
    Code(Code),
}

/// Configuration for solving against a ground truth
pub struct SolveConfig {
    pub target: Target,
    pub max_rounds: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: Target) -> Self {
        Self {
            target,
            max_rounds: 10,
        }
    }
}

/// One answered query
#[derive(Debug, Clone)]
pub struct QueryStep {
    pub query: Query,
    pub result: bool,
    pub before: usize,
    pub after: usize,
}

/// One played round
#[derive(Debug, Clone)]
pub struct RoundStep {
    pub round: Round,
    pub queries: Vec<QueryStep>,
    /// Planned queries the guard dropped
    pub skipped: Vec<Query>,
}

/// Result of a scripted solve
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub success: bool,
    pub truth: Assignment,
    pub rounds: Vec<RoundStep>,
    pub report: Report,
}

impl SolveResult {
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.rounds.iter().map(|r| r.queries.len()).sum()
    }
}

/// Find the ground-truth assignment named by `target`
///
/// # Errors
/// Returns an error if no assignment in the belief state matches.
pub fn find_truth(solver: &Solver, target: &Target) -> Result<Assignment> {
    let found = match target {
        Target::Hidden(hidden) => solver.belief().iter().find(|a| a.hidden() == hidden),
        Target::Code(code) => solver.belief().iter().find(|a| a.code() == *code),
    };
    found.cloned().ok_or_else(|| match target {
        Target::Hidden(hidden) => anyhow!("hidden {hidden} is not a possible assignment"),
        Target::Code(code) => anyhow!("no possible assignment has code {code}"),
    })
}

/// Play rounds against `truth` until solved or `max_rounds` is reached
///
/// # Errors
/// Returns an error if the solver gets stuck or the answers contradict.
pub fn solve_assignment(
    solver: &Solver,
    truth: Assignment,
    max_rounds: usize,
) -> Result<SolveResult> {
    let mut solver = solver.clone();
    let mut responder = GroundTruth::new(solver.game(), truth.clone());
    let mut rounds = Vec::new();

    while rounds.len() < max_rounds {
        let Some(round) = solver.plan_round()? else {
            break;
        };

        let mut before = solver.belief().len();
        let outcome = solver.play_round(&round, &mut responder)?;
        let queries = outcome
            .asked
            .iter()
            .map(|observation| {
                let step = QueryStep {
                    query: Query {
                        code: observation.code,
                        validator: observation.validator,
                    },
                    result: observation.result,
                    before,
                    after: observation.remaining,
                };
                before = observation.remaining;
                step
            })
            .collect();

        rounds.push(RoundStep {
            round,
            queries,
            skipped: outcome.skipped,
        });
    }

    Ok(SolveResult {
        success: solver.solution() == Some(&truth),
        truth,
        rounds,
        report: solver.report(),
    })
}

/// Solve the game for the assignment named in `config`
///
/// # Errors
/// Returns an error if the target is not a possible assignment or the solver
/// fails along the way.
pub fn solve_game(config: SolveConfig, solver: &Solver) -> Result<SolveResult> {
    let truth = find_truth(solver, &config.target)?;
    solve_assignment(solver, truth, config.max_rounds)
}
