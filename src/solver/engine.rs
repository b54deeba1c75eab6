//! Main solver interface

use super::belief::{Assignment, BeliefState, Observation};
use super::enumerate::{enumerate_assignments, filter_useless};
use super::error::{SolverError, SolverResult};
use super::game::Game;
use super::planner::{self, Query, Round, SplitCounts};
use super::report::Report;
use super::responder::Responder;
use crate::catalog::Catalog;
use crate::core::{Code, ValidatorId};
use std::fmt;
use tracing::{debug, info, warn};

/// Queries per round in the physical game
pub const DEFAULT_QUERIES_PER_ROUND: usize = 3;

/// Solver options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Drop hidden assignments that leave more than one code (strict mode).
    /// When off, such assignments take their lexicographically first code.
    pub filter_unique_answer: bool,
    /// Drop assignments in which some validator is unnecessary
    pub filter_useless_validators: bool,
    /// Maximum queries in one round (K); also the lookahead depth
    pub queries_per_round: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            filter_unique_answer: true,
            filter_useless_validators: true,
            queries_per_round: DEFAULT_QUERIES_PER_ROUND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Unsolved,
    Solved,
    /// No assignment is consistent with the answers
    Contradiction,
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unsolved => "unsolved",
            Self::Solved => "solved",
            Self::Contradiction => "contradiction",
        })
    }
}

/// What happened while playing one round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Observations made, in asking order
    pub asked: Vec<Observation>,
    /// Queries dropped by the guard because every remaining assignment agrees
    pub skipped: Vec<Query>,
}

/// Deduction engine for one puzzle
///
/// Owns the belief state and the observation history. Cloning is cheap enough
/// to snapshot before each answer.
///
/// # Examples
/// ```
/// use turing_solver::catalog::Catalog;
/// use turing_solver::solver::{Solver, SolverConfig};
///
/// let catalog = Catalog::builtin().unwrap();
/// let solver = Solver::new(&catalog, &[3, 7, 10, 14], SolverConfig::default()).unwrap();
/// assert_eq!(solver.belief().len(), 7);
///
/// let queries = solver.next_query();
/// assert_eq!(queries.len(), 3);
/// assert_eq!(queries[0].to_string(), "131 A");
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    game: Game,
    config: SolverConfig,
    belief: BeliefState,
    initial_size: usize,
    history: Vec<Observation>,
}

impl Solver {
    /// Build the initial belief state for the validators `ids`, in order
    ///
    /// # Errors
    /// Returns `SolverError::UnknownValidator` for an id missing from the
    /// catalog and `SolverError::Configuration` when the game is empty, K is
    /// zero, or no hidden assignment determines a code.
    pub fn new(catalog: &Catalog, ids: &[ValidatorId], config: SolverConfig) -> SolverResult<Self> {
        if ids.is_empty() {
            return Err(SolverError::Configuration(
                "no validators selected".to_string(),
            ));
        }
        if config.queries_per_round == 0 {
            return Err(SolverError::Configuration(
                "queries per round must be at least 1".to_string(),
            ));
        }

        let game = Game::from_ids(catalog, ids)?;
        let mut assignments = enumerate_assignments(&game, config.filter_unique_answer);
        if config.filter_useless_validators {
            assignments = filter_useless(&game, assignments);
        }

        if assignments.is_empty() {
            return Err(SolverError::Configuration(format!(
                "no hidden assignment of validators {ids:?} determines a unique code"
            )));
        }

        info!(validators = ?ids, assignments = assignments.len(), "solver ready");
        Ok(Self::with_belief(game, config, BeliefState::new(assignments)))
    }

    /// Solver over an explicit belief state
    pub(crate) fn with_belief(game: Game, config: SolverConfig, belief: BeliefState) -> Self {
        Self {
            game,
            config,
            initial_size: belief.len(),
            belief,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> SolverStatus {
        match self.belief.len() {
            0 => SolverStatus::Contradiction,
            1 => SolverStatus::Solved,
            _ => SolverStatus::Unsolved,
        }
    }

    /// Exactly one assignment remains
    #[must_use]
    pub fn solved(&self) -> bool {
        self.status() == SolverStatus::Solved
    }

    #[must_use]
    pub const fn belief(&self) -> &BeliefState {
        &self.belief
    }

    /// The solution, once solved
    #[must_use]
    pub fn solution(&self) -> Option<&Assignment> {
        self.belief.single()
    }

    #[must_use]
    pub const fn initial_size(&self) -> usize {
        self.initial_size
    }

    #[must_use]
    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Best next round for the current belief state
    ///
    /// Returns `Ok(None)` once solved.
    ///
    /// # Errors
    /// `SolverError::Contradiction` if no assignment remains, and
    /// `SolverError::NoInformation` if several remain but no query splits them.
    pub fn plan_round(&self) -> SolverResult<Option<Round>> {
        match self.status() {
            SolverStatus::Solved => return Ok(None),
            SolverStatus::Contradiction => return Err(SolverError::Contradiction),
            SolverStatus::Unsolved => {}
        }

        let round = planner::plan_round(
            &self.game,
            self.belief.as_slice(),
            self.config.queries_per_round,
        )
        .ok_or(SolverError::NoInformation {
            remaining: self.belief.len(),
        })?;

        info!(%round, remaining = self.belief.len(), "planned round");
        Ok(Some(round))
    }

    /// The `limit` highest-entropy candidate rounds
    #[must_use]
    pub fn ranked_rounds(&self, limit: usize) -> Vec<Round> {
        if self.status() != SolverStatus::Unsolved {
            return Vec::new();
        }
        planner::rank_rounds(
            &self.game,
            self.belief.as_slice(),
            self.config.queries_per_round,
            limit,
        )
    }

    /// Queries of the best next round
    ///
    /// Empty when solved, contradictory, or stuck; use [`Solver::plan_round`]
    /// to tell these apart.
    #[must_use]
    pub fn next_query(&self) -> Vec<Query> {
        match self.plan_round() {
            Ok(Some(round)) => round.queries(),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%err, "no query to propose");
                Vec::new()
            }
        }
    }

    /// Whether asking `code` against the validator at `position` could change
    /// the belief state
    #[must_use]
    pub fn check_should_query(&self, code: Code, position: usize) -> bool {
        if position >= self.game.len() {
            return false;
        }
        SplitCounts::tally(&self.belief, position, self.game.signature(position, code))
            .is_informative()
    }

    /// Round number for a new observation of `code` against `position`
    ///
    /// A new round starts when the code changes, the validator was already
    /// asked this round, or the round is full.
    fn round_for(&self, code: Code, position: usize) -> usize {
        let Some(last) = self.history.last() else {
            return 1;
        };
        let current: Vec<&Observation> = self
            .history
            .iter()
            .rev()
            .take_while(|o| o.round == last.round)
            .collect();

        if last.code != code
            || current.iter().any(|o| o.validator == position)
            || current.len() >= self.config.queries_per_round
        {
            last.round + 1
        } else {
            last.round
        }
    }

    /// Apply an answer and return the remaining belief size
    ///
    /// # Errors
    /// `SolverError::InvalidValidator` for an out-of-range position (nothing is
    /// recorded), `SolverError::Contradiction` when no assignment is left (the
    /// observation is still recorded).
    pub fn update_observation(
        &mut self,
        code: Code,
        position: usize,
        result: bool,
    ) -> SolverResult<usize> {
        if position >= self.game.len() {
            return Err(SolverError::InvalidValidator {
                position,
                count: self.game.len(),
            });
        }

        let round = self.round_for(code, position);
        let before = self.belief.len();
        self.belief
            .retain_consistent(position, self.game.signature(position, code), result);
        let remaining = self.belief.len();

        self.history.push(Observation {
            round,
            code,
            validator: position,
            result,
            remaining,
        });
        debug!(
            round,
            %code,
            validator = %Game::label(position),
            result,
            before,
            remaining,
            "applied observation"
        );

        match remaining {
            0 => {
                warn!(%code, validator = %Game::label(position), "answers are contradictory");
                Err(SolverError::Contradiction)
            }
            1 => {
                if let Some(solution) = self.belief.single() {
                    info!(%solution, "solved");
                }
                Ok(remaining)
            }
            _ => Ok(remaining),
        }
    }

    /// Ask a round's queries in order
    ///
    /// Queries the guard rejects are skipped; play stops early once solved.
    ///
    /// # Errors
    /// Propagates responder errors and `SolverError::Contradiction`.
    pub fn play_round<R: Responder + ?Sized>(
        &mut self,
        round: &Round,
        responder: &mut R,
    ) -> SolverResult<RoundOutcome> {
        let mut outcome = RoundOutcome::default();
        for query in round.queries() {
            if self.solved() {
                break;
            }
            if !self.check_should_query(query.code, query.validator) {
                warn!(%query, "skipping uninformative query");
                outcome.skipped.push(query);
                continue;
            }

            let answer = responder.answer(&query)?;
            self.update_observation(query.code, query.validator, answer)?;
            if let Some(observation) = self.history.last() {
                outcome.asked.push(*observation);
            }
        }
        Ok(outcome)
    }

    /// Current status, solution, and history grouped by round
    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            status: self.status(),
            solution: self.solution().cloned(),
            initial: self.initial_size,
            remaining: self.belief.len(),
            rounds: Report::group_rounds(&self.history),
        }
    }
}
