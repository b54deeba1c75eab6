//! Answer sources for posed queries

use super::belief::Assignment;
use super::error::{SolverError, SolverResult};
use super::game::Game;
use super::planner::Query;
use crate::core::CodeSet;

/// Something that answers queries: a human at a prompt, or a known solution
pub trait Responder {
    /// Answer whether `query.code` satisfies the active criterion of
    /// validator `query.validator`
    ///
    /// # Errors
    /// Returns `SolverError::Aborted` (or another error) if no answer is available.
    fn answer(&mut self, query: &Query) -> SolverResult<bool>;
}

impl<F> Responder for F
where
    F: FnMut(&Query) -> SolverResult<bool>,
{
    fn answer(&mut self, query: &Query) -> SolverResult<bool> {
        self(query)
    }
}

/// Scripted answers from a known assignment
#[derive(Debug, Clone)]
pub struct GroundTruth {
    assignment: Assignment,
    active: Vec<CodeSet>,
}

impl GroundTruth {
    #[must_use]
    pub fn new(game: &Game, assignment: Assignment) -> Self {
        let active = game
            .validators()
            .iter()
            .enumerate()
            .map(|(position, validator)| {
                validator.truth_set(assignment.hidden().criterion(position))
            })
            .collect();
        Self { assignment, active }
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}

impl Responder for GroundTruth {
    fn answer(&mut self, query: &Query) -> SolverResult<bool> {
        self.active
            .get(query.validator)
            .map(|codes| codes.contains(query.code))
            .ok_or(SolverError::InvalidValidator {
                position: query.validator,
                count: self.active.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::belief::Hidden;

    #[test]
    fn ground_truth_answers_from_active_criteria() {
        let game = Game::from_ids(&Catalog::builtin().unwrap(), &[5, 11]).unwrap();
        // even(t), t>s
        let truth = Assignment::new(Hidden::new(vec![0, 2]), "211".parse().unwrap());
        let mut responder = GroundTruth::new(&game, truth);

        let ask = |code: &str, validator| Query {
            code: code.parse().unwrap(),
            validator,
        };
        assert_eq!(responder.answer(&ask("411", 0)), Ok(true));
        assert_eq!(responder.answer(&ask("311", 0)), Ok(false));
        assert_eq!(responder.answer(&ask("311", 1)), Ok(true));
        assert_eq!(responder.answer(&ask("133", 1)), Ok(false));
        assert_eq!(
            responder.answer(&ask("111", 2)),
            Err(SolverError::InvalidValidator {
                position: 2,
                count: 2
            })
        );
    }

    #[test]
    fn closures_are_responders() {
        let mut asked = 0;
        let mut always_yes = |_: &Query| -> SolverResult<bool> {
            asked += 1;
            Ok(true)
        };
        let query = Query {
            code: "123".parse().unwrap(),
            validator: 0,
        };
        assert_eq!(always_yes.answer(&query), Ok(true));
        assert_eq!(always_yes.answer(&query), Ok(true));
        drop(always_yes);
        assert_eq!(asked, 2);
    }
}
