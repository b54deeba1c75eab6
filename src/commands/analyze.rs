//! Game analysis command
//!
//! Summarizes a game's validators, its belief state and the best candidate rounds.

use crate::core::{CriterionCounts, ValidatorId};
use crate::solver::{Assignment, Game, Round, Solver};

/// One criterion of a validator, with how many codes it accepts
pub struct CriterionSummary {
    pub text: String,
    pub counts: CriterionCounts,
    /// Active in at least one remaining assignment
    pub possible: bool,
}

pub struct ValidatorSummary {
    pub label: char,
    pub id: ValidatorId,
    pub criteria: Vec<CriterionSummary>,
}

/// Result of analyzing a game
pub struct AnalysisResult {
    pub validators: Vec<ValidatorSummary>,
    pub assignments: Vec<Assignment>,
    /// Bits needed to single out one assignment
    pub uncertainty: f64,
    pub rounds: Vec<Round>,
}

/// Analyze the solver's current state, ranking the `top` best rounds
#[must_use]
pub fn analyze_game(solver: &Solver, top: usize) -> AnalysisResult {
    let belief = solver.belief();
    let validators = solver
        .game()
        .validators()
        .iter()
        .enumerate()
        .map(|(position, validator)| ValidatorSummary {
            label: Game::label(position),
            id: validator.id(),
            criteria: validator
                .criteria()
                .iter()
                .zip(validator.counts())
                .enumerate()
                .map(|(index, (criterion, &counts))| CriterionSummary {
                    text: criterion.to_string(),
                    counts,
                    possible: belief
                        .iter()
                        .any(|a| a.hidden().criterion(position) == index),
                })
                .collect(),
        })
        .collect();

    let uncertainty = if belief.is_empty() {
        0.0
    } else {
        (belief.len() as f64).log2()
    };

    AnalysisResult {
        validators,
        assignments: belief.as_slice().to_vec(),
        uncertainty,
        rounds: solver.ranked_rounds(top),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::SolverConfig;

    fn solver(ids: &[u32]) -> Solver {
        let catalog = Catalog::builtin().unwrap();
        let config = SolverConfig::default();
        Solver::new(&catalog, ids, config).unwrap()
    }

    #[test]
    fn summarizes_validators() {
        let result = analyze_game(&solver(&[3, 7, 10, 14]), 5);

        assert_eq!(result.validators.len(), 4);
        assert_eq!(result.validators[0].label, 'A');
        assert_eq!(result.validators[0].id, 3);
        for validator in &result.validators {
            for criterion in &validator.criteria {
                let counts = criterion.counts;
                assert_eq!(counts.satisfied + counts.unsatisfied, 125);
            }
            assert!(validator.criteria.iter().any(|c| c.possible));
        }
    }

    #[test]
    fn lists_belief_and_rounds() {
        let result = analyze_game(&solver(&[3, 7, 10, 14]), 5);
        assert_eq!(result.assignments.len(), 7);
        assert!((result.uncertainty - 7f64.log2()).abs() < 1e-12);
        assert_eq!(result.rounds.len(), 5);
        assert_eq!(result.rounds[0].to_string(), "131 A C B (2.179 bits)");
    }

    #[test]
    fn solved_game_has_no_rounds() {
        let mut s = solver(&[2, 6, 14, 17]);
        let code = "111".parse().unwrap();
        let truth = s.belief().as_slice()[0].clone();
        let criterion = truth.hidden().criterion(1);
        let answer = s.game().validator(1).check(criterion, code);
        s.update_observation(code, 1, answer).unwrap();

        let result = analyze_game(&s, 10);
        assert!(result.rounds.is_empty());
        assert_eq!(result.assignments, vec![truth]);
        assert!(result.uncertainty.abs() < f64::EPSILON);
    }
}
