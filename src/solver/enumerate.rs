//! Hidden-space enumeration and redundancy filtering
//!
//! Builds the initial belief state of a game by brute force over every
//! combination of active criteria, then optionally drops assignments in which
//! some validator adds no necessary constraint.

use super::belief::{Assignment, Hidden};
use super::game::Game;
use crate::core::{Code, CodeSet, Validator};
use rayon::prelude::*;
use tracing::debug;

/// Codes satisfying every `(validator, criterion)` constraint at once
pub fn qualifying_codes<'a, I>(constraints: I) -> CodeSet
where
    I: IntoIterator<Item = (&'a Validator, usize)>,
{
    constraints
        .into_iter()
        .fold(CodeSet::FULL, |codes, (validator, criterion)| {
            codes.intersection(validator.truth_set(criterion))
        })
}

/// Pick the code a hidden assignment determines
///
/// Strict mode requires exactly one qualifying code; relaxed mode takes the
/// first in lexicographic order.
#[must_use]
pub fn resolve_code(codes: CodeSet, unique: bool) -> Option<Code> {
    if unique {
        codes.single()
    } else {
        codes.first()
    }
}

/// Advance `hidden` to the next combination, last position fastest
fn advance(hidden: &mut [usize], radices: &[usize]) -> bool {
    for position in (0..hidden.len()).rev() {
        hidden[position] += 1;
        if hidden[position] < radices[position] {
            return true;
        }
        hidden[position] = 0;
    }
    false
}

/// Enumerate every hidden assignment that determines a code
///
/// Combinations are visited in lexicographic order of criterion indices.
///
/// # Examples
/// ```
/// use turing_solver::catalog::Catalog;
/// use turing_solver::solver::{Game, enumerate_assignments};
///
/// let catalog = Catalog::builtin().unwrap();
/// let game = Game::from_ids(&catalog, &[3, 7, 10, 14]).unwrap();
/// assert_eq!(enumerate_assignments(&game, true).len(), 13);
/// ```
#[must_use]
pub fn enumerate_assignments(game: &Game, filter_unique_answer: bool) -> Vec<Assignment> {
    let radices: Vec<usize> = game.validators().iter().map(Validator::len).collect();
    let mut hidden = vec![0; radices.len()];
    let mut assignments = Vec::new();
    let mut visited = 0usize;

    loop {
        visited += 1;
        let codes = qualifying_codes(game.validators().iter().zip(hidden.iter().copied()));
        if let Some(code) = resolve_code(codes, filter_unique_answer) {
            assignments.push(Assignment::new(Hidden::new(hidden.clone()), code));
        }

        if !advance(&mut hidden, &radices) {
            break;
        }
    }

    debug!(
        visited,
        kept = assignments.len(),
        unique = filter_unique_answer,
        "enumerated hidden assignments"
    );
    assignments
}

/// First validator position whose removal still leaves exactly one code
///
/// Such a validator is unnecessary for this assignment. A single-validator game
/// never has one.
#[must_use]
pub fn find_useless_validator(game: &Game, assignment: &Assignment) -> Option<usize> {
    if game.len() <= 1 {
        return None;
    }

    (0..game.len()).find(|&skipped| {
        let others = game
            .validators()
            .iter()
            .zip(assignment.hidden().as_slice().iter().copied())
            .enumerate()
            .filter(|&(position, _)| position != skipped)
            .map(|(_, constraint)| constraint);
        qualifying_codes(others).len() == 1
    })
}

/// Keep only assignments in which every validator is necessary
///
/// Runs in parallel; the original order is preserved.
#[must_use]
pub fn filter_useless(game: &Game, assignments: Vec<Assignment>) -> Vec<Assignment> {
    let before = assignments.len();
    let kept: Vec<Assignment> = assignments
        .into_par_iter()
        .filter(|assignment| match find_useless_validator(game, assignment) {
            Some(position) => {
                debug!(
                    %assignment,
                    validator = %Game::label(position),
                    "dropping assignment with useless validator"
                );
                false
            }
            None => true,
        })
        .collect();

    debug!(before, after = kept.len(), "filtered useless validators");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn game(ids: &[u32]) -> Game {
        Game::from_ids(&Catalog::builtin().unwrap(), ids).unwrap()
    }

    /// Reference count of codes satisfying a hidden assignment, straight from criteria
    fn brute_force_count(game: &Game, hidden: &[usize]) -> usize {
        Code::all()
            .filter(|&code| {
                game.validators()
                    .iter()
                    .zip(hidden)
                    .all(|(validator, &criterion)| validator.criteria()[criterion].holds(code))
            })
            .count()
    }

    fn all_hiddens(game: &Game) -> Vec<Vec<usize>> {
        let radices: Vec<usize> = game.validators().iter().map(Validator::len).collect();
        let mut hidden = vec![0; radices.len()];
        let mut out = vec![hidden.clone()];
        while advance(&mut hidden, &radices) {
            out.push(hidden.clone());
        }
        out
    }

    #[test]
    fn advance_visits_every_combination_in_order() {
        let radices = [2, 3];
        let mut hidden = vec![0, 0];
        let mut seen = vec![hidden.clone()];
        while advance(&mut hidden, &radices) {
            seen.push(hidden.clone());
        }
        assert_eq!(seen, [[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]);
    }

    #[test]
    fn single_ambiguous_validator_yields_nothing() {
        // t==1 and t>1 each leave 25 or 100 codes: never unique
        let g = game(&[1]);
        for hidden in all_hiddens(&g) {
            assert!(brute_force_count(&g, &hidden) >= 25);
        }
        assert!(enumerate_assignments(&g, true).is_empty());
    }

    #[test]
    fn pairwise_comparisons_match_brute_force() {
        let g = game(&[11, 12, 13]);
        let assignments = enumerate_assignments(&g, true);

        for hidden in all_hiddens(&g) {
            let count = brute_force_count(&g, &hidden);
            let kept = assignments
                .iter()
                .any(|a| a.hidden().as_slice() == hidden.as_slice());
            assert_eq!(kept, count == 1, "hidden {hidden:?} has {count} codes");
        }
        // t<s, t>c, s<c is circular: no code at all
        assert_eq!(brute_force_count(&g, &[0, 2, 0]), 0);
    }

    #[test]
    fn every_kept_assignment_satisfies_its_criteria() {
        let g = game(&[3, 7, 10, 14]);
        for assignment in enumerate_assignments(&g, true) {
            for (position, validator) in g.validators().iter().enumerate() {
                let criterion = assignment.hidden().criterion(position);
                assert!(validator.check(criterion, assignment.code()));
            }
            assert_eq!(brute_force_count(&g, assignment.hidden().as_slice()), 1);
        }
    }

    #[test]
    fn relaxed_mode_takes_first_code() {
        let g = game(&[4, 9, 11, 14]);
        let strict = enumerate_assignments(&g, true);
        let relaxed = enumerate_assignments(&g, false);
        assert_eq!(strict.len(), 7);
        assert_eq!(relaxed.len(), 26);

        for assignment in &relaxed {
            let hidden = assignment.hidden().as_slice().iter().copied();
            let codes = qualifying_codes(g.validators().iter().zip(hidden));
            assert_eq!(codes.first(), Some(assignment.code()));
        }
        // Every strict assignment also appears in relaxed mode
        assert!(strict.iter().all(|a| relaxed.contains(a)));
    }

    #[test]
    fn useless_validators_filtered() {
        let g = game(&[3, 7, 10, 14]);
        let all = enumerate_assignments(&g, true);
        assert_eq!(all.len(), 13);

        let kept = filter_useless(&g, all.clone());
        assert_eq!(kept.len(), 7);
        assert_eq!(kept[0].hidden().as_slice(), &[0, 0, 0, 0]);
        assert_eq!(kept[0].code().to_string(), "122");

        // Kept order follows enumeration order
        let positions: Vec<usize> = kept
            .iter()
            .map(|k| all.iter().position(|a| a == k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn filtered_game_of_four() {
        let g = game(&[4, 9, 11, 14]);
        let kept = filter_useless(&g, enumerate_assignments(&g, true));
        let summary: Vec<String> = kept.iter().map(ToString::to_string).collect();
        assert_eq!(summary, vec!["(0, 0, 1, 2) => 221", "(1, 0, 0, 2) => 241"]);
    }

    #[test]
    fn single_validator_never_useless() {
        let g = game(&[20]);
        let assignment = Assignment::new(Hidden::new(vec![0]), "111".parse().unwrap());
        assert_eq!(find_useless_validator(&g, &assignment), None);
    }
}
