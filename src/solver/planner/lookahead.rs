//! Depth-bounded lookahead over query rounds
//!
//! A round tests one code against up to K distinct validators. The search
//! walks a tree whose nodes are partial rounds: each child adds an unused
//! validator together with a result signature that some code consistent with
//! the earlier signatures produces, and splits the node's belief subset by the
//! hypothesized answer. Every node scores
//! `parent_entropy + branch_probability × H(split)`.
//!
//! The tree is walked depth-first with an explicit stack; the first-level
//! branches run in parallel and their results are concatenated in generation
//! order, so the first round found with maximal entropy is deterministic.

use super::entropy::SplitCounts;
use crate::core::{Code, Signature};
use crate::solver::belief::Assignment;
use crate::solver::game::Game;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::fmt;

/// A single query: test `code` against the validator at position `validator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub code: Code,
    pub validator: usize,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, Game::label(self.validator))
    }
}

/// A planned round: one code checked against validators in order
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub code: Code,
    pub validators: Vec<usize>,
    /// Cumulative entropy of the path that produced this round, in bits
    pub entropy: f64,
}

impl Round {
    /// The round's queries, in asking order
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.validators
            .iter()
            .map(|&validator| Query {
                code: self.code,
                validator,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        for &validator in &self.validators {
            write!(f, " {}", Game::label(validator))?;
        }
        write!(f, " ({:.3} bits)", self.entropy)
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    validator: usize,
    signature: Signature,
}

/// A node of the search tree
struct Frame<'a> {
    steps: Vec<Step>,
    /// First code producing every step's signature
    code: Option<Code>,
    belief: Vec<&'a Assignment>,
    entropy: f64,
    probability: f64,
    /// Only the true-branch copy of a node is reported as a round
    record: bool,
}

impl<'a> Frame<'a> {
    fn root(belief: &'a [Assignment]) -> Self {
        Self {
            steps: Vec::new(),
            code: None,
            belief: belief.iter().collect(),
            entropy: 0.0,
            probability: 1.0,
            record: false,
        }
    }

    fn round(&self) -> Option<Round> {
        self.code.map(|code| Round {
            code,
            validators: self.steps.iter().map(|step| step.validator).collect(),
            entropy: self.entropy,
        })
    }
}

/// One representative code per distinct signature of every unused validator,
/// among codes matching all earlier steps
fn candidates(game: &Game, steps: &[Step]) -> Vec<(Step, Code)> {
    let consistent: Vec<Code> = Code::all()
        .filter(|&code| {
            steps
                .iter()
                .all(|step| game.signature(step.validator, code) == step.signature)
        })
        .collect();

    let mut out = Vec::new();
    for validator in 0..game.len() {
        if steps.iter().any(|step| step.validator == validator) {
            continue;
        }
        let mut seen = FxHashSet::default();
        for &code in &consistent {
            let signature = game.signature(validator, code);
            if seen.insert(signature) {
                out.push((
                    Step {
                        validator,
                        signature,
                    },
                    code,
                ));
            }
        }
    }
    out
}

/// Child nodes of `frame` as (true branch, false branch) pairs in generation order
fn expand<'a>(game: &Game, frame: &Frame<'a>) -> Vec<(Frame<'a>, Frame<'a>)> {
    candidates(game, &frame.steps)
        .into_iter()
        .filter_map(|(step, code)| {
            let split = SplitCounts::tally(
                frame.belief.iter().copied(),
                step.validator,
                step.signature,
            );
            if !split.is_informative() {
                return None;
            }

            let p = split.probability();
            let entropy = frame.entropy + frame.probability * split.entropy();
            let (on_true, on_false): (Vec<&Assignment>, Vec<&Assignment>) = frame
                .belief
                .iter()
                .copied()
                .partition(|assignment| assignment.predicts(step.validator, step.signature, true));

            let mut steps = frame.steps.clone();
            steps.push(step);

            Some((
                Frame {
                    steps: steps.clone(),
                    code: Some(code),
                    belief: on_true,
                    entropy,
                    probability: p,
                    record: true,
                },
                Frame {
                    steps,
                    code: Some(code),
                    belief: on_false,
                    entropy,
                    probability: 1.0 - p,
                    record: false,
                },
            ))
        })
        .collect()
}

fn push_children<'a>(stack: &mut Vec<Frame<'a>>, children: Vec<(Frame<'a>, Frame<'a>)>) {
    // Reversed so the first child's true branch is popped first
    for (on_true, on_false) in children.into_iter().rev() {
        stack.push(on_false);
        stack.push(on_true);
    }
}

fn walk(game: &Game, mut stack: Vec<Frame<'_>>, depth: usize) -> Vec<Round> {
    let mut rounds = Vec::new();
    while let Some(frame) = stack.pop() {
        if frame.record {
            rounds.extend(frame.round());
        }
        if frame.steps.len() < depth {
            let children = expand(game, &frame);
            push_children(&mut stack, children);
        }
    }
    rounds
}

/// Every informative round of up to `depth` queries, in generation order
///
/// Order is validator position, then code discovery order, depth-first with
/// the true branch before the false branch.
#[must_use]
pub fn explore(game: &Game, belief: &[Assignment], depth: usize) -> Vec<Round> {
    if depth == 0 {
        return Vec::new();
    }

    let root = Frame::root(belief);
    expand(game, &root)
        .into_par_iter()
        .map(|(on_true, on_false)| walk(game, vec![on_false, on_true], depth))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// The round with maximum cumulative entropy, first found on ties
///
/// Returns `None` when no query splits the belief state.
#[must_use]
pub fn plan_round(game: &Game, belief: &[Assignment], depth: usize) -> Option<Round> {
    // `>=` keeps the incumbent: first found wins on ties
    explore(game, belief, depth)
        .into_iter()
        .fold(None, |best: Option<Round>, round| match best {
            Some(best) if best.entropy >= round.entropy => Some(best),
            _ => Some(round),
        })
}

/// The `limit` best rounds, highest entropy first (ties in generation order)
#[must_use]
pub fn rank_rounds(game: &Game, belief: &[Assignment], depth: usize, limit: usize) -> Vec<Round> {
    let mut rounds = explore(game, belief, depth);
    rounds.sort_by(|a, b| b.entropy.total_cmp(&a.entropy));
    rounds.truncate(limit);
    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::belief::Hidden;
    use crate::solver::enumerate::{enumerate_assignments, filter_useless};

    fn game(ids: &[u32]) -> Game {
        Game::from_ids(&Catalog::builtin().unwrap(), ids).unwrap()
    }

    fn assignment(hidden: &[usize], code: &str) -> Assignment {
        Assignment::new(Hidden::new(hidden.to_vec()), code.parse().unwrap())
    }

    /// Parity of t (A) with t==1 / t>1 (B): A splits 2/2, B splits 3/1
    fn parity_belief() -> Vec<Assignment> {
        vec![
            assignment(&[0, 1], "211"),
            assignment(&[1, 1], "311"),
            assignment(&[1, 0], "111"),
            assignment(&[0, 1], "411"),
        ]
    }

    #[test]
    fn prefers_even_split() {
        let g = game(&[5, 1]);
        let round = plan_round(&g, &parity_belief(), 1).unwrap();
        assert_eq!(round.validators, vec![0]);
        assert!((round.entropy - 1.0).abs() < 1e-12);
        // 111 (odd) and 211 (even) both split A evenly; discovery order wins
        assert_eq!(round.code.to_string(), "111");
    }

    #[test]
    fn prefers_even_split_regardless_of_order() {
        let g = game(&[1, 5]);
        let belief: Vec<Assignment> = parity_belief()
            .into_iter()
            .map(|a| {
                let h = a.hidden().as_slice();
                Assignment::new(Hidden::new(vec![h[1], h[0]]), a.code())
            })
            .collect();

        let round = plan_round(&g, &belief, 1).unwrap();
        assert_eq!(round.validators, vec![1]);
        assert_eq!(round.code.to_string(), "111");
    }

    #[test]
    fn uneven_split_scores_less() {
        let g = game(&[5, 1]);
        let rounds = explore(&g, &parity_belief(), 1);
        // A: one signature per parity; B: one per criterion
        assert_eq!(rounds.len(), 4);
        let b_rounds: Vec<&Round> = rounds.iter().filter(|r| r.validators == [1]).collect();
        assert_eq!(b_rounds.len(), 2);
        for round in b_rounds {
            assert!((round.entropy - 0.811_278_124_459_132_8).abs() < 1e-12);
        }
    }

    #[test]
    fn no_round_when_nothing_splits() {
        let g = game(&[5, 1]);
        let belief = vec![assignment(&[0, 1], "211"), assignment(&[0, 1], "411")];
        assert!(explore(&g, &belief, 3).is_empty());
        assert!(plan_round(&g, &belief, 3).is_none());
    }

    #[test]
    fn zero_depth_explores_nothing() {
        let g = game(&[5, 1]);
        assert!(plan_round(&g, &parity_belief(), 0).is_none());
    }

    #[test]
    fn round_queries_share_one_code() {
        let g = game(&[3, 7, 10, 14]);
        let belief = filter_useless(&g, enumerate_assignments(&g, true));
        let round = plan_round(&g, &belief, 3).unwrap();

        assert_eq!(round.code.to_string(), "131");
        assert_eq!(round.validators, vec![0, 2, 1]);
        assert!((round.entropy - 2.178_783_493_486_175_6).abs() < 1e-9);

        let queries = round.queries();
        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|q| q.code == round.code));
        assert_eq!(queries[0].to_string(), "131 A");
    }

    #[test]
    fn unfiltered_game_plans_deeper_round() {
        let g = game(&[3, 7, 10, 14]);
        let belief = enumerate_assignments(&g, true);
        let round = plan_round(&g, &belief, 3).unwrap();

        assert_eq!(round.code.to_string(), "141");
        assert_eq!(round.validators, vec![1, 0, 2]);
        assert!((round.entropy - 2.210_484_681_313_111_4).abs() < 1e-9);
    }

    #[test]
    fn rounds_never_repeat_a_validator() {
        let g = game(&[4, 9, 11, 14]);
        let belief = enumerate_assignments(&g, true);
        for round in explore(&g, &belief, 3) {
            assert!(!round.is_empty() && round.len() <= 3);
            let mut validators = round.validators.clone();
            validators.sort_unstable();
            validators.dedup();
            assert_eq!(validators.len(), round.len());
        }
    }

    #[test]
    fn ranking_is_sorted_and_starts_with_plan() {
        let g = game(&[3, 7, 10, 14]);
        let belief = enumerate_assignments(&g, true);
        let ranked = rank_rounds(&g, &belief, 3, 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| w[0].entropy >= w[1].entropy));
        assert_eq!(Some(&ranked[0]), plan_round(&g, &belief, 3).as_ref());
    }

    #[test]
    fn exploration_is_deterministic() {
        let g = game(&[4, 9, 11, 14]);
        let belief = enumerate_assignments(&g, false);
        let first = explore(&g, &belief, 3);
        let second = explore(&g, &belief, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn round_display() {
        let round = Round {
            code: "131".parse().unwrap(),
            validators: vec![0, 2, 1],
            entropy: 2.178_783,
        };
        assert_eq!(round.to_string(), "131 A C B (2.179 bits)");
    }
}
