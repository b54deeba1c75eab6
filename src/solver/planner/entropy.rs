//! Binary entropy of a query's answer
//!
//! A query splits the belief state into the assignments predicting `true` and
//! those predicting `false`; its information is the entropy of that split.

use crate::core::Signature;
use crate::solver::belief::Assignment;

/// Binary Shannon entropy in bits
///
/// H(p) = -p·log₂(p) - (1-p)·log₂(1-p), defined as 0 at p ∈ {0, 1}.
///
/// # Examples
/// ```
/// use turing_solver::solver::planner::binary_entropy;
///
/// assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);
/// assert_eq!(binary_entropy(0.0), 0.0);
/// assert!(binary_entropy(0.25) < 1.0);
/// ```
#[must_use]
pub fn binary_entropy(p: f64) -> f64 {
    if p > 0.0 && p < 1.0 {
        -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
    } else {
        0.0
    }
}

/// How many assignments predict each answer to one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitCounts {
    pub satisfied: usize,
    pub unsatisfied: usize,
}

impl SplitCounts {
    /// Tally a query with `signature` against the validator at `position`
    pub fn tally<'a, I>(assignments: I, position: usize, signature: Signature) -> Self
    where
        I: IntoIterator<Item = &'a Assignment>,
    {
        assignments
            .into_iter()
            .fold(Self::default(), |mut counts, assignment| {
                if assignment.predicts(position, signature, true) {
                    counts.satisfied += 1;
                } else {
                    counts.unsatisfied += 1;
                }
                counts
            })
    }

    #[must_use]
    pub const fn total(self) -> usize {
        self.satisfied + self.unsatisfied
    }

    /// Both answers remain possible, so asking carries information
    #[must_use]
    pub const fn is_informative(self) -> bool {
        self.satisfied > 0 && self.unsatisfied > 0
    }

    /// Probability of a `true` answer
    #[must_use]
    pub fn probability(self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.satisfied as f64 / self.total() as f64
        }
    }

    #[must_use]
    pub fn entropy(self) -> f64 {
        binary_entropy(self.probability())
    }
}
