//! Validator cards
//!
//! A validator holds an ordered list of mutually exclusive criteria, exactly one
//! of which is secretly active in a puzzle. Truth sets, signatures and
//! diagnostic counts are precomputed once at construction.

use super::code::{CODE_COUNT, Code, CodeSet};
use super::criterion::Criterion;
use std::fmt;
use thiserror::Error;

/// Identifier of a validator card in a catalog
pub type ValidatorId = u32;

/// Maximum number of criteria a validator may carry (one bit each in a `Signature`)
pub const MAX_CRITERIA: usize = 16;

/// The results of every criterion of one validator for one code
///
/// Bit `i` is set when criterion `i` holds. Codes sharing a signature are
/// interchangeable as queries against that validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(u16);

impl Signature {
    #[inline]
    #[must_use]
    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Result of criterion `criterion` for the code this signature came from
    #[inline]
    #[must_use]
    pub const fn outcome(self, criterion: usize) -> bool {
        self.0 & (1 << criterion) != 0
    }
}

/// How many codes satisfy / violate a criterion (diagnostics only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CriterionCounts {
    pub satisfied: usize,
    pub unsatisfied: usize,
}

/// Two criteria of one validator that hold for the same code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
    pub code: Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    #[error("validator {0} has no criteria")]
    Empty(ValidatorId),

    #[error("validator {id} has {count} criteria (max {max})", max = MAX_CRITERIA)]
    TooManyCriteria { id: ValidatorId, count: usize },
}

/// A validator card with precomputed lookup tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    id: ValidatorId,
    criteria: Vec<Criterion>,
    truth_sets: Vec<CodeSet>,
    counts: Vec<CriterionCounts>,
    signatures: Vec<Signature>,
}

impl Validator {
    /// Build a validator and precompute its tables
    ///
    /// # Errors
    /// Returns `ValidatorError` if there are no criteria or more than `MAX_CRITERIA`.
    ///
    /// # Examples
    /// ```
    /// use turing_solver::core::{Code, Validator};
    ///
    /// let criteria = vec!["even(t)".parse().unwrap(), "odd(t)".parse().unwrap()];
    /// let parity = Validator::new(5, criteria).unwrap();
    /// assert_eq!(parity.counts()[0].satisfied, 50);
    /// assert!(parity.check(1, Code::new(3, 1, 1).unwrap()));
    /// ```
    pub fn new(id: ValidatorId, criteria: Vec<Criterion>) -> Result<Self, ValidatorError> {
        if criteria.is_empty() {
            return Err(ValidatorError::Empty(id));
        }
        if criteria.len() > MAX_CRITERIA {
            return Err(ValidatorError::TooManyCriteria {
                id,
                count: criteria.len(),
            });
        }

        let truth_sets: Vec<CodeSet> = criteria
            .iter()
            .map(|criterion| CodeSet::from_predicate(|code| criterion.holds(code)))
            .collect();

        let counts = truth_sets
            .iter()
            .map(|set| CriterionCounts {
                satisfied: set.len(),
                unsatisfied: CODE_COUNT - set.len(),
            })
            .collect();

        let signatures = Code::all()
            .map(|code| {
                let bits = truth_sets
                    .iter()
                    .enumerate()
                    .filter(|(_, set)| set.contains(code))
                    .fold(0u16, |bits, (i, _)| bits | (1 << i));
                Signature(bits)
            })
            .collect();

        Ok(Self {
            id,
            criteria,
            truth_sets,
            counts,
            signatures,
        })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> ValidatorId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Number of criteria
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> &[CriterionCounts] {
        &self.counts
    }

    /// Codes for which criterion `criterion` holds
    #[inline]
    #[must_use]
    pub fn truth_set(&self, criterion: usize) -> CodeSet {
        self.truth_sets[criterion]
    }

    /// Whether criterion `criterion` holds for `code`
    #[inline]
    #[must_use]
    pub fn check(&self, criterion: usize, code: Code) -> bool {
        self.truth_sets[criterion].contains(code)
    }

    #[inline]
    #[must_use]
    pub fn signature(&self, code: Code) -> Signature {
        self.signatures[code.index()]
    }

    /// First pair of criteria that hold together for some code, if any
    ///
    /// A well-formed validator has none.
    #[must_use]
    pub fn find_overlap(&self) -> Option<Overlap> {
        for first in 0..self.truth_sets.len() {
            for second in first + 1..self.truth_sets.len() {
                let shared = self.truth_sets[first].intersection(self.truth_sets[second]);
                if let Some(code) = shared.first() {
                    return Some(Overlap {
                        first,
                        second,
                        code,
                    });
                }
            }
        }
        None
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [", self.id)?;
        for (i, criterion) in self.criteria.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{criterion}")?;
        }
        f.write_str("]")
    }
}
