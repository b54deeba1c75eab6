//! Belief state: the (hidden, code) assignments still consistent with
//! everything observed

use crate::core::{Code, Signature};
use std::fmt;
use std::str::FromStr;

/// The secret active criterion index of each validator in a game
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hidden(Vec<usize>);

impl Hidden {
    #[must_use]
    pub const fn new(criteria: Vec<usize>) -> Self {
        Self(criteria)
    }

    /// Active criterion index of the validator at `position`
    #[inline]
    #[must_use]
    pub fn criterion(&self, position: usize) -> usize {
        self.0[position]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Hidden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, criterion) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{criterion}")?;
        }
        f.write_str(")")
    }
}

impl FromStr for Hidden {
    type Err = String;

    /// Accepts `"0,2,1"`, `"0 2 1"` or `"(0, 2, 1)"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split([',', ' '])
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| format!("Invalid criterion index '{part}' in {s}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// One possible world: which criteria are active, and the code they single out
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    hidden: Hidden,
    code: Code,
}

impl Assignment {
    #[must_use]
    pub const fn new(hidden: Hidden, code: Code) -> Self {
        Self { hidden, code }
    }

    #[must_use]
    pub const fn hidden(&self) -> &Hidden {
        &self.hidden
    }

    #[must_use]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// Whether this assignment predicts `result` for a query with `signature`
    /// against the validator at `position`
    #[inline]
    #[must_use]
    pub fn predicts(&self, position: usize, signature: Signature, result: bool) -> bool {
        signature.outcome(self.hidden.criterion(position)) == result
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.hidden, self.code)
    }
}

/// An answered query, as recorded in the solver history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// 1-based round number
    pub round: usize,
    pub code: Code,
    pub validator: usize,
    pub result: bool,
    /// Belief-state size after applying this observation
    pub remaining: usize,
}

/// The set of assignments still consistent with all observations
///
/// Kept in enumeration order; only ever shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeliefState {
    assignments: Vec<Assignment>,
}

impl BeliefState {
    #[must_use]
    pub const fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The remaining assignment, if exactly one is left
    #[must_use]
    pub fn single(&self) -> Option<&Assignment> {
        match self.assignments.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Drop every assignment that disagrees with an answer
    pub fn retain_consistent(&mut self, position: usize, signature: Signature, result: bool) {
        self.assignments
            .retain(|assignment| assignment.predicts(position, signature, result));
    }
}

impl<'a> IntoIterator for &'a BeliefState {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(hidden: &[usize], code: &str) -> Assignment {
        Assignment::new(Hidden::new(hidden.to_vec()), code.parse().unwrap())
    }

    #[test]
    fn hidden_display_and_parse() {
        let hidden = Hidden::new(vec![0, 2, 1]);
        assert_eq!(hidden.to_string(), "(0, 2, 1)");
        assert_eq!("0,2,1".parse::<Hidden>(), Ok(hidden.clone()));
        assert_eq!("0 2 1".parse::<Hidden>(), Ok(hidden.clone()));
        assert_eq!("(0, 2, 1)".parse::<Hidden>(), Ok(hidden));
        assert!("0,x".parse::<Hidden>().is_err());
    }

    #[test]
    fn assignment_predicts_from_signature() {
        let a = assignment(&[1, 0], "311");
        // Criterion 1 of validator 0 holds, criterion 0 does not
        let signature = Signature::new(0b10);
        assert!(a.predicts(0, signature, true));
        assert!(!a.predicts(0, signature, false));
        assert!(a.predicts(1, signature, false));
    }

    #[test]
    fn retain_consistent_shrinks() {
        let mut belief = BeliefState::new(vec![
            assignment(&[0], "211"),
            assignment(&[1], "311"),
            assignment(&[0], "411"),
        ]);
        belief.retain_consistent(0, Signature::new(0b01), true);
        assert_eq!(belief.len(), 2);
        assert!(belief.iter().all(|a| a.hidden().criterion(0) == 0));

        belief.retain_consistent(0, Signature::new(0b01), false);
        assert!(belief.is_empty());
    }

    #[test]
    fn single_only_when_one_left() {
        let mut belief = BeliefState::new(vec![assignment(&[0], "211"), assignment(&[1], "311")]);
        assert!(belief.single().is_none());
        belief.retain_consistent(0, Signature::new(0b10), true);
        assert_eq!(belief.single().map(Assignment::code), "311".parse().ok());
    }
}
