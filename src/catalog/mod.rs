//! Validator catalogs
//!
//! A catalog is an immutable registry of validator cards keyed by id. It is
//! built once at startup (from the built-in cards or a catalog file) and only
//! borrowed afterwards.

mod builtin;
pub mod loader;

use crate::core::{Criterion, Validator, ValidatorError, ValidatorId};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Criterion {
        line: usize,
        source: crate::core::ParseCriterionError,
    },

    #[error("validator {0} defined more than once")]
    Duplicate(ValidatorId),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("validator {id}: criteria '{first}' and '{second}' both hold for code {code}")]
    Overlap {
        id: ValidatorId,
        first: Criterion,
        second: Criterion,
        code: crate::core::Code,
    },
}

/// Immutable registry of validator cards
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    validators: BTreeMap<ValidatorId, Validator>,
}

impl Catalog {
    /// Build a catalog from card definitions
    ///
    /// Lookup tables are computed here. Criterion exclusivity is not checked;
    /// call [`Catalog::verify`] once after loading untrusted cards.
    ///
    /// # Errors
    /// Returns `CatalogError::Duplicate` for a repeated id and
    /// `CatalogError::Validator` for an empty or oversized card.
    pub fn new<I>(cards: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (ValidatorId, Vec<Criterion>)>,
    {
        let mut validators = BTreeMap::new();
        for (id, criteria) in cards {
            if validators.contains_key(&id) {
                return Err(CatalogError::Duplicate(id));
            }
            validators.insert(id, Validator::new(id, criteria)?);
        }
        Ok(Self { validators })
    }

    /// The twenty standard validator cards (ids 1 to 20)
    ///
    /// # Errors
    /// Only fails if the built-in table itself is malformed.
    ///
    /// # Examples
    /// ```
    /// use turing_solver::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// assert_eq!(catalog.len(), 20);
    /// assert_eq!(catalog.get(11).unwrap().len(), 3);
    /// ```
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin::cards())
    }

    /// Check that every card's criteria are pairwise mutually exclusive
    ///
    /// # Errors
    /// Returns `CatalogError::Overlap` naming the first offending card.
    pub fn verify(&self) -> Result<(), CatalogError> {
        for validator in self.validators.values() {
            if let Some(overlap) = validator.find_overlap() {
                return Err(CatalogError::Overlap {
                    id: validator.id(),
                    first: validator.criteria()[overlap.first],
                    second: validator.criteria()[overlap.second],
                    code: overlap.code,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ValidatorId> + '_ {
        self.validators.keys().copied()
    }

    pub fn validators(&self) -> impl Iterator<Item = &Validator> {
        self.validators.values()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CODE_COUNT;

    #[test]
    fn builtin_catalog_is_exclusive() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 20);
        assert!(catalog.ids().eq(1..=20));
        catalog.verify().unwrap();
    }

    #[test]
    fn builtin_cards_cover_every_code() {
        // Each standard card classifies every code into exactly one criterion
        let catalog = Catalog::builtin().unwrap();
        for validator in catalog.validators() {
            let total: usize = validator.counts().iter().map(|c| c.satisfied).sum();
            assert_eq!(total, CODE_COUNT, "validator {}", validator.id());
        }
    }

    #[test]
    fn builtin_cards_match_text_form() {
        let catalog = Catalog::builtin().unwrap();
        let text = |id| catalog.get(id).unwrap().to_string();
        assert_eq!(text(1), "#1 [t==1 | t>1]");
        assert_eq!(
            text(8),
            "#8 [count(1)==0 | count(1)==1 | count(1)==2 | count(1)==3]"
        );
        assert_eq!(text(14), "#14 [min(t) | min(s) | min(c)]");
        assert_eq!(text(16), "#16 [count(even)>=2 | count(even)<2]");
        assert_eq!(text(18), "#18 [even(t+s+c) | odd(t+s+c)]");
        assert_eq!(text(19), "#19 [t+s<6 | t+s==6 | t+s>6]");
        assert_eq!(text(20), "#20 [triple | pair | distinct]");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let cards = vec![
            (1, vec!["t==1".parse().unwrap()]),
            (1, vec!["t>1".parse().unwrap()]),
        ];
        assert!(matches!(
            Catalog::new(cards),
            Err(CatalogError::Duplicate(1))
        ));
    }

    #[test]
    fn verify_reports_overlap() {
        let criteria = vec!["t<4".parse().unwrap(), "t>2".parse().unwrap()];
        let catalog = Catalog::new(vec![(42, criteria)]).unwrap();
        let err = catalog.verify().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validator 42: criteria 't<4' and 't>2' both hold for code 311"
        );
    }

    #[test]
    fn unknown_id_lookup() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(21).is_none());
    }
}
