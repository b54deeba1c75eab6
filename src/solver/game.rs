//! A puzzle instance: an ordered selection of validators

use super::error::{SolverError, SolverResult};
use crate::catalog::Catalog;
use crate::core::{Code, Signature, Validator, ValidatorId};

/// Ordered validators of one puzzle, fixed for its lifetime
///
/// Validators are addressed by position (`0..len`) and labelled `A`, `B`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    validators: Vec<Validator>,
}

impl Game {
    #[must_use]
    pub const fn new(validators: Vec<Validator>) -> Self {
        Self { validators }
    }

    /// Look up validators by catalog id, keeping the given order
    ///
    /// # Errors
    /// Returns `SolverError::UnknownValidator` for an id missing from the catalog.
    pub fn from_ids(catalog: &Catalog, ids: &[ValidatorId]) -> SolverResult<Self> {
        let validators = ids
            .iter()
            .map(|&id| {
                catalog
                    .get(id)
                    .cloned()
                    .ok_or(SolverError::UnknownValidator(id))
            })
            .collect::<SolverResult<Vec<_>>>()?;
        Ok(Self::new(validators))
    }

    #[must_use]
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Validator at `position`
    ///
    /// # Panics
    /// Panics if `position >= len()`
    #[must_use]
    pub fn validator(&self, position: usize) -> &Validator {
        &self.validators[position]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ValidatorId> {
        self.validators.iter().map(Validator::id).collect()
    }

    #[inline]
    #[must_use]
    pub fn signature(&self, position: usize, code: Code) -> Signature {
        self.validators[position].signature(code)
    }

    /// Display label for a validator position (`A`, `B`, ...)
    #[must_use]
    pub fn label(position: usize) -> char {
        u8::try_from(position)
            .ok()
            .and_then(|p| p.checked_add(b'A'))
            .filter(u8::is_ascii_uppercase)
            .map_or('?', char::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ids_keeps_order() {
        let catalog = Catalog::builtin().unwrap();
        let game = Game::from_ids(&catalog, &[14, 3, 7]).unwrap();
        assert_eq!(game.ids(), vec![14, 3, 7]);
        assert_eq!(game.len(), 3);
        assert_eq!(game.validator(1).id(), 3);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            Game::from_ids(&catalog, &[3, 99]),
            Err(SolverError::UnknownValidator(99))
        );
    }

    #[test]
    fn labels() {
        assert_eq!(Game::label(0), 'A');
        assert_eq!(Game::label(3), 'D');
        assert_eq!(Game::label(25), 'Z');
        assert_eq!(Game::label(26), '?');
    }
}
