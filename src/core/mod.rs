//! Core domain types for the Turing Machine puzzle
//!
//! Codes, criteria and validator cards. Everything here is pure and
//! independent of the solving algorithms.

mod code;
mod criterion;
mod validator;

pub use code::{CODE_COUNT, Code, CodeError, CodeSet, DIGIT_COUNT, MAX_DIGIT, MIN_DIGIT, Position};
pub use criterion::{Criterion, ParseCriterionError, Relation, Repetition, Subject, Term};
pub use validator::{
    CriterionCounts, MAX_CRITERIA, Overlap, Signature, Validator, ValidatorError, ValidatorId,
};
