//! Turing Machine Solver
//!
//! A deduction engine for the Turing Machine board game: finds the secret
//! three-digit code by choosing validator queries that maximize information.
//!
//! # Quick Start
//!
//! ```rust
//! use turing_solver::catalog::Catalog;
//! use turing_solver::solver::{GroundTruth, Solver, SolverConfig};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut solver = Solver::new(&catalog, &[3, 7, 10, 14], SolverConfig::default()).unwrap();
//!
//! // Answer from a known solution
//! let truth = solver.belief().as_slice()[0].clone();
//! let mut responder = GroundTruth::new(solver.game(), truth.clone());
//!
//! while let Some(round) = solver.plan_round().unwrap() {
//!     solver.play_round(&round, &mut responder).unwrap();
//! }
//! assert_eq!(solver.solution(), Some(&truth));
//! ```

// Core domain types
pub mod core;

// Validator card registry
pub mod catalog;

// Solving algorithms
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
