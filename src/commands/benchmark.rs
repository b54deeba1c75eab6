//! Benchmark command
//!
//! Solves the game for every (or a random sample of) possible assignment.

use super::solve::{SolveResult, solve_assignment};
use crate::solver::{Assignment, Solver};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Rounds allowed per game before it counts as a failure
const MAX_ROUNDS: usize = 10;

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_games: usize,
    pub solved: usize,
    pub total_rounds: usize,
    pub total_queries: usize,
    pub average_rounds: f64,
    pub average_queries: f64,
    pub min_rounds: usize,
    pub max_rounds: usize,
    /// Games per round count
    pub distribution: BTreeMap<usize, usize>,
    /// Ground truths that were not solved, with the reason
    pub failures: Vec<(Assignment, String)>,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Pick the ground truths to benchmark
///
/// All assignments when `sample` is `None` or not smaller than the belief
/// state, else a seeded random sample in belief order.
#[must_use]
pub fn select_truths(solver: &Solver, sample: Option<usize>, seed: u64) -> Vec<Assignment> {
    let all = solver.belief().as_slice();
    match sample {
        Some(n) if n < all.len() => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut chosen: Vec<&Assignment> = all.choose_multiple(&mut rng, n).collect();
            chosen.sort_by_key(|&a| all.iter().position(|b| b == a));
            chosen.into_iter().cloned().collect()
        }
        _ => all.to_vec(),
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

/// Solve against each ground truth in parallel
pub fn run_benchmark(
    solver: &Solver,
    truths: &[Assignment],
    show_progress: bool,
) -> BenchmarkResult {
    let start = Instant::now();
    let pb = progress_bar(truths.len(), show_progress);

    let outcomes: Vec<(Assignment, anyhow::Result<SolveResult>)> = truths
        .par_iter()
        .map(|truth| {
            let outcome = solve_assignment(solver, truth.clone(), MAX_ROUNDS);
            pb.inc(1);
            (truth.clone(), outcome)
        })
        .collect();
    pb.finish_with_message("done");

    let mut result = BenchmarkResult {
        total_games: truths.len(),
        solved: 0,
        total_rounds: 0,
        total_queries: 0,
        average_rounds: 0.0,
        average_queries: 0.0,
        min_rounds: usize::MAX,
        max_rounds: 0,
        distribution: BTreeMap::new(),
        failures: Vec::new(),
        duration: Duration::ZERO,
        games_per_second: 0.0,
    };

    for (truth, outcome) in outcomes {
        match outcome {
            Ok(solve) if solve.success => {
                let rounds = solve.rounds.len();
                result.solved += 1;
                result.total_rounds += rounds;
                result.total_queries += solve.query_count();
                result.min_rounds = result.min_rounds.min(rounds);
                result.max_rounds = result.max_rounds.max(rounds);
                *result.distribution.entry(rounds).or_insert(0) += 1;
            }
            Ok(solve) => result.failures.push((
                truth,
                format!("not solved after {} rounds", solve.rounds.len()),
            )),
            Err(err) => result.failures.push((truth, err.to_string())),
        }
    }

    if result.solved > 0 {
        result.average_rounds = result.total_rounds as f64 / result.solved as f64;
        result.average_queries = result.total_queries as f64 / result.solved as f64;
    } else {
        result.min_rounds = 0;
    }
    result.duration = start.elapsed();
    result.games_per_second = result.total_games as f64 / result.duration.as_secs_f64().max(1e-9);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::SolverConfig;

    fn solver(ids: &[u32], config: SolverConfig) -> Solver {
        let catalog = Catalog::builtin().unwrap();
        Solver::new(&catalog, ids, config).unwrap()
    }

    #[test]
    fn benchmark_solves_every_truth() {
        let s = solver(&[3, 7, 10, 14], SolverConfig::default());
        let truths = select_truths(&s, None, 0);
        let result = run_benchmark(&s, &truths, false);

        assert_eq!(result.total_games, 7);
        assert_eq!(result.solved, 7);
        assert!(result.failures.is_empty());
        assert!(result.min_rounds >= 1);
        assert!(result.max_rounds <= 2);
        assert!(result.average_rounds >= result.min_rounds as f64);
        assert!(result.average_rounds <= result.max_rounds as f64);
        assert!(result.average_queries >= result.average_rounds);
    }

    #[test]
    fn distribution_sums_to_solved() {
        let config = SolverConfig {
            filter_unique_answer: false,
            filter_useless_validators: false,
            ..SolverConfig::default()
        };
        let s = solver(&[4, 9, 11, 14], config);
        let result = run_benchmark(&s, &select_truths(&s, None, 0), false);

        assert_eq!(result.total_games, 26);
        assert_eq!(result.distribution.values().sum::<usize>(), result.solved);
        assert_eq!(result.solved, 26);
        assert!(result.max_rounds <= 3);
    }

    #[test]
    fn sample_is_seeded_and_ordered() {
        let s = solver(
            &[3, 7, 10, 14],
            SolverConfig {
                filter_useless_validators: false,
                ..SolverConfig::default()
            },
        );
        let first = select_truths(&s, Some(5), 42);
        let second = select_truths(&s, Some(5), 42);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);

        let positions: Vec<usize> = first
            .iter()
            .map(|a| s.belief().iter().position(|b| b == a).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(select_truths(&s, Some(100), 42).len(), 13);
    }

    #[test]
    fn empty_benchmark() {
        let s = solver(&[3, 7, 10, 14], SolverConfig::default());
        let result = run_benchmark(&s, &[], false);
        assert_eq!(result.total_games, 0);
        assert_eq!(result.solved, 0);
        assert_eq!(result.min_rounds, 0);
    }
}
