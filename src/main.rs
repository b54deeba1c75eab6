//! Turing Machine Solver - CLI
//!
//! Deduces the secret code of a Turing Machine game with TUI and CLI modes,
//! choosing each round's queries by entropy lookahead.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use turing_solver::{
    catalog::{Catalog, loader::load_from_file},
    commands::{
        SolveConfig, Target, analyze_game, run_benchmark, run_simple, select_truths, solve_game,
    },
    core::{Code, ValidatorId},
    output::{print_analysis_result, print_benchmark_result, print_solve_result},
    solver::{DEFAULT_QUERIES_PER_ROUND, Hidden, Solver, SolverConfig},
};

#[derive(Parser)]
#[command(
    name = "turing_solver",
    about = "Turing Machine code breaker using entropy-guided query rounds",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Validator card ids in play, in order
    #[arg(
        short,
        long,
        global = true,
        value_delimiter = ',',
        default_value = "3,7,10,14"
    )]
    game: Vec<ValidatorId>,

    /// Catalog file with card definitions (default: built-in cards)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Keep hidden assignments that leave several codes (take the first)
    #[arg(long, global = true)]
    no_filter_unique: bool,

    /// Keep assignments in which a validator is unnecessary
    #[arg(long, global = true)]
    no_filter_useless: bool,

    /// Queries per round (lookahead depth)
    #[arg(
        short = 'k',
        long,
        global = true,
        default_value_t = DEFAULT_QUERIES_PER_ROUND
    )]
    queries_per_round: usize,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (interactive solver without TUI)
    Simple,

    /// Solve against a known solution
    Solve {
        /// Active criterion index of each validator, e.g. 0,0,1,2
        #[arg(long, conflicts_with = "code", required_unless_present = "code")]
        hidden: Option<Hidden>,

        /// Secret code, e.g. 122 (first matching assignment)
        #[arg(long)]
        code: Option<Code>,
    },

    /// Show validators, possible assignments and the best rounds
    Analyze {
        /// Number of ranked rounds to show
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Solve every possible assignment and report statistics
    Benchmark {
        /// Only play a random sample of this many assignments
        #[arg(short = 'n', long)]
        sample: Option<usize>,

        /// Seed for sampling
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

/// Install the tracing subscriber
///
/// The TUI owns the terminal, so it logs only when `RUST_LOG` asks for it.
fn init_logging(verbose: u8, tui: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if tui => return,
        Err(_) => EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => Catalog::builtin().context("building the built-in catalog"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    init_logging(cli.verbose, matches!(command, Commands::Play));

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let config = SolverConfig {
        filter_unique_answer: !cli.no_filter_unique,
        filter_useless_validators: !cli.no_filter_useless,
        queries_per_round: cli.queries_per_round,
    };
    let solver = Solver::new(&catalog, &cli.game, config)
        .with_context(|| format!("setting up game {:?}", cli.game))?;

    match command {
        Commands::Play => run_play_command(solver),
        Commands::Simple => run_simple(&solver),
        Commands::Solve { hidden, code } => run_solve_command(&solver, hidden, code),
        Commands::Analyze { top } => {
            print_analysis_result(&analyze_game(&solver, top));
            Ok(())
        }
        Commands::Benchmark { sample, seed } => {
            run_benchmark_command(&solver, sample, seed);
            Ok(())
        }
    }
}

fn run_solve_command(
    solver: &Solver,
    hidden: Option<Hidden>,
    code: Option<Code>,
) -> Result<()> {
    let target = match (hidden, code) {
        (Some(hidden), _) => Target::Hidden(hidden),
        (None, Some(code)) => Target::Code(code),
        (None, None) => anyhow::bail!("either --hidden or --code is required"),
    };

    let result = solve_game(SolveConfig::new(target), solver)?;
    print_solve_result(&result, true);
    Ok(())
}

fn run_benchmark_command(solver: &Solver, sample: Option<usize>, seed: u64) {
    let truths = select_truths(solver, sample, seed);
    println!(
        "Running benchmark on {} of {} possible assignments...",
        truths.len(),
        solver.belief().len()
    );

    let result = run_benchmark(solver, &truths, true);
    print_benchmark_result(&result);
}

fn run_play_command(solver: Solver) -> Result<()> {
    use turing_solver::interactive::{App, run_tui};

    run_tui(App::new(solver))
}
