//! Simple interactive CLI mode
//!
//! Line-oriented prompt without TUI: proposes a round, then asks for each
//! query's answer.

use crate::solver::{Query, Responder, Solver, SolverError, SolverResult};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Show the remaining assignments when at most this many are left
const LIST_LIMIT: usize = 10;

/// Reads answers from a line-based input
struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

fn parse_answer(text: &str) -> Option<bool> {
    match text {
        "1" | "y" | "yes" | "true" | "t" => Some(true),
        "0" | "n" | "no" | "false" | "f" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> Responder for Prompt<'_, R, W> {
    fn answer(&mut self, query: &Query) -> SolverResult<bool> {
        let io_error = |e: io::Error| SolverError::Aborted(e.to_string());
        loop {
            write!(self.output, "> {query}: ").map_err(io_error)?;
            self.output.flush().map_err(io_error)?;

            let mut line = String::new();
            if self.input.read_line(&mut line).map_err(io_error)? == 0 {
                return Err(SolverError::Aborted("end of input".to_string()));
            }

            let text = line.trim().to_lowercase();
            if matches!(text.as_str(), "quit" | "q" | "exit") {
                return Err(SolverError::Aborted("quit".to_string()));
            }
            if let Some(answer) = parse_answer(&text) {
                return Ok(answer);
            }
            writeln!(self.output, "  Enter 1 (check) or 0 (cross), or 'quit'")
                .map_err(io_error)?;
        }
    }
}

/// Run the simple interactive mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if the answers contradict each other or no query can
/// make progress.
pub fn run_simple(solver: &Solver) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(solver.clone(), &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

/// Play one session over arbitrary input and output
///
/// Returns the solver in its final state; quitting is not an error.
///
/// # Errors
///
/// See [`run_simple`].
pub fn run_session<R: BufRead, W: Write>(
    mut solver: Solver,
    input: &mut R,
    output: &mut W,
) -> Result<Solver> {
    writeln!(
        output,
        "{}",
        "Turing Machine Solver - Interactive Mode".bright_cyan().bold()
    )?;
    writeln!(
        output,
        "Validators: {}",
        solver
            .game()
            .ids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )?;
    writeln!(
        output,
        "Answer each query with 1 (check) or 0 (cross); 'quit' exits.\n"
    )?;

    let mut number = 1;
    loop {
        let remaining = solver.belief().len();
        writeln!(output, "{}", "─".repeat(60).cyan())?;
        writeln!(output, "{remaining} possible assignments")?;
        if remaining <= LIST_LIMIT {
            for assignment in solver.belief() {
                writeln!(output, "  • {assignment}")?;
            }
        }

        let Some(round) = solver.plan_round()? else {
            break;
        };
        writeln!(
            output,
            "\nRound {number}: {}",
            round.to_string().bright_yellow().bold()
        )?;

        let mut prompt = Prompt {
            input: &mut *input,
            output: &mut *output,
        };
        let outcome = match solver.play_round(&round, &mut prompt) {
            Ok(outcome) => outcome,
            Err(SolverError::Aborted(reason)) => {
                writeln!(output, "\nStopped ({reason}).")?;
                return Ok(solver);
            }
            Err(err) => return Err(err.into()),
        };
        for query in &outcome.skipped {
            writeln!(output, "  skipped {query}: answer already known")?;
        }
        number += 1;
    }

    if let Some(solution) = solver.solution() {
        writeln!(output, "\n{}", "═".repeat(60).bright_cyan())?;
        writeln!(
            output,
            "Solved! Code {} {}",
            solution.code().to_string().bright_green().bold(),
            format!("(criteria {})", solution.hidden()).bright_black()
        )?;
        writeln!(output, "{}", "═".repeat(60).bright_cyan())?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::solver::SolverConfig;
    use std::io::Cursor;

    fn solver(ids: &[u32]) -> Solver {
        let catalog = Catalog::builtin().unwrap();
        let config = SolverConfig::default();
        Solver::new(&catalog, ids, config).unwrap()
    }

    fn session(ids: &[u32], input: &str) -> (Result<Solver>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = run_session(solver(ids), &mut reader, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn parses_answers() {
        assert_eq!(parse_answer("1"), Some(true));
        assert_eq!(parse_answer("yes"), Some(true));
        assert_eq!(parse_answer("0"), Some(false));
        assert_eq!(parse_answer("n"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn solves_from_prompt_answers() {
        let (result, out) = session(&[2, 6, 14, 17], "1\n");
        let solver = result.unwrap();
        assert!(solver.solved());
        assert!(out.contains("> 111 B: "));
        assert!(out.contains("Solved!"));
    }

    #[test]
    fn reprompts_on_bad_input() {
        let (result, out) = session(&[2, 6, 14, 17], "what\n0\n");
        assert!(result.unwrap().solved());
        assert_eq!(out.matches("> 111 B: ").count(), 2);
    }

    #[test]
    fn quit_stops_without_error() {
        let (result, out) = session(&[3, 7, 10, 14], "quit\n");
        let solver = result.unwrap();
        assert!(solver.history().is_empty());
        assert!(out.contains("Stopped (quit)"));
    }

    #[test]
    fn end_of_input_stops() {
        let (result, _) = session(&[3, 7, 10, 14], "1\n");
        let solver = result.unwrap();
        assert_eq!(solver.history().len(), 1);
    }
}
