//! Display functions for command results

use super::formatters::{answer_mark, create_progress_bar, entropy_bar};
use crate::commands::{AnalysisResult, BenchmarkResult, SolveResult};
use crate::solver::{Game, Report, SolverStatus};
use colored::Colorize;

/// Print a solver report: outcome and round-by-round history
pub fn print_report(report: &Report) {
    println!("\n{}", "─".repeat(60).cyan());
    let status = match report.status {
        SolverStatus::Solved => report.status.to_string().green().bold(),
        SolverStatus::Unsolved => report.status.to_string().yellow().bold(),
        SolverStatus::Contradiction => report.status.to_string().red().bold(),
    };
    println!("Status:     {status}");
    if let Some(solution) = &report.solution {
        println!(
            "Solution:   {} {}",
            solution.code().to_string().bright_green().bold(),
            format!("(criteria {})", solution.hidden()).bright_black()
        );
    }
    println!("Belief:     {} → {}", report.initial, report.remaining);
    println!(
        "Rounds:     {} ({} queries)",
        report.rounds.len(),
        report.query_count()
    );

    for record in &report.rounds {
        let answers = record
            .observations
            .iter()
            .map(|o| format!("{}{}", Game::label(o.validator), answer_mark(o.result)))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {}. {}  {}",
            record.number.to_string().bright_black(),
            record.code.to_string().bright_white().bold(),
            answers
        );
    }
}

/// Print the result of a scripted solve
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving for: {}",
        result.truth.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.rounds.iter().enumerate() {
        println!("\nRound {}: {}", i + 1, step.round.to_string().bold());
        for query in &step.queries {
            println!(
                "  {} {}",
                query.query,
                answer_mark(query.result)
            );
            if verbose {
                let gained = (query.before as f64 / query.after.max(1) as f64).log2();
                println!(
                    "    Assignments: {} → {}  ({gained:.3} bits)",
                    query.before, query.after
                );
            }
        }
        for query in &step.skipped {
            println!("  {} {}", query, "skipped".bright_black());
        }
    }

    if verbose {
        print_report(&result.report);
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!(
                "✅ Solved in {} rounds ({} queries): code {}",
                result.rounds.len(),
                result.query_count(),
                result.truth.code()
            )
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not solved after {} rounds", result.rounds.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of game analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "GAME ANALYSIS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n🃏 {}", "Validators:".bright_cyan().bold());
    for validator in &result.validators {
        println!(
            "  {} {}",
            validator.label.to_string().bright_yellow().bold(),
            format!("(#{})", validator.id).bright_black()
        );
        for (index, criterion) in validator.criteria.iter().enumerate() {
            let text = if criterion.possible {
                criterion.text.normal()
            } else {
                criterion.text.bright_black().strikethrough()
            };
            println!(
                "    {index}: {text:<14} {:>3} ✔ {:>3} ✘",
                criterion.counts.satisfied, criterion.counts.unsatisfied
            );
        }
    }

    println!(
        "\n📊 {} ({:.2} bits of uncertainty):",
        format!("{} possible assignments", result.assignments.len())
            .bright_cyan()
            .bold(),
        result.uncertainty
    );
    for assignment in &result.assignments {
        println!("  • {assignment}");
    }

    println!("\n🎯 {}", "Best rounds:".bright_cyan().bold());
    for (rank, round) in result.rounds.iter().enumerate() {
        let bar = entropy_bar(round.entropy, round.len().max(1), 20);
        println!(
            "  {:>2}. {}  [{}] {}",
            rank + 1,
            round,
            bar.green(),
            format!("{:.3} bits", round.entropy).bright_yellow()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Solved:           {}",
        format!("{}/{}", result.solved, result.total_games).green()
    );
    println!(
        "   Average rounds:   {}",
        format!("{:.2}", result.average_rounds).bright_yellow().bold()
    );
    println!("   Average queries:  {:.2}", result.average_queries);
    println!(
        "   Best case:        {}",
        format!("{}", result.min_rounds).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_rounds).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if !result.distribution.is_empty() {
        println!("\n📈 {}", "Rounds distribution:".bright_cyan().bold());
        for (&rounds, &count) in &result.distribution {
            let pct = count as f64 / result.solved.max(1) as f64 * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {rounds}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }

    if !result.failures.is_empty() {
        println!("\n❌ {}", "Failures:".red().bold());
        for (truth, reason) in &result.failures {
            println!("   {truth}: {reason}");
        }
    }
}
