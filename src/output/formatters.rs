//! Formatting utilities for terminal output

/// Check or cross for a query answer
#[must_use]
pub const fn answer_mark(result: bool) -> &'static str {
    if result { "✔" } else { "✘" }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        // Cast is safe: values are clamped to [0, width]
        ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Entropy as a bar against the most a round could yield
///
/// A round of `queries` binary answers carries at most `queries` bits.
#[must_use]
pub fn entropy_bar(entropy: f64, queries: usize, width: usize) -> String {
    create_progress_bar(entropy, queries as f64, width)
}
