//! Terminal output formatting.

use colored::Colorize;

/// Banner printed at the start of a generate run.
pub fn print_banner() {
    println!();
    println!("  {}", "scribe".cyan().bold());
    println!(
        "  {}",
        format!("documentation suite // v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!();
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

fn bar_length() -> usize {
    if term_width() < 60 {
        15
    } else {
        30
    }
}

/// Draw the context-usage bar, colored by how full the window is.
pub fn print_usage_bar(tokens: usize, limit: usize) {
    let length = bar_length();
    let percent = if limit == 0 {
        100.0
    } else {
        (tokens as f64 / limit as f64 * 100.0).min(100.0)
    };
    let filled = ((percent / 100.0) * length as f64).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(length - filled));

    let colored_bar = if percent > 90.0 {
        bar.red()
    } else if percent > 70.0 {
        bar.yellow()
    } else {
        bar.green()
    };

    println!("  Context usage: [{colored_bar}] {tokens}/{limit} tokens");
}
