//! Progress display
//!
//! Styled terminal output: banner, status lines, progress bars, and the
//! end-of-run summary.

use std::time::Duration;

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::generator::GeneratorStats;

/// Color theme for the tool
pub mod theme {
    use colored::Color;

    pub const PRIMARY: Color = Color::Green;
    pub const SECONDARY: Color = Color::BrightGreen;
    pub const ACCENT: Color = Color::Cyan;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const MUTED: Color = Color::BrightBlack;
}

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
  ╦ ╦╔═╗╦═╗╔╦╗╦  ╦╔═╗╔╦╗  ╔═╗╔═╗╦═╗╔═╗╔═╗
  ║║║║ ║╠╦╝ ║║║  ║╚═╗ ║   ╠╣ ║ ║╠╦╝║ ╦║╣
  ╚╩╝╚═╝╩╚══╩╝╩═╝╩╚═╝ ╩   ╚  ╚═╝╩╚═╚═╝╚═╝
"#;

    println!("{}", banner.green());
    println!(
        "  {}  {}",
        "Candidate wordlist generation".bright_green(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!();
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Print final run statistics
pub fn print_run_summary(stats: &GeneratorStats, bytes_written: u64, elapsed: Duration) {
    let tokens = stats.tokens_generated;
    let throughput = if elapsed.as_secs_f64() > 0.0 {
        tokens as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", "                   GENERATION COMPLETE".green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    println!(
        "  {} {}",
        "Tokens emitted: ".green(),
        format_number(tokens).green().bold()
    );
    println!(
        "  {} {}",
        "Estimated space:".green(),
        format_number(stats.estimated_total)
    );
    if stats.config.dedupe {
        println!(
            "  {} {} entries ({})",
            "Dedupe cache:   ".yellow(),
            format_number(stats.dedup_cache_size as u64),
            ByteSize(stats.dedup_memory_bytes as u64)
        );
    }
    println!(
        "  {} {}",
        "Output size:    ".green(),
        ByteSize(bytes_written)
    );
    println!();

    println!(
        "  {} {}",
        "Duration:       ".green(),
        format_duration(elapsed)
    );
    println!(
        "  {} {:.0} tokens/sec",
        "Throughput:     ".green(),
        throughput
    );
    println!();
    println!("{}", "═".repeat(60).green());
}

/// Format a number with thousand separators
pub fn format_number(n: impl Into<u128>) -> String {
    let s = n.into().to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
