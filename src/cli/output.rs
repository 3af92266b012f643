//! CLI output formatting utilities.

use crate::agent::ToolCallRecord;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a conversational line.
    pub fn speaker(name: &str, msg: &str) {
        println!("\n{} {}\n", style(format!("{}:", name)).cyan().bold(), msg);
    }

    /// Print a tool call summary.
    pub fn tool_calls(calls: &[ToolCallRecord]) {
        if calls.is_empty() {
            return;
        }
        Output::header(&format!("Tool calls ({})", calls.len()));
        for call in calls {
            let mark = if call.is_error {
                style("x").red()
            } else {
                style("*").green()
            };
            println!("  {} {} {}", mark, call.name, style(truncate(&call.arguments, 60)).dim());
        }
        println!();
    }

    /// Print search result.
    pub fn search_result(rank: usize, id: &str, score: f32, content: &str) {
        println!(
            "\n{} {}. {} (score: {:.2})",
            style(">>").green(),
            rank,
            style(id).bold(),
            score
        );
        println!("   {}", truncate(&content.replace('\n', " "), 200));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate on a character boundary, adding an ellipsis.
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
