//! Terminal styling utilities for the dashboard output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::{ColumnMapping, Selection};
use crate::report::{format_price, title_case};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static CAR: Emoji<'_, '_> = Emoji("🚗 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static MONEY: Emoji<'_, '_> = Emoji("💰 ", "");
pub static FACTORY: Emoji<'_, '_> = Emoji("🏭 ", "");
pub static MODEL: Emoji<'_, '_> = Emoji("🚘 ", "");
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        CAR,
        style("Car Advertisement Dashboard").cyan().bold()
    );
    println!("    {}", style(format!("cardash v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the active filters as a card
pub fn print_filters(input: &Path, mapping: &ColumnMapping, selection: &Selection, label_total: usize) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!("    │ {:<width$}│", style("🎛️  Filter Listings").cyan().bold(), width = box_width - 3);
    println!("    ├{}┤", line);
    println!(
        "    │  {}Input:  {:<42}│",
        FOLDER,
        truncate_path(input, 40)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {}{:<13} {:<35}│",
        MONEY,
        title_case(&mapping.price),
        format!(
            "{} - {}",
            format_price(Some(selection.price.low)),
            format_price(Some(selection.price.high))
        )
    );
    println!(
        "    │  {}{:<13} {:<35}│",
        FACTORY,
        title_case(&mapping.category),
        truncate_string(&summarize_set(selection.categories.iter()), 34)
    );
    println!(
        "    │  {}{:<13} {:<35}│",
        MODEL,
        title_case(&mapping.label),
        format!("{} of {} selected", selection.labels.len(), label_total)
    );
    println!(
        "    │  {}{:<13} {:<35}│",
        CALENDAR,
        title_case(&mapping.year),
        format!("{:.0} - {:.0}", selection.year.low, selection.year.high)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!("    {}{}", CAR, style("Dashboard complete!").green().bold());
    println!();
}

// Helper functions

fn summarize_set<'a>(values: impl ExactSizeIterator<Item = &'a String>) -> String {
    let total = values.len();
    let shown: Vec<&str> = values.take(3).map(String::as_str).collect();
    match total {
        0 => "none".to_string(),
        n if n <= 3 => shown.join(", "),
        n => format!("{} +{} more", shown.join(", "), n - 3),
    }
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
