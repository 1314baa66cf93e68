//! Terminal styling utilities for a modern, visually appealing CLI

use console::{style, Emoji};

use crate::pipeline::paths::DataPaths;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗  ██╗██████╗ ██████╗ ██████╗ ███████╗██████╗
    ██║  ██║██╔══██╗██╔══██╗██╔══██╗██╔════╝██╔══██╗
    ███████║██████╔╝██████╔╝██████╔╝█████╗  ██████╔╝
    ██╔══██║██╔══██╗██╔═══╝ ██╔══██╗██╔══╝  ██╔═══╝
    ██║  ██║██║  ██║██║     ██║  ██║███████╗██║
    ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝     ╚═╝  ╚═╝╚══════╝╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Clean HR tables in, ready-made reports out").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card with the directories this run reads and writes
pub fn print_config(paths: &DataPaths) {
    println!(
        "    {} Raw data:   {}",
        FOLDER,
        style(paths.raw.display()).yellow()
    );
    println!(
        "    {} Cleaned:    {}",
        SAVE,
        style(paths.cleaned.display()).yellow()
    );
    println!(
        "    {} Reports:    {}",
        CHART,
        style(paths.reports.display()).yellow()
    );
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
    println!(
        "    {} {}",
        style("⚠").yellow().bold(),
        style(message).yellow()
    );
}

/// Print how long a step took
pub fn print_step_time(elapsed: std::time::Duration) {
    println!("    {}", style(format!("done in {:.2?}", elapsed)).dim());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("hrprep pipeline complete!").green().bold()
    );
    println!();
}
