//! End-of-run summary of written outputs.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Files written during a run, split into cleaned tables and report tables.
#[derive(Debug, Default)]
pub struct PipelineSummary {
    cleaned: Vec<(String, usize)>,
    reports: Vec<(String, usize)>,
}

impl PipelineSummary {
    pub fn add_cleaned(&mut self, name: &str, rows: usize) {
        self.cleaned.push((name.to_string(), rows));
    }

    pub fn add_reports(&mut self, entries: Vec<(String, usize)>) {
        self.reports.extend(entries);
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty() && self.reports.is_empty()
    }

    pub fn display(&self) {
        if self.is_empty() {
            return;
        }

        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PIPELINE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Output").add_attribute(Attribute::Bold),
            Cell::new("Kind").add_attribute(Attribute::Bold),
            Cell::new("Rows").add_attribute(Attribute::Bold),
        ]);

        for (name, rows) in &self.cleaned {
            table.add_row(vec![
                Cell::new(name),
                Cell::new("cleaned").fg(Color::Cyan),
                Cell::new(rows),
            ]);
        }
        for (name, rows) in &self.reports {
            table.add_row(vec![
                Cell::new(name),
                Cell::new("report").fg(Color::Green),
                Cell::new(rows),
            ]);
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        println!();
        println!(
            "      {} cleaned table(s), {} report file(s)",
            style(self.cleaned.len()).yellow().bold(),
            style(self.reports.len()).yellow().bold()
        );
    }
}
