//! Batch conversion summary

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::convert::BatchResult;

/// Summary of a folder conversion, rendered as a table
#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub target_format: String,
    pub succeeded: usize,
    pub failed: usize,
    /// Failure lines, kept for the details section
    pub failures: Vec<String>,
    pub elapsed: Duration,
}

impl ConversionSummary {
    pub fn new(target_format: &str, batch: &BatchResult, elapsed: Duration) -> Self {
        Self {
            target_format: target_format.to_string(),
            succeeded: batch.succeeded,
            failed: batch.failed,
            failures: batch
                .results
                .iter()
                .filter(|r| !r.is_success())
                .map(|r| r.message())
                .collect(),
            elapsed,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn build_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Images Found"),
            Cell::new(self.total()),
        ]);

        table.add_row(vec![
            Cell::new("🖼️  Output Format"),
            Cell::new(&self.target_format),
        ]);

        table.add_row(vec![
            Cell::new("✅ Converted"),
            Cell::new(self.succeeded)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("❌ Errors"),
            Cell::new(self.failed).fg(if self.failed == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("⏱️  Time"),
            Cell::new(format!("{:.2}s", self.elapsed.as_secs_f64())),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.build_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.failures.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILED FILES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();
            for failure in &self.failures {
                println!("        {} {}", style("•").dim(), failure);
            }
        }
    }
}
