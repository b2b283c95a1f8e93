//! Post-conversion summary

use std::path::Path;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::ConversionOutcome;

/// What was converted, where it went, and how long it took
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub input: String,
    pub output: String,
    pub source_format: String,
    pub target_format: String,
    pub input_bytes: Option<u64>,
    pub output_bytes: Option<u64>,
    pub elapsed_secs: f64,
}

impl ConversionSummary {
    pub fn new(input: &Path, outcome: &ConversionOutcome) -> Self {
        Self {
            input: input.display().to_string(),
            output: outcome.output.display().to_string(),
            source_format: outcome.source_format.label().to_string(),
            target_format: outcome.target_format.label().to_string(),
            input_bytes: std::fs::metadata(input).ok().map(|m| m.len()),
            output_bytes: std::fs::metadata(&outcome.output).ok().map(|m| m.len()),
            elapsed_secs: outcome.elapsed.as_secs_f64(),
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Input"), Cell::new(&self.input)]);
        table.add_row(vec![
            Cell::new("🔁 Conversion"),
            Cell::new(format!("{} → {}", self.source_format, self.target_format)).fg(Color::Cyan),
        ]);
        table.add_row(vec![
            Cell::new("💾 Saved as"),
            Cell::new(&self.output)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("📦 Size"),
            Cell::new(format!(
                "{} → {}",
                format_bytes(self.input_bytes),
                format_bytes(self.output_bytes)
            )),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Time"),
            Cell::new(format!("{:.2}s", self.elapsed_secs)),
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
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Human-readable file size
pub fn format_bytes(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) => b,
        None => return "?".to_string(),
    };
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(None), "?");
        assert_eq!(format_bytes(Some(512)), "512 B");
        assert_eq!(format_bytes(Some(2048)), "2.0 KB");
        assert_eq!(format_bytes(Some(3 * 1024 * 1024)), "3.0 MB");
    }
}
