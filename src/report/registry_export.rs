//! Registry listing: terminal table and JSON export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use serde::Serialize;

use crate::pipeline::registry::{self, Category, Format};
use crate::pipeline::{dispatch, ConversionAction};

/// Metadata about the export
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// fileshift version
    pub fileshift_version: String,
    pub total_sources: usize,
    pub total_conversions: usize,
}

/// One registered conversion
#[derive(Serialize)]
pub struct ConversionEntry {
    pub target: Format,
    /// Intermediate format for two-step conversions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<Format>,
}

/// A source format and everything it converts into
#[derive(Serialize)]
pub struct SourceEntry {
    pub source: Format,
    pub category: Category,
    pub targets: Vec<ConversionEntry>,
}

/// Complete registry export
#[derive(Serialize)]
pub struct RegistryExport {
    pub metadata: ExportMetadata,
    pub formats: Vec<SourceEntry>,
}

/// Snapshot the registry in declaration order
pub fn build_export() -> RegistryExport {
    let formats: Vec<SourceEntry> = registry::entries()
        .iter()
        .map(|entry| SourceEntry {
            source: entry.source,
            category: entry.category(),
            targets: entry
                .targets
                .iter()
                .map(|&target| ConversionEntry {
                    target,
                    via: via_format(entry.source, target),
                })
                .collect(),
        })
        .collect();

    RegistryExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            fileshift_version: env!("CARGO_PKG_VERSION").to_string(),
            total_sources: formats.len(),
            total_conversions: formats.iter().map(|f| f.targets.len()).sum(),
        },
        formats,
    }
}

fn via_format(source: Format, target: Format) -> Option<Format> {
    match dispatch::action_for(source, target) {
        Some(ConversionAction::MultiHop { via }) => Some(via),
        _ => None,
    }
}

/// Write the registry as pretty-printed JSON
pub fn export_registry(output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&build_export())
        .context("Failed to serialize format registry to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write format registry to {}", output_path.display()))?;

    Ok(())
}

/// The registry as a table, one row per source format
pub fn registry_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Source").add_attribute(Attribute::Bold),
        Cell::new("Targets").add_attribute(Attribute::Bold),
    ]);

    for category in [Category::Image, Category::Data, Category::Document] {
        for entry in registry::entries_in(category) {
            let targets: Vec<String> = entry
                .targets
                .iter()
                .map(|&t| match via_format(entry.source, t) {
                    Some(via) => format!("{} (via {})", t, via),
                    None => t.to_string(),
                })
                .collect();
            table.add_row(vec![
                Cell::new(category).fg(category_color(category)),
                Cell::new(entry.source).add_attribute(Attribute::Bold),
                Cell::new(targets.join(", ")),
            ]);
        }
    }
    table
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Image => Color::Magenta,
        Category::Data => Color::Yellow,
        Category::Document => Color::Cyan,
    }
}
