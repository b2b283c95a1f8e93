//! Static format registry
//!
//! Maps each supported source format to the ordered list of formats it can be
//! converted into. The table is authored data: adding a format pair means
//! editing `REGISTRY` and adding a matching entry to the dispatch table.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Every file format the tool knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Png,
    Jpg,
    Jpeg,
    Bmp,
    Gif,
    Csv,
    Json,
    Xlsx,
    Txt,
    Md,
    Html,
    Pdf,
}

/// Loose grouping used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Image,
    Data,
    Document,
}

impl Format {
    pub const ALL: [Format; 12] = [
        Format::Png,
        Format::Jpg,
        Format::Jpeg,
        Format::Bmp,
        Format::Gif,
        Format::Csv,
        Format::Json,
        Format::Xlsx,
        Format::Txt,
        Format::Md,
        Format::Html,
        Format::Pdf,
    ];

    /// Lowercase file extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpg => "jpg",
            Format::Jpeg => "jpeg",
            Format::Bmp => "bmp",
            Format::Gif => "gif",
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
            Format::Txt => "txt",
            Format::Md => "md",
            Format::Html => "html",
            Format::Pdf => "pdf",
        }
    }

    /// Uppercase label shown in lists and messages
    pub fn label(self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Jpg => "JPG",
            Format::Jpeg => "JPEG",
            Format::Bmp => "BMP",
            Format::Gif => "GIF",
            Format::Csv => "CSV",
            Format::Json => "JSON",
            Format::Xlsx => "XLSX",
            Format::Txt => "TXT",
            Format::Md => "MD",
            Format::Html => "HTML",
            Format::Pdf => "PDF",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Format::Png | Format::Jpg | Format::Jpeg | Format::Bmp | Format::Gif => {
                Category::Image
            }
            Format::Csv | Format::Json | Format::Xlsx => Category::Data,
            Format::Txt | Format::Md | Format::Html | Format::Pdf => Category::Document,
        }
    }

    /// Parse an extension, ignoring case and an optional leading dot
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.trim().trim_start_matches('.');
        Format::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Infer the format of a file from its extension
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Format::from_extension)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Image => "Image",
            Category::Data => "Data",
            Category::Document => "Document",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s).ok_or_else(|| format!("unknown format '{}'", s))
    }
}

/// One row of the registry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormatEntry {
    pub source: Format,
    pub targets: &'static [Format],
}

impl FormatEntry {
    pub fn category(&self) -> Category {
        self.source.category()
    }
}

static REGISTRY: &[FormatEntry] = &[
    // Image
    FormatEntry {
        source: Format::Png,
        targets: &[Format::Jpg, Format::Jpeg, Format::Bmp, Format::Gif],
    },
    FormatEntry {
        source: Format::Jpg,
        targets: &[Format::Png, Format::Bmp, Format::Gif],
    },
    FormatEntry {
        source: Format::Jpeg,
        targets: &[Format::Png, Format::Bmp, Format::Gif],
    },
    FormatEntry {
        source: Format::Bmp,
        targets: &[Format::Png, Format::Jpg, Format::Jpeg, Format::Gif],
    },
    FormatEntry {
        source: Format::Gif,
        targets: &[Format::Png, Format::Jpg, Format::Jpeg, Format::Bmp],
    },
    // Data
    FormatEntry {
        source: Format::Csv,
        targets: &[Format::Xlsx, Format::Json],
    },
    FormatEntry {
        source: Format::Json,
        targets: &[Format::Csv, Format::Xlsx],
    },
    FormatEntry {
        source: Format::Xlsx,
        targets: &[Format::Csv, Format::Json],
    },
    // Document
    FormatEntry {
        source: Format::Txt,
        targets: &[Format::Csv, Format::Xlsx, Format::Html, Format::Pdf],
    },
    FormatEntry {
        source: Format::Md,
        targets: &[Format::Html, Format::Txt, Format::Pdf],
    },
    FormatEntry {
        source: Format::Pdf,
        targets: &[Format::Txt, Format::Html],
    },
];

/// All registry rows in declaration order
pub fn entries() -> &'static [FormatEntry] {
    REGISTRY
}

/// Registry rows whose source belongs to `category`
pub fn entries_in(category: Category) -> impl Iterator<Item = &'static FormatEntry> {
    REGISTRY.iter().filter(move |e| e.category() == category)
}

/// Ordered targets for a source format (empty if the format is not a source)
pub fn targets_for(source: Format) -> &'static [Format] {
    REGISTRY
        .iter()
        .find(|e| e.source == source)
        .map(|e| e.targets)
        .unwrap_or(&[])
}

/// Ordered targets for a file extension, empty when the extension is unknown
pub fn targets_for_extension(ext: &str) -> &'static [Format] {
    Format::from_extension(ext).map(targets_for).unwrap_or(&[])
}

/// Source format of a path, only if the registry lists it as a source
pub fn source_format(path: &Path) -> Option<Format> {
    Format::from_path(path).filter(|f| !targets_for(*f).is_empty())
}

/// Whether the file at `path` has at least one registered target
pub fn is_supported_path(path: &Path) -> bool {
    source_format(path).is_some()
}

/// Whether `source -> target` is a registered conversion
pub fn is_registered(source: Format, target: Format) -> bool {
    targets_for(source).contains(&target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_parsing_is_case_insensitive() {
        assert_eq!(Format::from_extension("PNG"), Some(Format::Png));
        assert_eq!(Format::from_extension(".Jpeg"), Some(Format::Jpeg));
        assert_eq!(Format::from_extension("xlsx"), Some(Format::Xlsx));
        assert_eq!(Format::from_extension("docx"), None);
        assert_eq!(Format::from_extension(""), None);
    }

    #[test]
    fn test_sources_are_unique() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert_ne!(a.source, b.source, "Duplicate registry row for {}", a.source);
            }
        }
    }

    #[test]
    fn test_no_format_targets_itself() {
        for entry in REGISTRY {
            assert!(
                !entry.targets.contains(&entry.source),
                "{} lists itself as a target",
                entry.source
            );
        }
    }

    #[test]
    fn test_html_is_target_only() {
        assert!(targets_for(Format::Html).is_empty());
        assert!(!is_supported_path(Path::new("page.html")));
    }
}
