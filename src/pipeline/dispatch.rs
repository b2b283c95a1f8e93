//! Conversion dispatch
//!
//! Resolves a `(source, target)` pair to exactly one [`ConversionAction`] and
//! runs it. The action table is static and authored alongside the registry;
//! every registered pair must have a row here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::document;
use super::error::{ConvertError, Result};
use super::raster;
use super::registry::{self, Format};
use super::tabular::{self, TableSink, TableSource};

/// A single conversion leg, or a chain of two legs through an intermediate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionAction {
    /// Decode an image and encode it in the target format
    ReencodeImage,
    /// Load a table and write it back out
    Table { read: TableSource, write: TableSink },
    TextToHtml,
    MarkdownToHtml,
    MarkdownToText,
    TextToPdf,
    PdfToText,
    /// Convert to `via` first, then from `via` to the target
    MultiHop { via: Format },
}

use ConversionAction::*;

static ACTIONS: &[(Format, Format, ConversionAction)] = &[
    // Image
    (Format::Png, Format::Jpg, ReencodeImage),
    (Format::Png, Format::Jpeg, ReencodeImage),
    (Format::Png, Format::Bmp, ReencodeImage),
    (Format::Png, Format::Gif, ReencodeImage),
    (Format::Jpg, Format::Png, ReencodeImage),
    (Format::Jpg, Format::Bmp, ReencodeImage),
    (Format::Jpg, Format::Gif, ReencodeImage),
    (Format::Jpeg, Format::Png, ReencodeImage),
    (Format::Jpeg, Format::Bmp, ReencodeImage),
    (Format::Jpeg, Format::Gif, ReencodeImage),
    (Format::Bmp, Format::Png, ReencodeImage),
    (Format::Bmp, Format::Jpg, ReencodeImage),
    (Format::Bmp, Format::Jpeg, ReencodeImage),
    (Format::Bmp, Format::Gif, ReencodeImage),
    (Format::Gif, Format::Png, ReencodeImage),
    (Format::Gif, Format::Jpg, ReencodeImage),
    (Format::Gif, Format::Jpeg, ReencodeImage),
    (Format::Gif, Format::Bmp, ReencodeImage),
    // Data
    (Format::Csv, Format::Xlsx, Table { read: TableSource::COMMA, write: TableSink::Xlsx }),
    (Format::Csv, Format::Json, Table { read: TableSource::COMMA, write: TableSink::Json }),
    (Format::Json, Format::Csv, Table { read: TableSource::Json, write: TableSink::Csv }),
    (Format::Json, Format::Xlsx, Table { read: TableSource::Json, write: TableSink::Xlsx }),
    (Format::Xlsx, Format::Csv, Table { read: TableSource::Xlsx, write: TableSink::Csv }),
    (Format::Xlsx, Format::Json, Table { read: TableSource::Xlsx, write: TableSink::Json }),
    // Document
    (Format::Txt, Format::Csv, Table { read: TableSource::TAB, write: TableSink::Csv }),
    (Format::Txt, Format::Xlsx, Table { read: TableSource::TAB, write: TableSink::Xlsx }),
    (Format::Txt, Format::Html, TextToHtml),
    (Format::Txt, Format::Pdf, TextToPdf),
    (Format::Md, Format::Html, MarkdownToHtml),
    (Format::Md, Format::Txt, MarkdownToText),
    (Format::Md, Format::Pdf, MultiHop { via: Format::Txt }),
    (Format::Pdf, Format::Txt, PdfToText),
    (Format::Pdf, Format::Html, MultiHop { via: Format::Txt }),
];

/// The action registered for `source -> target`, if any
pub fn action_for(source: Format, target: Format) -> Option<ConversionAction> {
    ACTIONS
        .iter()
        .find(|(s, t, _)| *s == source && *t == target)
        .map(|(_, _, action)| *action)
}

/// What the user asked for: a file and a format to turn it into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub target: Format,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>, target: Format) -> Self {
        Self {
            source: source.into(),
            target,
        }
    }

    /// Where the converted file will be written
    pub fn output_path(&self) -> PathBuf {
        output_path(&self.source, self.target)
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub output: PathBuf,
    pub source_format: Format,
    pub target_format: Format,
    pub elapsed: Duration,
}

/// `<dir>/<stem>.<target-ext>`, next to the source file
pub fn output_path(source: &Path, target: Format) -> PathBuf {
    source.with_extension(target.extension())
}

/// Check the request against the registry and return the source format and action
pub fn resolve(request: &ConversionRequest) -> Result<(Format, ConversionAction)> {
    let source_format = Format::from_path(&request.source)
        .filter(|f| !registry::targets_for(*f).is_empty())
        .ok_or_else(|| ConvertError::UnsupportedSource {
            extension: request
                .source
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

    let unsupported = || ConvertError::UnsupportedTarget {
        from: source_format,
        to: request.target,
    };
    if !registry::is_registered(source_format, request.target) {
        return Err(unsupported());
    }
    let action = action_for(source_format, request.target).ok_or_else(unsupported)?;
    Ok((source_format, action))
}

/// Run a conversion, overwriting any existing output file
pub fn convert(request: &ConversionRequest) -> Result<ConversionOutcome> {
    let start = Instant::now();
    let (source_format, action) = resolve(request)?;
    let output = request.output_path();

    log::info!(
        "Converting {} ({} -> {}) into {}",
        request.source.display(),
        source_format,
        request.target,
        output.display()
    );
    run_action(action, source_format, request.target, &request.source, &output)?;

    let elapsed = start.elapsed();
    log::info!("Finished in {:.2?}", elapsed);
    Ok(ConversionOutcome {
        output,
        source_format,
        target_format: request.target,
        elapsed,
    })
}

fn run_action(
    action: ConversionAction,
    from: Format,
    to: Format,
    input: &Path,
    output: &Path,
) -> Result<()> {
    log::debug!("{} -> {} via {:?}", from, to, action);
    match action {
        ReencodeImage => {
            let format = raster::encoder_format(to)
                .ok_or(ConvertError::UnsupportedTarget { from, to })?;
            raster::reencode_image(input, output, format)
        }
        Table { read, write } => tabular::convert_table(input, output, read, write),
        TextToHtml => document::text_to_html(input, output),
        MarkdownToHtml => document::markdown_to_html(input, output),
        MarkdownToText => document::markdown_to_text(input, output),
        TextToPdf => document::text_to_pdf(input, output),
        PdfToText => document::pdf_to_text(input, output),
        MultiHop { via } => run_multi_hop(from, via, to, input, output),
    }
}

/// Chain two single-leg actions through a hidden file next to the output.
///
/// The intermediate is removed only when both legs succeed; on failure it is
/// left behind for inspection.
fn run_multi_hop(from: Format, via: Format, to: Format, input: &Path, output: &Path) -> Result<()> {
    let first = action_for(from, via).ok_or(ConvertError::UnsupportedTarget { from, to: via })?;
    let second = action_for(via, to).ok_or(ConvertError::UnsupportedTarget { from: via, to })?;
    if matches!(first, MultiHop { .. }) || matches!(second, MultiHop { .. }) {
        return Err(ConvertError::UnsupportedTarget { from, to });
    }

    let intermediate = intermediate_path(output, via);
    log::debug!("Intermediate file: {}", intermediate.display());
    run_action(first, from, via, input, &intermediate)?;
    run_action(second, via, to, &intermediate, output)?;
    fs::remove_file(&intermediate)?;
    Ok(())
}

/// `<dir>/.<stem>.intermediate.<via-ext>`
pub fn intermediate_path(output: &Path, via: Format) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!(".{}.intermediate.{}", stem, via.extension()))
}
