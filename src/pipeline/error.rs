//! Error types for the conversion layer.
//!
//! Every failure a conversion can hit funnels into `ConvertError`. The front
//! ends do not branch on the variant: they show the message in a single
//! "conversion failed" notice. The variants exist so logs and tests can tell
//! a rejected request apart from a library failure.

use thiserror::Error;

use super::registry::Format;

/// Errors that can occur while resolving or running a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source file's extension is not in the registry.
    #[error("Unsupported source format: '{extension}'")]
    UnsupportedSource {
        /// Extension as found on the path (may be empty)
        extension: String,
    },

    /// The target format is not registered for the source format.
    #[error("Cannot convert {from} to {to}")]
    UnsupportedTarget {
        /// Inferred source format
        from: Format,
        /// Requested target format
        to: Format,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Parsing or serializing tabular data failed.
    #[error("Table error: {0}")]
    Table(#[from] polars::prelude::PolarsError),

    /// Opening or reading a workbook failed.
    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    /// Writing a workbook failed.
    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Building or parsing a PDF failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The table does not fit on one worksheet.
    #[error("Table of {rows} rows x {columns} columns exceeds the worksheet limit of {max_rows} rows x {max_columns} columns")]
    WorksheetLimit {
        rows: usize,
        columns: usize,
        max_rows: u32,
        max_columns: u16,
    },

    /// The workbook has no worksheet to read.
    #[error("Workbook contains no worksheets")]
    EmptyWorkbook,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
