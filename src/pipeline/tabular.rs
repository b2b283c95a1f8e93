//! Tabular conversions: CSV, JSON records and XLSX workbooks
//!
//! Every table pair goes through a polars `DataFrame`. CSV and JSON are read
//! and written by polars itself; workbooks are read with calamine and written
//! with rust_xlsxwriter.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;

use super::error::{ConvertError, Result};

/// Rows scanned for CSV schema inference
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Worksheet size limits, header row included
pub const MAX_SHEET_ROWS: u32 = 1_048_576;
pub const MAX_SHEET_COLUMNS: u16 = 16_384;

/// How to read the source table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// Delimited text with a header row
    Csv { separator: u8 },
    /// A JSON array of records
    Json,
    /// First worksheet of a workbook, first row as header
    Xlsx,
}

/// How to write the target table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSink {
    Csv,
    Json,
    Xlsx,
}

impl TableSource {
    pub const COMMA: TableSource = TableSource::Csv { separator: b',' };
    pub const TAB: TableSource = TableSource::Csv { separator: b'\t' };
}

/// Read `input` with `source` and write it to `output` with `sink`
pub fn convert_table(input: &Path, output: &Path, source: TableSource, sink: TableSink) -> Result<()> {
    let mut df = read_table(input, source)?;
    let (rows, cols) = df.shape();
    log::debug!("Loaded {} rows x {} columns from {}", rows, cols, input.display());
    write_table(&mut df, output, sink)
}

/// Load a table from disk
pub fn read_table(path: &Path, source: TableSource) -> Result<DataFrame> {
    let df = match source {
        TableSource::Csv { separator } => LazyCsvReader::new(path)
            .with_separator(separator)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .finish()?
            .collect()?,
        TableSource::Json => {
            let file = File::open(path)?;
            JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()?
        }
        TableSource::Xlsx => read_workbook(path)?,
    };
    Ok(df)
}

/// Write a table to disk, overwriting any existing file
pub fn write_table(df: &mut DataFrame, path: &Path, sink: TableSink) -> Result<()> {
    match sink {
        TableSink::Csv => {
            let mut file = File::create(path)?;
            CsvWriter::new(&mut file).include_header(true).finish(df)?;
        }
        TableSink::Json => {
            let mut file = File::create(path)?;
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        TableSink::Xlsx => write_workbook(df, path)?,
    }
    Ok(())
}

// ============================================================================
// Workbook reading
// ============================================================================

fn read_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ConvertError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(header) => header,
        None => return Ok(DataFrame::empty()),
    };
    let body: Vec<&[Data]> = rows.collect();

    let names = header_names(header);
    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<Option<&Data>> = body
                .iter()
                .map(|row| row.get(idx).filter(|c| !matches!(c, Data::Empty)))
                .collect();
            infer_column(name, &cells)
        })
        .collect::<Vec<Column>>();

    Ok(DataFrame::new(columns)?)
}

/// Column names from the header row, with blanks filled and duplicates suffixed
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {}", idx),
                other => other.to_string(),
            };
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

/// Build a typed column from workbook cells.
///
/// Integral numbers become Int64, other numbers Float64, booleans Boolean and
/// anything mixed falls back to text.
fn infer_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let present = || cells.iter().flatten();
    let name: PlSmallStr = name.into();

    if present().all(|c| is_integral(c)) && present().next().is_some() {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|c| {
                c.and_then(|d| match d {
                    Data::Int(i) => Some(*i),
                    Data::Float(f) => Some(*f as i64),
                    _ => None,
                })
            })
            .collect();
        return Column::new(name, values);
    }

    if present().all(|c| matches!(c, Data::Int(_) | Data::Float(_))) && present().next().is_some() {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|c| {
                c.and_then(|d| match d {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
            })
            .collect();
        return Column::new(name, values);
    }

    if present().all(|c| matches!(c, Data::Bool(_))) && present().next().is_some() {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|c| {
                c.and_then(|d| match d {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
            })
            .collect();
        return Column::new(name, values);
    }

    let values: Vec<Option<String>> = cells.iter().map(|c| c.map(|d| d.to_string())).collect();
    Column::new(name, values)
}

fn is_integral(cell: &Data) -> bool {
    match cell {
        Data::Int(_) => true,
        Data::Float(f) => f.fract() == 0.0 && f.abs() < 9.0e15,
        _ => false,
    }
}

// ============================================================================
// Workbook writing
// ============================================================================

fn write_workbook(df: &DataFrame, path: &Path) -> Result<()> {
    let (height, width) = df.shape();
    let too_large = || ConvertError::WorksheetLimit {
        rows: height + 1,
        columns: width,
        max_rows: MAX_SHEET_ROWS,
        max_columns: MAX_SHEET_COLUMNS,
    };
    let max_col = u16::try_from(width).map_err(|_| too_large())?;
    let max_row = u32::try_from(height).map_err(|_| too_large())?;
    if max_col > MAX_SHEET_COLUMNS || max_row >= MAX_SHEET_ROWS {
        return Err(too_large());
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, column) in (0u16..).zip(df.get_columns()) {
        worksheet.write_string(0, col, column.name().as_str())?;

        let numeric = column.dtype().is_integer() || column.dtype().is_float();
        for (row, row_idx) in (1u32..).zip(0..height) {
            match column.get(row_idx)? {
                AnyValue::Null => {}
                AnyValue::Boolean(b) => {
                    worksheet.write_boolean(row, col, b)?;
                }
                AnyValue::String(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                AnyValue::StringOwned(s) => {
                    worksheet.write_string(row, col, s.as_str())?;
                }
                value if numeric => match value.extract::<f64>() {
                    Some(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                    None => {
                        worksheet.write_string(row, col, value.to_string())?;
                    }
                },
                value => {
                    worksheet.write_string(row, col, value.to_string())?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
