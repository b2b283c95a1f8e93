//! Tests for CSV, JSON, XLSX and tab-separated text conversions

mod common;

use common::*;
use fileshift::pipeline::tabular::{read_table, TableSource};
use fileshift::pipeline::{convert, ConversionRequest, Format};
use polars::prelude::*;

#[test]
fn test_csv_json_csv_preserves_rows_and_columns() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "scores.csv", SAMPLE_CSV);

    let json = convert(&ConversionRequest::new(&csv, Format::Json)).unwrap().output;
    let json = move_into(&json, "round");
    let back = convert(&ConversionRequest::new(&json, Format::Csv)).unwrap().output;

    let original = read_table(&csv, TableSource::COMMA).unwrap();
    let round_tripped = read_table(&back, TableSource::COMMA).unwrap();

    assert_eq!(round_tripped.height(), original.height());
    let mut original_names: Vec<String> =
        original.get_column_names().iter().map(|s| s.to_string()).collect();
    let mut round_names: Vec<String> =
        round_tripped.get_column_names().iter().map(|s| s.to_string()).collect();
    original_names.sort();
    round_names.sort();
    assert_eq!(round_names, original_names);
}

#[test]
fn test_csv_to_json_writes_record_array() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "scores.csv", SAMPLE_CSV);

    let json = convert(&ConversionRequest::new(&csv, Format::Json)).unwrap().output;

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    let records = value.as_array().expect("top level should be an array");
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["name"], "bob");
    assert_eq!(records[2]["score"], 2.25);
}

#[test]
fn test_csv_to_xlsx_and_back() {
    let dir = temp_dir();
    let csv = write_file(dir.path(), "scores.csv", SAMPLE_CSV);

    let xlsx = convert(&ConversionRequest::new(&csv, Format::Xlsx)).unwrap().output;
    let df = read_table(&xlsx, TableSource::Xlsx).unwrap();

    assert_shape(&df, 3, 3);
    assert_has_columns(&df, &["id", "name", "score"]);
    assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("score").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_xlsx_to_csv() {
    let dir = temp_dir();
    let xlsx = write_sample_xlsx(dir.path(), "sheet.xlsx");

    let csv = convert(&ConversionRequest::new(&xlsx, Format::Csv)).unwrap().output;

    let text = std::fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,name,score"));
    assert_eq!(lines.next(), Some("1,alice,3.5"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_xlsx_to_json() {
    let dir = temp_dir();
    let xlsx = write_sample_xlsx(dir.path(), "sheet.xlsx");

    let json = convert(&ConversionRequest::new(&xlsx, Format::Json)).unwrap().output;
    let df = read_table(&json, TableSource::Json).unwrap();

    assert_shape(&df, 3, 3);
    assert_has_columns(&df, &["id", "name", "score"]);
}

#[test]
fn test_json_to_xlsx() {
    let dir = temp_dir();
    let json = write_file(
        dir.path(),
        "people.json",
        r#"[{"name":"ann","age":31,"active":true},{"name":"ben","age":null,"active":false}]"#,
    );

    let xlsx = convert(&ConversionRequest::new(&json, Format::Xlsx)).unwrap().output;
    let df = read_table(&xlsx, TableSource::Xlsx).unwrap();

    assert_shape(&df, 2, 3);
    assert_eq!(df.column("active").unwrap().dtype(), &DataType::Boolean);
    assert_eq!(df.column("age").unwrap().null_count(), 1);
}

#[test]
fn test_text_is_read_as_tab_separated() {
    let dir = temp_dir();
    let txt = write_file(dir.path(), "export.txt", SAMPLE_TSV);

    let csv = convert(&ConversionRequest::new(&txt, Format::Csv)).unwrap().output;
    let df = read_table(&csv, TableSource::COMMA).unwrap();

    assert_shape(&df, 3, 3);
    assert_has_columns(&df, &["id", "name", "score"]);
}

#[test]
fn test_text_to_xlsx() {
    let dir = temp_dir();
    let txt = write_file(dir.path(), "export.txt", SAMPLE_TSV);

    let xlsx = convert(&ConversionRequest::new(&txt, Format::Xlsx)).unwrap().output;
    let df = read_table(&xlsx, TableSource::Xlsx).unwrap();

    assert_shape(&df, 3, 3);
}

#[test]
fn test_invalid_json_fails() {
    let dir = temp_dir();
    let json = write_file(dir.path(), "bad.json", "{ this is not json");

    assert!(convert(&ConversionRequest::new(&json, Format::Csv)).is_err());
}
