//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// Small table used across the data conversion tests
pub const SAMPLE_CSV: &str = "id,name,score\n1,alice,3.5\n2,bob,4.0\n3,carol,2.25\n";

/// The same table as tab-separated text
pub const SAMPLE_TSV: &str = "id\tname\tscore\n1\talice\t3.5\n2\tbob\t4.0\n3\tcarol\t2.25\n";

pub const SAMPLE_MARKDOWN: &str = "# Release Notes\n\nThis release adds **PDF** export.\n\n- faster startup\n- fewer crashes\n";

/// Create a fresh scratch directory
pub fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a text file into `dir` and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// 4x4 PNG: left half fully transparent red, right half opaque blue
pub fn write_rgba_png(dir: &Path, name: &str) -> PathBuf {
    let img = RgbaImage::from_fn(4, 4, |x, _| {
        if x < 2 {
            Rgba([255, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

/// Workbook with a header row and three records matching `SAMPLE_CSV`
pub fn write_sample_xlsx(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "id").unwrap();
    sheet.write_string(0, 1, "name").unwrap();
    sheet.write_string(0, 2, "score").unwrap();
    for (i, (name, score)) in [("alice", 3.5), ("bob", 4.0), ("carol", 2.25)]
        .iter()
        .enumerate()
    {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        sheet.write_string(row, 1, *name).unwrap();
        sheet.write_number(row, 2, *score).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

/// Move a file into a subdirectory so a follow-up conversion does not
/// overwrite the original fixture
pub fn move_into(path: &Path, subdir: &str) -> PathBuf {
    let dir = path.parent().unwrap().join(subdir);
    std::fs::create_dir_all(&dir).unwrap();
    let dest = dir.join(path.file_name().unwrap());
    std::fs::rename(path, &dest).unwrap();
    dest
}

/// Names of hidden files left in `dir`
pub fn hidden_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with('.'))
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
