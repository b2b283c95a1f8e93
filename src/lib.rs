//! fileshift: single-file format conversion
//!
//! Pick a file, pick a target format from a static registry, and get a
//! converted copy written next to the original. Images, tables and documents
//! are handled by the `image`, `polars`/`calamine`/`rust_xlsxwriter`, `lopdf`
//! and `pulldown-cmark` crates.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
