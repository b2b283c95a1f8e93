//! Pipeline module - format registry, dispatch and the converters behind it

pub mod dispatch;
pub mod document;
pub mod error;
pub mod raster;
pub mod registry;
pub mod tabular;

pub use dispatch::{convert, output_path, ConversionAction, ConversionOutcome, ConversionRequest};
pub use error::{ConvertError, Result};
pub use registry::{Category, Format, FormatEntry};
