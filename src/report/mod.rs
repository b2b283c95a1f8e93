//! Report module - conversion summaries and registry listings

pub mod registry_export;
pub mod summary;

pub use registry_export::*;
pub use summary::*;
