//! CLI module - argument parsing, the conversion wizard and prompts

mod args;
pub mod convert;
pub mod file_selector;
pub mod prompts;
pub mod status;
pub mod wizard;

pub use args::{Cli, Commands, LogLevel};
pub use status::{ConversionStatus, Notice};
pub use wizard::run_wizard;
