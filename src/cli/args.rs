//! Command-line argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::pipeline::Format;

/// fileshift - Convert a single file between image, data and document formats
#[derive(Parser, Debug)]
#[command(name = "fileshift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start the wizard with this file already selected
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log verbosity (RUST_LOG takes precedence when set)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one file and write the result next to it
    Convert {
        /// File to convert
        input: PathBuf,

        /// Target format (e.g. png, xlsx, pdf).
        /// Prompted for interactively when omitted.
        #[arg(short, long, value_parser = parse_format)]
        to: Option<Format>,

        /// Skip interactive prompts; uses the first registered target when --to is omitted
        #[arg(long, default_value = "false")]
        no_confirm: bool,
    },

    /// List every supported conversion
    Formats {
        /// Write the registry as JSON to this path instead of printing a table
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Validator for format names
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse::<Format>().map_err(|_| {
        let known: Vec<&str> = Format::ALL.iter().map(|f| f.extension()).collect();
        format!("'{}' is not a known format (expected one of: {})", s, known.join(", "))
    })
}
