//! fileshift: single-file format conversion
//!
//! Without a subcommand this opens the interactive wizard; `convert` and
//! `formats` run without a full-screen UI.

use anyhow::Result;
use clap::Parser;

use fileshift::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Some(command) = &cli.command {
        return match command {
            Commands::Convert {
                input,
                to,
                no_confirm,
            } => cli::convert::run_convert(input, *to, *no_confirm),
            Commands::Formats { json } => cli::convert::run_formats(json.as_deref()),
        };
    }

    let converted = cli::run_wizard(cli.input.as_deref())?;
    if converted > 0 {
        println!("{} file(s) converted.", converted);
    }
    Ok(())
}

/// `--log-level` sets the default filter; `RUST_LOG` overrides it
fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_level.as_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).init();
}
