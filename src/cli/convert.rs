//! Non-interactive `convert` and `formats` commands

use std::path::Path;

use anyhow::{bail, Result};
use console::style;

use super::prompts::{confirm_step, select_target};
use super::status::{error_message, success_message, ConversionStatus};
use crate::pipeline::{self, registry, ConversionRequest, Format};
use crate::report::{export_registry, registry_table, ConversionSummary};
use crate::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_info, print_request, print_success,
};

/// Convert one file from the command line
///
/// # Arguments
/// * `input` - File to convert
/// * `to` - Target format; prompted for when `None`
/// * `no_confirm` - Skip prompts and take the first registered target if `to` is `None`
pub fn run_convert(input: &Path, to: Option<Format>, no_confirm: bool) -> Result<()> {
    if !input.is_file() {
        bail!("Input file not found: {}", input.display());
    }

    let source = match registry::source_format(input) {
        Some(source) => source,
        None => {
            let ext = input
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            bail!(
                "Unsupported format: '{}'. Run `fileshift formats` to list supported conversions.",
                ext
            );
        }
    };
    let targets = registry::targets_for(source);

    let target = match to {
        Some(target) => target,
        None if no_confirm => match targets.first() {
            Some(&first) => first,
            None => bail!("No conversions registered for {}", source),
        },
        None => match select_target(input, source, targets)? {
            Some(target) => target,
            None => {
                println!("Cancelled by user.");
                return Ok(());
            }
        },
    };

    if !registry::is_registered(source, target) {
        let allowed: Vec<&str> = targets.iter().map(|t| t.extension()).collect();
        bail!(
            "Cannot convert {} to {}. Available targets: {}",
            source,
            target,
            allowed.join(", ")
        );
    }

    let request = ConversionRequest::new(input, target);
    let output = request.output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_request(input, target, &output);

    if output.exists() && !no_confirm && to.is_none() {
        let message = format!("{} already exists. Replace it?", output.display());
        if !confirm_step(&message)? {
            println!("Cancelled by user.");
            return Ok(());
        }
    }

    let spinner = create_spinner(ConversionStatus::Converting.label());
    match pipeline::convert(&request) {
        Ok(outcome) => {
            finish_with_success(&spinner, ConversionStatus::Completed.label());
            println!();
            for line in success_message(&outcome.output).lines() {
                print_success(line);
            }
            ConversionSummary::new(input, &outcome).display();
            print_completion();
            Ok(())
        }
        Err(err) => {
            finish_with_error(&spinner, ConversionStatus::Failed.label());
            log::warn!("Conversion of {} failed: {:?}", input.display(), err);
            bail!(error_message(&err))
        }
    }
}

/// Print the registry, or export it as JSON
pub fn run_formats(json: Option<&Path>) -> Result<()> {
    match json {
        Some(path) => {
            export_registry(path)?;
            print_info(&format!(
                "Format registry written to {}",
                style(path.display()).cyan()
            ));
        }
        None => {
            println!();
            println!(
                "    {} {}",
                style("📋").cyan(),
                style("SUPPORTED CONVERSIONS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            println!();
            for line in registry_table().to_string().lines() {
                println!("    {}", line);
            }
            println!();
        }
    }
    Ok(())
}
