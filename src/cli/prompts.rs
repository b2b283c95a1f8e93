//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Select};

use crate::pipeline::Format;

/// Prompt for a target format, `None` when the user backs out
pub fn select_target(input: &Path, source: Format, targets: &[Format]) -> Result<Option<Format>> {
    let items: Vec<String> = targets
        .iter()
        .map(|t| format!("{} (.{})", t.label(), t.extension()))
        .collect();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let choice = Select::new()
        .with_prompt(format!("Convert {} ({}) to", name, source))
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|idx| targets[idx]))
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}
