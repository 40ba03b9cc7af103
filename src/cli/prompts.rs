//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm removing a registered defect
pub fn confirm_removal(id: u64, description: &str) -> Result<bool> {
    let message = format!("Remove defect #{} ({})?", id, description);
    confirm_step(&message, false)
}
