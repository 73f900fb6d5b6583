//! User prompt utilities for interactive confirmation

use anyhow::Result;
use dialoguer::Confirm;

/// Ask user for yes/no confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    Ok(result)
}

/// Ask before a destructive change unless told not to
pub fn confirm_destructive(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    confirm(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_does_not_prompt() {
        assert!(confirm_destructive("Delete everything?", true).unwrap());
    }
}
