//! Subcommand handlers.

pub mod auth;
pub mod datasets;
pub mod jobs;
pub mod rag;

use crate::error::{CliError, Result};
use std::io::Write;

/// y/N confirmation gate used before destructive actions.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Use the `--password` value when given, otherwise prompt without echo.
pub(crate) fn resolve_password(provided: Option<String>) -> Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| CliError::Input(format!("Cannot read password: {}", e))),
    }
}
