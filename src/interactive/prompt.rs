//
//  pantry-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Interactive Prompts
//!
//! Wrappers around `dialoguer` prompts.
//!
//! Every prompt fails with an error instead of blocking when no user is
//! attached to the terminal, so scripts get a clear message asking for the
//! missing flag.
//!
//! ```rust,no_run
//! use pantry_cli::interactive::{prompt_input, prompt_password};
//!
//! let email = prompt_input("Email")?;
//! let password = prompt_password("Password")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

fn ensure_attended(message: &str) -> Result<()> {
    if !console::user_attended() {
        anyhow::bail!(
            "Cannot prompt for '{}' without a terminal; pass it as an argument",
            message
        );
    }
    Ok(())
}

pub fn prompt_input(message: &str) -> Result<String> {
    ensure_attended(message)?;
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Accepts an empty answer as `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    ensure_attended(message)?;
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(input).filter(|s| !s.trim().is_empty()))
}

pub fn prompt_password(message: &str) -> Result<String> {
    ensure_attended(message)?;
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Asks twice and requires both answers to match.
pub fn prompt_password_confirm(message: &str) -> Result<String> {
    ensure_attended(message)?;
    let password = Password::new()
        .with_prompt(message)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    Ok(password)
}

pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    ensure_attended(message)?;
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Returns `value` if present, otherwise prompts for it.
pub fn value_or_prompt(value: Option<&str>, message: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value.to_string()),
        None => prompt_input(message),
    }
}
