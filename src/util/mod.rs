//
//  pantry-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Functions
//!
//! Small helpers shared by the command implementations:
//!
//! - [`read_line_from_stdin`]: reading a secret piped on stdin
//! - [`mask_token`]: showing a token without revealing it
//! - [`exit_code_for`]: mapping an error to a process exit code

use std::io::{self, BufRead};

use anyhow::Result;

use crate::api::ApiError;
use crate::exit_codes;

/// Reads one line from stdin, trimmed.
///
/// Used by `--password-stdin` so secrets can be piped:
/// `echo "$PASSWORD" | pantry auth login --email me@example.com --password-stdin`
pub fn read_line_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Keeps the first and last four characters of a token.
///
/// ```rust
/// use pantry_cli::util::mask_token;
///
/// assert_eq!(mask_token("abcdefghijklmnop"), "abcd********mnop");
/// assert_eq!(mask_token("short"), "*****");
/// ```
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

/// The exit code for an error that ended a command.
///
/// API errors anywhere in the chain decide the code: 401/403 map to
/// [`exit_codes::AUTH_ERROR`], 404 to [`exit_codes::NOT_FOUND`] and 429 to
/// [`exit_codes::RATE_LIMIT`].
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    let api_error = error.chain().find_map(|cause| cause.downcast_ref::<ApiError>());
    match api_error {
        Some(e) if e.is_unauthorized() => exit_codes::AUTH_ERROR,
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        Some(e) if e.status() == Some(429) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorObject;
    use anyhow::Context;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "");
        assert_eq!(mask_token("12345678"), "********");
        assert_eq!(mask_token("123456789"), "1234*6789");
    }

    #[test]
    fn test_exit_code_for_api_errors() {
        let unauthorized: anyhow::Error =
            ApiError::Api(ErrorObject::new("Unauthorized").with_status(401)).into();
        assert_eq!(exit_code_for(&unauthorized), exit_codes::AUTH_ERROR);

        let missing = Err::<(), _>(ApiError::Api(ErrorObject::new("not found").with_status(404)))
            .context("Failed to load pantry 7")
            .unwrap_err();
        assert_eq!(exit_code_for(&missing), exit_codes::NOT_FOUND);

        let limited: anyhow::Error =
            ApiError::Api(ErrorObject::new("Too many requests").with_status(429)).into();
        assert_eq!(exit_code_for(&limited), exit_codes::RATE_LIMIT);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }
}
