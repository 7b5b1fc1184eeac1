//
//  pantry-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pantry CLI Library
//!
//! A client library and command-line interface for a household pantry and
//! shopping-list service.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `pantry` CLI tool:
//! an HTTP client that builds URLs, attaches the session token, normalizes
//! the server's many response shapes, and serializes writes that touch the
//! same collection.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client, response normalization, resource functions and the write queue
//! - [`auth`]: Session token storage (file or system keyring)
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`context`]: Wiring of config, session and client for a command
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pantry_cli::api::{PantryClient, ProductFilter};
//!
//! # async fn run() -> Result<(), pantry_cli::api::ApiError> {
//! let client = PantryClient::new("http://localhost:5000")?.with_token("secret");
//! let products = client.get_products(&ProductFilter::default()).await?;
//! for product in &products {
//!     println!("{} {}", product.id, product.name);
//! }
//! # Ok(())
//! # }
//! ```

/// HTTP client for the pantry service.
///
/// Builds request URLs, injects the bearer token, normalizes response
/// bodies into one [`api::Payload`] shape and exposes a function per
/// endpoint. Pantry-item and list-item writes go through a per-key
/// [`api::SerialQueue`].
pub mod api;

/// Session token storage.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/pantry/config.toml`
/// - macOS: `~/Library/Application Support/pantry/config.toml`
/// - Windows: `%APPDATA%\pantry\config.toml`
pub mod config;

/// Per-command application context.
pub mod context;

/// Interactive terminal prompts.
pub mod interactive;

/// Output formatting for table and JSON modes.
pub mod output;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use pantry_cli::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(url) = config.get("api.base_url") {
///     println!("Server: {}", url);
/// }
/// ```
pub use config::Config;

/// Application name, used for the binary and configuration paths.
pub const APP_NAME: &str = "pantry";

/// Application version, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use pantry_cli::VERSION;
///
/// println!("pantry version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors; clap exits with `2` on invalid arguments
/// - `4-7`: Authentication-related issues
/// - `8-31`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Authentication required or failed.
    ///
    /// No session token is stored or the server rejected it.
    /// Run `pantry auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested pantry, list, product or item does not exist
    /// or is not visible to the current user.
    pub const NOT_FOUND: i32 = 8;

    /// The server is rate limiting this client.
    pub const RATE_LIMIT: i32 = 32;
}
