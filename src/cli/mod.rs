//
//  pantry-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command-Line Interface
//!
//! The `pantry` command tree, defined with the clap derive API.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `auth` | Log in, log out, register, verify, profile |
//! | `product` | Product catalogue |
//! | `category` | Product categories |
//! | `pantry` | Pantries, their items and sharing |
//! | `list` | Shopping lists, their items and actions |
//! | `config` | Read and write settings |
//! | `completion` | Shell completion scripts |
//! | `version` | Print the version |
//!
//! ## Global Options
//!
//! - `--json`: print results as JSON
//! - `--api-url`: talk to a different server for this invocation
//!
//! Each command module exposes a `XCommand` struct with a subcommand enum
//! and an async `run` method taking the [`GlobalOptions`].

mod auth;
mod category;
mod completion;
mod config;
mod list;
mod pantry;
mod product;

pub use auth::AuthCommand;
pub use category::CategoryCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use list::ListCommand;
pub use pantry::PantryCommand;
pub use product::ProductCommand;

use clap::{Args, Parser, Subcommand};

use crate::api::{ListParams, SortOrder};

#[derive(Parser, Debug)]
#[command(
    name = "pantry",
    version,
    about = "Manage pantries and shopping lists from the command line",
    long_about = "pantry is a CLI for the household pantry and shopping-list API.\n\n\
                  Track what is in your pantries, plan shopping lists, and share both.",
    propagate_version = true,
    after_help = "Use 'pantry <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL for this invocation (overrides PANTRY_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, log out and manage your account
    Auth(AuthCommand),

    /// Work with products
    #[command(visible_alias = "products")]
    Product(ProductCommand),

    /// Work with product categories
    #[command(visible_alias = "categories")]
    Category(CategoryCommand),

    /// Work with pantries and their items
    #[command(visible_alias = "pantries")]
    Pantry(PantryCommand),

    /// Work with shopping lists and their items
    #[command(visible_alias = "lists")]
    List(ListCommand),

    /// Read and write configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the version
    Version,
}

/// Pagination and sorting flags shared by list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long, short = 'L')]
    pub limit: Option<u32>,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl PageArgs {
    pub fn to_params(&self) -> ListParams {
        ListParams {
            page: self.page,
            per_page: self.limit,
            sort_by: self.sort.clone(),
            order: self
                .sort
                .as_ref()
                .map(|_| if self.desc { SortOrder::Desc } else { SortOrder::Asc }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pantry",
            "pantry",
            "list",
            "--json",
            "--api-url",
            "http://example.test",
        ])
        .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.api_url.as_deref(), Some("http://example.test"));
    }

    #[test]
    fn test_page_args_to_params() {
        let args = PageArgs {
            page: Some(2),
            limit: Some(10),
            sort: Some("name".into()),
            desc: true,
        };
        let params = args.to_params();
        assert_eq!(params.per_page, Some(10));
        assert_eq!(params.order, Some(SortOrder::Desc));

        assert_eq!(PageArgs::default().to_params(), ListParams::default());
    }
}
