//
//  pantry-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! `get`, `set` and `list` over the dotted keys of the configuration file
//! (`api.base_url`, `api.timeout_secs`, `storage.backend`).

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print one setting
    Get(GetArgs),

    /// Change one setting
    Set(SetArgs),

    /// Print every setting
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Setting key, e.g. api.base_url
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Setting key, e.g. api.base_url
    pub key: String,

    /// New value; an empty string clears optional settings
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    if !CONFIG_KEYS.contains(&args.key.as_str()) {
        anyhow::bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    }

    let config = Config::load()?;
    let value = config.get(&args.key);

    if global.json {
        let result = serde_json::json!({
            "key": args.key,
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }

    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;

    tracing::debug!(key = %args.key, "Configuration updated");

    if global.json {
        let result = serde_json::json!({
            "success": true,
            "key": args.key,
            "value": config.get(&args.key),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Set {} = {}",
            style("✓").green(),
            style(&args.key).cyan(),
            args.value
        );
    }

    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        let values: serde_json::Map<String, serde_json::Value> = CONFIG_KEYS
            .iter()
            .map(|key| (key.to_string(), serde_json::json!(config.get(key))))
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    for key in CONFIG_KEYS {
        match config.get(key) {
            Some(value) => println!("{} = {}", style(key).cyan(), value),
            None => println!("{} = {}", style(key).cyan(), style("(unset)").dim()),
        }
    }

    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let path = Config::config_path()?;
    if global.json {
        let result = serde_json::json!({ "path": path });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
