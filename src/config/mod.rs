//
//  pantry-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the CLI's settings from a TOML file in the
//! platform-specific configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/pantry/config.toml`
//! - **macOS**: `~/Library/Application Support/pantry/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\pantry\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://pantry.example.com"
//! timeout_secs = 30
//!
//! [storage]
//! backend = "keyring"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pantry_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! println!("Server: {}", config.api.base_url);
//!
//! config.set("api.timeout_secs", "30")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`api`]: the `[api]` section and base URL overrides
//! - [`storage`]: the `[storage]` section and session store selection
//! - [`file`]: low-level file I/O

mod api;
mod file;
mod storage;

pub use api::*;
pub use file::*;
pub use storage::*;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::KeyValueStore;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["api.base_url", "api.timeout_secs", "storage.backend"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Loads the configuration file, or the defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    /// Opens the session store selected by `[storage]`.
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        Ok(self.storage.open(&Self::data_dir()?))
    }

    /// Reads a setting by its dotted key. `None` for unknown or unset keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => self.api.timeout_secs.map(|secs| secs.to_string()),
            "storage.backend" => Some(self.storage.backend.to_string()),
            _ => None,
        }
    }

    /// Updates a setting by its dotted key.
    ///
    /// An empty `api.timeout_secs` clears the timeout.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                let value = value.trim().trim_end_matches('/');
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    anyhow::bail!("api.base_url must start with http:// or https://");
                }
                self.api.base_url = value.to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = match value.trim() {
                    "" => None,
                    secs => Some(
                        secs.parse()
                            .with_context(|| format!("'{}' is not a number of seconds", secs))?,
                    ),
                };
            }
            "storage.backend" => self.storage.backend = value.parse()?,
            _ => anyhow::bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", crate::APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}
