//
//  pantry-cli
//  config/storage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `[storage]` section: where the session token and cached profile are kept.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{FileStore, KeyValueStore, KeyringStore};

/// Name of the session file inside the data directory.
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `session.json` in the data directory
    #[default]
    File,
    /// The system keyring
    Keyring,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Keyring => write!(f, "keyring"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            other => anyhow::bail!("Unknown storage backend '{}' (expected file or keyring)", other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// Opens the configured store. File storage lives under `data_dir`.
    pub fn open(&self, data_dir: &Path) -> Arc<dyn KeyValueStore> {
        match self.backend {
            StorageBackend::File => Arc::new(FileStore::new(data_dir.join(SESSION_FILE))),
            StorageBackend::Keyring => Arc::new(KeyringStore::new()),
        }
    }
}
