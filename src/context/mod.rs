//
//  pantry-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command Context
//!
//! Everything a command needs, resolved once from the configuration file,
//! the environment and the global flags:
//!
//! - the effective [`Config`] (with `--api-url` / `PANTRY_API_URL` applied)
//! - the [`Session`] on the configured store
//! - a [`PantryClient`] that reads its token from that session
//! - the [`OutputWriter`] for `--json` or tables
//!
//! ## Example
//!
//! ```rust,no_run
//! use pantry_cli::cli::GlobalOptions;
//! use pantry_cli::context::AppContext;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ctx = AppContext::resolve(&GlobalOptions::default())?;
//! ctx.require_auth()?;
//! let profile = ctx.client.get_profile().await?;
//! ctx.output.write(&profile)?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::PantryClient;
use crate::auth::{KeyValueStore, Session};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::output::OutputWriter;

pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub client: PantryClient,
    pub output: OutputWriter,
}

impl AppContext {
    /// Loads the configuration and opens the configured session store.
    pub fn resolve(global: &GlobalOptions) -> Result<Self> {
        let config = Config::load()?;
        let store = config.open_store()?;
        Self::from_parts(config, store, global)
    }

    /// Builds a context from an already loaded configuration and store.
    pub fn from_parts(
        mut config: Config,
        store: Arc<dyn KeyValueStore>,
        global: &GlobalOptions,
    ) -> Result<Self> {
        config.api = config.api.resolve(global.api_url.as_deref());

        let session = Session::new(store);
        let client = PantryClient::from_config(&config.api)
            .context("Failed to create HTTP client")?
            .with_token_provider(Arc::new(session.clone()));

        tracing::debug!(base_url = %client.base_url(), "Resolved command context");

        Ok(Self {
            config,
            session,
            client,
            output: OutputWriter::from_flag(global.json),
        })
    }

    /// Fails with a hint to log in when no token is stored.
    pub fn require_auth(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            anyhow::bail!(
                "Not logged in. Run '{} auth login' first.",
                crate::APP_NAME
            );
        }
        Ok(())
    }
}
