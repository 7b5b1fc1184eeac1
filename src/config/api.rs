//
//  pantry-cli
//  config/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The `[api]` section: where the server lives and how long to wait for it.

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "PANTRY_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout; the transport default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Applies overrides in priority order: the explicit `flag` first, then
    /// `PANTRY_API_URL`, then the configured value.
    pub fn resolve(&self, flag: Option<&str>) -> Self {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_with(flag, env.as_deref())
    }

    fn resolve_with(&self, flag: Option<&str>, env: Option<&str>) -> Self {
        let base_url = [flag, env]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.base_url.clone());

        Self {
            base_url,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ApiConfig {
        ApiConfig {
            base_url: "http://config".to_string(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url, "http://localhost:8000");
    }

    #[test]
    fn test_override_priority() {
        let config = configured();
        assert_eq!(
            config.resolve_with(Some("http://flag"), Some("http://env")).base_url,
            "http://flag"
        );
        assert_eq!(config.resolve_with(None, Some("http://env")).base_url, "http://env");
        assert_eq!(config.resolve_with(None, None).base_url, "http://config");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let resolved = configured().resolve_with(Some("  "), Some(""));
        assert_eq!(resolved.base_url, "http://config");
        assert_eq!(resolved.timeout_secs, Some(5));
    }
}
