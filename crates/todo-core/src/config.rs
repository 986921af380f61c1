//! Backend Configuration
//!
//! Connection settings for the hosted backend, as published by the page in a
//! global object.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::banner::DEFAULT_DISMISS_AFTER;

pub const DEFAULT_COLLECTION: &str = "todos";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("backend config is missing `{0}`")]
    Missing(&'static str),
    #[error("errorDismissMs must be greater than zero")]
    ZeroDismiss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    pub project_id: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_dismiss_ms")]
    pub error_dismiss_ms: u64,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_dismiss_ms() -> u64 {
    DEFAULT_DISMISS_AFTER.as_millis() as u64
}

impl BackendConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("apiKey"));
        }
        if self.auth_domain.trim().is_empty() {
            return Err(ConfigError::Missing("authDomain"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("projectId"));
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::Missing("collection"));
        }
        if self.error_dismiss_ms == 0 {
            return Err(ConfigError::ZeroDismiss);
        }
        Ok(())
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }
}
