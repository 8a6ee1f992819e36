use super::super::{AuditBackend, AuditConfig, GatewayConfig, LedgerConfig, ProviderConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub rewards: RewardsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// XP values layered over the built-in activity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// XP for activities missing from the table
    #[serde(default = "default_points")]
    pub default_points: u32,
    #[serde(default)]
    pub overrides: BTreeMap<String, u32>,
}

fn default_points() -> u32 {
    2
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            default_points: default_points(),
            overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Persona/activity catalog TOML; the embedded catalog is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.poll_attempts == 0 {
            return Err(ConfigError::Validation(
                "ledger.poll_attempts must be at least 1".into(),
            ));
        }
        if self.ledger.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "ledger.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.ledger.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("ledger.base_url is empty".into()));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::Validation(format!(
                "provider.temperature {} outside 0.0..=2.0",
                self.provider.temperature
            )));
        }
        if self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.audit.backend == AuditBackend::Postgrest
            && (self.audit.url.is_none() || self.audit.api_key.is_none())
        {
            return Err(ConfigError::Validation(
                "audit.backend = \"postgrest\" requires audit.url and audit.api_key".into(),
            ));
        }
        Ok(())
    }
}
