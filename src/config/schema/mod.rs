mod audit;
mod core;
mod gateway;
mod ledger;
mod provider;

pub use audit::{AuditBackend, AuditConfig};
pub use self::core::{CatalogConfig, Config, RewardsConfig};
pub use gateway::GatewayConfig;
pub use ledger::LedgerConfig;
pub use provider::ProviderConfig;
