pub mod schema;

pub use schema::{
    AuditBackend, AuditConfig, CatalogConfig, Config, GatewayConfig, LedgerConfig,
    ProviderConfig, RewardsConfig,
};
