//! Durable, append-only record of persona exchanges.

pub mod postgrest;
pub mod sqlite;

pub use postgrest::PostgrestAuditLog;
pub use sqlite::SqliteAuditLog;

use crate::activity::AuditRecord;
use crate::config::{AuditBackend, AuditConfig, Config};
use anyhow::Context;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub trait AuditLog: Send + Sync {
    fn name(&self) -> &str;

    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}

/// Drops records after tracing them.
pub struct DisabledAuditLog;

impl AuditLog for DisabledAuditLog {
    fn name(&self) -> &str {
        "disabled"
    }

    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            tracing::debug!(
                bot_id = record.bot_id.as_str(),
                activity = record.activity_name.as_deref().unwrap_or(""),
                "audit log disabled; record dropped"
            );
            Ok(())
        })
    }
}

pub async fn create_audit_log(config: &AuditConfig) -> anyhow::Result<Arc<dyn AuditLog>> {
    match config.backend {
        AuditBackend::Postgrest => Ok(Arc::new(
            PostgrestAuditLog::from_config(config).context("create PostgREST audit log")?,
        )),
        AuditBackend::Sqlite => {
            let path = Config::expand_path(&config.sqlite_path);
            Ok(Arc::new(
                SqliteAuditLog::open(&path)
                    .await
                    .with_context(|| format!("open SQLite audit log {}", path.display()))?,
            ))
        }
        AuditBackend::Disabled => Ok(Arc::new(DisabledAuditLog)),
    }
}
