use super::AuditLog;
use crate::activity::AuditRecord;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use uuid::Uuid;

/// Local audit log backed by a SQLite file.
pub struct SqliteAuditLog {
    pool: SqlitePool,
}

impl SqliteAuditLog {
    /// Open (or create) the database at `path` and run migrations.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create audit directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .context("connect audit database")?;
        Self::new(pool).await
    }

    /// Wrap an existing pool and create the table if needed.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS activity_messages (
                 id TEXT PRIMARY KEY,
                 email TEXT NOT NULL,
                 bot_id TEXT NOT NULL,
                 user_message TEXT NOT NULL,
                 bot_response TEXT NOT NULL,
                 requested_time TEXT NOT NULL,
                 platform TEXT NOT NULL,
                 activity_name TEXT
             )",
        )
        .execute(&pool)
        .await
        .context("create activity_messages table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activity_messages_user
                 ON activity_messages(email, bot_id, requested_time)",
        )
        .execute(&pool)
        .await
        .context("create activity_messages index")?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert(&self, record: &AuditRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO activity_messages
                 (id, email, bot_id, user_message, bot_response, requested_time, platform, activity_name)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&record.email)
        .bind(&record.bot_id)
        .bind(&record.user_message)
        .bind(&record.bot_response)
        .bind(record.requested_time.to_rfc3339())
        .bind(&record.platform)
        .bind(record.activity_name.as_deref())
        .execute(&self.pool)
        .await
        .context("insert audit record")?;
        Ok(())
    }
}

impl AuditLog for SqliteAuditLog {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.insert(record))
    }
}
