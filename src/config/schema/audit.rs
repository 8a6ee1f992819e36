use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditBackend {
    /// Supabase/PostgREST table insert
    Postgrest,
    /// Local append-only SQLite file
    Sqlite,
    #[default]
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub backend: AuditBackend,
    /// PostgREST project URL (e.g. `https://xyz.supabase.co`)
    #[serde(default)]
    pub url: Option<String>,
    /// PostgREST service key
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_audit_table")]
    pub table: String,
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    /// Platform tag stamped on every record
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_audit_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_audit_table() -> String {
    "message_paritition".into()
}

fn default_sqlite_path() -> String {
    "~/.novibe/audit.db".into()
}

fn default_platform() -> String {
    "game_activity".into()
}

fn default_audit_timeout_secs() -> u64 {
    10
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backend: AuditBackend::default(),
            url: None,
            api_key: None,
            table: default_audit_table(),
            sqlite_path: default_sqlite_path(),
            platform: default_platform(),
            timeout_secs: default_audit_timeout_secs(),
        }
    }
}
