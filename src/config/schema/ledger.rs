use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote XP ledger endpoints and the reconciliation policy applied to reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Ledger service root; `/award-xp` and `/user-xp-current/..` hang off it.
    #[serde(default = "default_ledger_base_url")]
    pub base_url: String,
    /// Per-call timeout for award and balance requests
    #[serde(default = "default_ledger_timeout_secs")]
    pub timeout_secs: u64,
    /// Total balance reads when reconciling after a confirmed award
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    /// Fixed delay between balance reads
    #[serde(default = "default_poll_delay_ms")]
    pub poll_delay_ms: u64,
    /// Pause after a confirmed award before the first read (0 disables)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_ledger_base_url() -> String {
    "https://novibe-backend-233451779807.us-central1.run.app".into()
}

fn default_ledger_timeout_secs() -> u64 {
    5
}

fn default_poll_attempts() -> u32 {
    5
}

fn default_poll_delay_ms() -> u64 {
    1_000
}

fn default_settle_delay_ms() -> u64 {
    2_500
}

impl LedgerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: default_ledger_base_url(),
            timeout_secs: default_ledger_timeout_secs(),
            poll_attempts: default_poll_attempts(),
            poll_delay_ms: default_poll_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}
