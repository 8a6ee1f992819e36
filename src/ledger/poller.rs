use super::client::RewardLedger;
use crate::activity::BalanceSnapshot;
use crate::config::LedgerConfig;
use std::time::Duration;

/// Bounded read-after-write reconciliation against the XP ledger.
///
/// A confirmed award is not always visible to the next balance read. The
/// poller re-reads with a fixed delay until a read converges or the attempt
/// budget is spent, then hands back whatever it saw last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancePoller {
    attempts: u32,
    delay: Duration,
    settle_delay: Duration,
}

impl BalancePoller {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
            settle_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.poll_attempts, config.poll_delay()).with_settle_delay(config.settle_delay())
    }

    /// Pause once after a confirmed award before the first read.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Poll until a read converges or the budget is exhausted.
    pub async fn reconcile(
        &self,
        ledger: &dyn RewardLedger,
        email: &str,
        persona_id: &str,
    ) -> BalanceSnapshot {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        let mut last = None;
        for attempt in 1..=self.attempts {
            let snapshot = BalanceSnapshot::from_read(
                ledger.read_balance(email, persona_id).await,
                attempt,
            );
            if snapshot.resolved {
                if attempt > 1 {
                    tracing::debug!(bot_id = persona_id, attempt, "XP balance converged");
                }
                return snapshot;
            }
            last = snapshot.value;
            if attempt < self.attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::warn!(
            bot_id = persona_id,
            attempts = self.attempts,
            "XP balance did not converge; returning last response"
        );
        BalanceSnapshot {
            value: last,
            resolved: false,
            attempts: self.attempts,
        }
    }

    /// Single best-effort read, no retry.
    pub async fn read_once(
        &self,
        ledger: &dyn RewardLedger,
        email: &str,
        persona_id: &str,
    ) -> BalanceSnapshot {
        BalanceSnapshot::from_read(ledger.read_balance(email, persona_id).await, 1)
    }
}

impl Default for BalancePoller {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}
