pub mod client;
pub mod poller;

pub use client::{AwardRequest, HttpRewardLedger, RewardLedger};
pub use poller::BalancePoller;
