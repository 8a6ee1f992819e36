//! Axum HTTP gateway: `/chat` plus health and reward-table endpoints.
//!
//! Body size and whole-request time are bounded at the router; the request
//! timeout covers generation plus balance polling.

mod handlers;
mod server;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::activity::ActivityOrchestrator;
use std::sync::Arc;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ActivityOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: ActivityOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
