use super::handlers::{handle_activities, handle_chat, handle_health};
use super::{AppState, MAX_BODY_SIZE};

use crate::activity::ActivityOrchestrator;
use crate::config::{Config, GatewayConfig};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, StatusCode, header},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Bind the configured address and serve until the process is stopped.
pub async fn run_gateway(config: &Config) -> Result<()> {
    let gateway = &config.gateway;
    if is_public_bind(&gateway.host) && !gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {} without opt-in.\n\
             Fix: use --host 127.0.0.1 (default) or set\n\
             [gateway] allow_public_bind = true in config.toml.",
            gateway.host
        );
    }

    let addr: SocketAddr = format!("{}:{}", gateway.host, gateway.port)
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    let orchestrator = ActivityOrchestrator::from_config(config).await?;
    run_gateway_with_listener(listener, AppState::new(orchestrator), gateway).await
}

/// Serve from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    gateway: &GatewayConfig,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("get gateway listener local address")?;
    print_gateway_banner(&local_addr.to_string());
    tracing::info!(addr = %local_addr, "gateway listening");

    axum::serve(listener, build_app(state, gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn print_gateway_banner(display_addr: &str) {
    println!("Gateway listening on {display_addr}");
    println!("  POST /chat");
    println!("  GET  /activities");
    println!("  GET  /health");
}

pub fn build_app(state: AppState, gateway: &GatewayConfig) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/activities", get(handle_activities))
        .route("/chat", post(handle_chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if gateway.allows_any_origin() {
        app.layer(cors.allow_origin(Any))
    } else if gateway.cors_origins.is_empty() {
        app
    } else {
        let origins: Vec<_> = gateway
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        app.layer(cors.allow_origin(origins))
    }
}
