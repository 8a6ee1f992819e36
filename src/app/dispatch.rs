use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result};
use novibe_activities::Config;
use novibe_activities::activity::{ActivityOrchestrator, ActivityRequest, RewardCatalog};
use novibe_activities::gateway;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

async fn read_request(input: Option<&Path>) -> Result<ActivityRequest> {
    let raw = match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parse activity request JSON")
}

async fn run_complete(config: &Config, input: Option<&Path>) -> Result<()> {
    let request = read_request(input).await?;
    let orchestrator = Arc::new(ActivityOrchestrator::from_config(config).await?);
    let envelope = orchestrator.respond(request).await;
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    if envelope.is_error() {
        anyhow::bail!("activity did not complete");
    }
    Ok(())
}

fn print_activities(rewards: &RewardCatalog) {
    let entries = rewards.entries();
    let width = entries.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (id, points) in entries {
        println!("{id:<width$}  {points} XP");
    }
    println!();
    println!("Unlisted activities: {} XP", rewards.default_points());
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            gateway::run_gateway(&config).await
        }
        Commands::Complete { input } => run_complete(&config, input.as_deref()).await,
        Commands::Activities => {
            print_activities(&RewardCatalog::from_config(&config.rewards));
            Ok(())
        }
    }
}
