// ABOUTME: Server binary for the travel back-office admin password reset service
// ABOUTME: Loads configuration, selects the identity backend, and serves HTTP until shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! # Travel Backoffice Server Binary
//!
//! Serves the admin password reset endpoint against the hosted identity
//! backend, or against a seeded in-memory store with `--in-memory`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use travel_backoffice::{
    config::ServerConfig,
    identity::{InMemoryIdentityStore, SupabaseClient},
    logging,
    routes::password_reset::{FUNCTIONS_RESET_PASSWORD_PATH, RESET_PASSWORD_PATH},
    server,
    services::PasswordResetService,
};

#[derive(Parser)]
#[command(name = "backoffice-server")]
#[command(about = "Travel Backoffice - administrative password reset service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Serve against a seeded in-memory identity store instead of the hosted backend
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Travel Backoffice server");
    info!("{}", config.summary());

    let service = if args.in_memory {
        warn!("Running against the in-memory identity store; no real accounts are affected");
        info!("Seeded demo accounts: demo-admin (admin), demo-agent (agent), demo-customer (viewer)");
        PasswordResetService::from_backend(
            Arc::new(InMemoryIdentityStore::demo()),
            config.password_policy,
        )
    } else {
        let identity = config.require_identity()?;
        info!("Identity backend: {}", identity.base_url);
        PasswordResetService::from_backend(
            Arc::new(SupabaseClient::new(identity, &config.http_client)),
            config.password_policy,
        )
    };

    display_available_endpoints(&config);

    if let Err(e) = server::run(&config, service).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    info!("Available endpoints:");
    info!("  POST    {base}{RESET_PASSWORD_PATH}");
    info!("  POST    {base}{FUNCTIONS_RESET_PASSWORD_PATH}");
    info!("  OPTIONS {base}{RESET_PASSWORD_PATH}");
    info!("  GET     {base}/health");
    info!("  GET     {base}/ready");
}
