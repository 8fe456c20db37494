//! # WhatsApp Flows Gateway
//!
//! Minimal gateway between the WhatsApp Business Cloud API and a local
//! service: answers the webhook verification handshake, dispatches inbound
//! flow responses to a processing hook, and exposes an endpoint that sends
//! outbound flow-template messages.

pub mod config;
pub mod errors;
pub mod logger;
pub mod state;
pub mod webhook;
pub mod whatsapp;

use anyhow::Context;
use envconfig::Envconfig;
use log::info;
use ntex::web;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logger::setup_simple_logger()?;

    let app_config = config::AppConfig::init_from_env()
        .context("Failed to load application configuration from environment")?;

    let server_addr = (
        app_config.web_server_host.clone(),
        app_config.web_server_port,
    );
    let app_state = state::AppState::new(app_config)?;

    info!(
        "Starting WhatsApp Flows gateway on {host}:{port}",
        host = server_addr.0,
        port = server_addr.1
    );

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(app_state.clone())
            .configure(webhook::routes::register)
            .configure(whatsapp::routes::register)
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
