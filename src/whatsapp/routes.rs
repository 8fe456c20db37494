//! Outbound send endpoint
//!
//! Exposes `POST /send-message` to callers on the local side of the
//! gateway and relays the provider's answer back to them.

use super::client::SendOutcome;
use crate::state::AppState;
use log::info;
use ntex::{http, web};
use serde::Deserialize;

fn default_consumption_id() -> String {
    "unused".to_string()
}

/// Request body for `POST /send-message`
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Recipient's WhatsApp ID (phone number with country code, no '+')
    pub to: String,
    /// Template name; falls back to the configured default
    pub template_name: Option<String>,
    /// Template language code; falls back to the configured default
    pub language_code: Option<String>,
    /// Opaque token forwarded to the flow action
    #[serde(default = "default_consumption_id")]
    pub consumption_id: String,
}

/// Send-message endpoint (POST)
///
/// Builds the flow-template payload and issues the provider call.
///
/// # Returns
/// - the provider's status code (200/201) with `{"status": "sent", ...}` on success
/// - the provider's status code with `{"error": ..., "details": ...}` on rejection
/// - 502 when the call itself failed (connect error, timeout)
/// - 500 when the WhatsApp configuration is absent
#[web::post("/send-message")]
pub async fn send_message(
    request: web::types::Json<SendMessageRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let config = &app_state.config;
    let template_name = request
        .template_name
        .as_deref()
        .unwrap_or(&config.default_template_name);
    let language_code = request
        .language_code
        .as_deref()
        .unwrap_or(&config.default_language_code);

    info!(
        "Sending template {template_name} ({language_code}) to {to}",
        to = request.to
    );

    let outcome = app_state
        .whatsapp
        .send_flow_template(&request.to, template_name, language_code, &request.consumption_id)
        .await;

    Ok(respond_with_outcome(outcome))
}

fn respond_with_outcome(outcome: SendOutcome) -> web::HttpResponse {
    let (status, body) = match outcome {
        SendOutcome::Sent { status, response } => (
            provider_status(status),
            serde_json::json!({ "status": "sent", "response": response }),
        ),
        SendOutcome::Rejected { status, details } => (
            provider_status(status),
            serde_json::json!({ "error": "WhatsApp API request failed", "details": details }),
        ),
        SendOutcome::Transport { reason } => (
            http::StatusCode::BAD_GATEWAY,
            serde_json::json!({ "error": reason, "details": null }),
        ),
        SendOutcome::MissingConfig => (
            http::StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "error": "Missing environment variables for WhatsApp API" }),
        ),
    };

    web::HttpResponse::build(status).json(&body)
}

fn provider_status(status: u16) -> http::StatusCode {
    http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::BAD_GATEWAY)
}

/// Configures the send-message route.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message);
}
