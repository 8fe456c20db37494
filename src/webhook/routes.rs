//! Webhook endpoint handlers
//!
//! This module handles the requests WhatsApp sends to this service: the
//! verification handshake (GET) and the event receiver (POST).

use super::{handler, schemas};
use crate::{errors::ApiError, state::AppState};
use log::{info, warn};
use ntex::{util::Bytes, web};
use serde::Deserialize;

/// Query parameters for webhook verification
///
/// All parameters are optional; a missing one fails verification instead
/// of failing extraction.
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// The verification token from WhatsApp
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Checks a verification request against the configured verify token.
///
/// Returns the challenge as an integer on success. A non-integer
/// challenge is reported as a malformed request, never a panic.
pub fn check_verification(query: &VerifyQuery, verify_token: &str) -> Result<i64, ApiError> {
    if query.mode.as_deref() != Some("subscribe") {
        return Err(ApiError::Forbidden);
    }

    if query.verify_token.as_deref() != Some(verify_token) {
        return Err(ApiError::Forbidden);
    }

    query
        .challenge
        .as_deref()
        .unwrap_or_default()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidChallenge)
}

/// Webhook verification endpoint (GET)
///
/// WhatsApp sends a GET request to verify the webhook URL.
/// This endpoint validates the verify token and returns the challenge.
///
/// # Returns
/// - 200 with the challenge as an integer if verification succeeds
/// - 403 `{"error": "Forbidden"}` on mode or token mismatch
/// - 400 if the challenge is not integer-parseable
#[web::get("/webhook")]
pub async fn verify(
    query: web::types::Query<VerifyQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let challenge = check_verification(&query, &app_state.config.verify_token)?;

    info!("Webhook verification successful");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(challenge.to_string()))
}

/// Webhook receiver endpoint (POST)
///
/// Receives webhook events from the WhatsApp Business API and dispatches
/// the flow responses they carry to the configured hook.
///
/// Always responds `200 {"status": "ok"}`, including on malformed bodies
/// and internal failures: a non-2xx answer would make the provider
/// redeliver the event.
#[web::post("/webhook")]
pub async fn receive(
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let payload = match serde_json::from_slice::<schemas::WebhookPayload>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Ignoring webhook body that is not a payload object: {e}");
            schemas::WebhookPayload::default()
        }
    };

    info!(
        "Received webhook: object={object:?}, entries={entries}",
        object = payload.object,
        entries = payload.entry.len()
    );

    // WhatsApp gives us 20 seconds to respond; dispatch synchronously.
    handler::dispatch(&payload, app_state.flow_hook.as_ref()).await;

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok"
    })))
}

/// Configures the webhook routes.
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service((verify, receive));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscribe_query(token: &str, challenge: &str) -> VerifyQuery {
        VerifyQuery {
            mode: Some("subscribe".to_string()),
            verify_token: Some(token.to_string()),
            challenge: Some(challenge.to_string()),
        }
    }

    #[test]
    fn test_verify_query_deserialization() {
        let json = r#"{"hub.mode":"subscribe","hub.verify_token":"test123","hub.challenge":"challenge123"}"#;
        let query: VerifyQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.mode.as_deref(), Some("subscribe"));
        assert_eq!(query.verify_token.as_deref(), Some("test123"));
        assert_eq!(query.challenge.as_deref(), Some("challenge123"));
    }

    #[test]
    fn test_check_verification_returns_challenge() {
        let query = subscribe_query("secret", "1158201444");
        assert_eq!(check_verification(&query, "secret").unwrap(), 1158201444);
    }

    #[test]
    fn test_check_verification_rejects_wrong_token() {
        let query = subscribe_query("wrong", "1158201444");
        assert!(matches!(
            check_verification(&query, "secret"),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn test_check_verification_rejects_wrong_mode() {
        let query = VerifyQuery {
            mode: Some("unsubscribe".to_string()),
            ..subscribe_query("secret", "1158201444")
        };
        assert!(matches!(
            check_verification(&query, "secret"),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn test_check_verification_rejects_missing_params() {
        let query = VerifyQuery {
            mode: None,
            verify_token: None,
            challenge: None,
        };
        assert!(matches!(
            check_verification(&query, "secret"),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn test_check_verification_rejects_non_integer_challenge() {
        let query = subscribe_query("secret", "not-a-number");
        assert!(matches!(
            check_verification(&query, "secret"),
            Err(ApiError::InvalidChallenge)
        ));
    }
}
