//! # WhatsApp API Client
//!
//! Client for sending flow-template messages through the WhatsApp
//! Business API. Each send is single-shot: no retry, no backoff; the
//! provider's answer is mapped to a [`SendOutcome`] instead of being
//! collapsed into an error, so the caller can relay status and details.

use super::outgoing::TemplateMessage;
use crate::config::AppConfig;
use std::time::Duration;

/// Bound on the outbound provider call.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of an outbound send attempt.
#[derive(Debug)]
pub enum SendOutcome {
    /// The provider accepted the message (HTTP 200/201).
    Sent {
        status: u16,
        response: serde_json::Value,
    },
    /// The provider rejected the message with a non-success status.
    Rejected {
        status: u16,
        details: serde_json::Value,
    },
    /// The call never completed (connect error, timeout, malformed response).
    Transport { reason: String },
    /// Phone number ID or access token is not configured.
    MissingConfig,
}

/// WhatsApp API client for sending template messages
#[derive(Clone)]
pub struct WhatsAppClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Messages endpoint, present only when the phone number ID is configured
    endpoint: Option<String>,
    /// Bearer token, present only when configured
    auth_token: Option<String>,
}

impl WhatsAppClient {
    /// Creates a new WhatsApp client from the application configuration.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?,
            endpoint: config.send_message_endpoint(),
            auth_token: config.access_token.clone(),
        })
    }

    /// Sends a template message carrying one flow button.
    ///
    /// Short-circuits to [`SendOutcome::MissingConfig`] before any network
    /// call when either required configuration value is absent.
    pub async fn send_flow_template(
        &self,
        to: &str,
        template_name: &str,
        language_code: &str,
        flow_token: &str,
    ) -> SendOutcome {
        let (Some(endpoint), Some(auth_token)) = (&self.endpoint, &self.auth_token) else {
            return SendOutcome::MissingConfig;
        };

        let message = TemplateMessage::flow(
            to.to_string(),
            template_name.to_string(),
            language_code.to_string(),
            flow_token.to_string(),
        );

        let response = match self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {auth_token}"))
            .header("Content-Type", "application/json")
            .json(&message)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return SendOutcome::Transport {
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => parse_body(&text),
            Err(e) => {
                return SendOutcome::Transport {
                    reason: e.to_string(),
                };
            }
        };

        classify_response(status, body)
    }
}

/// Maps the provider's status code and body to an outcome.
pub fn classify_response(status: u16, body: serde_json::Value) -> SendOutcome {
    match status {
        200 | 201 => SendOutcome::Sent {
            status,
            response: body,
        },
        _ => SendOutcome::Rejected {
            status,
            details: body,
        },
    }
}

/// Parses a response body as JSON, carrying non-JSON bodies as a string.
fn parse_body(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn test_classify_response_success() {
        let outcome = classify_response(200, serde_json::json!({"messages": [{"id": "wamid"}]}));
        assert!(matches!(outcome, SendOutcome::Sent { status: 200, .. }));

        let outcome = classify_response(201, serde_json::Value::Null);
        assert!(matches!(outcome, SendOutcome::Sent { status: 201, .. }));
    }

    #[test]
    fn test_classify_response_failure_carries_details() {
        let outcome = classify_response(400, serde_json::json!({"error": "bad"}));
        match outcome {
            SendOutcome::Rejected { status, details } => {
                assert_eq!(status, 400);
                assert_eq!(details, serde_json::json!({"error": "bad"}));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_body_falls_back_to_string() {
        assert_eq!(
            parse_body(r#"{"ok":true}"#),
            serde_json::json!({"ok": true})
        );
        assert_eq!(
            parse_body("<html>Bad Gateway</html>"),
            serde_json::Value::String("<html>Bad Gateway</html>".to_string())
        );
    }

    #[ntex::test]
    async fn test_send_without_phone_number_id_short_circuits() {
        let config = AppConfig {
            business_phone_number_id: None,
            ..test_config()
        };
        let client = WhatsAppClient::new(&config).unwrap();

        let outcome = client
            .send_flow_template("201147372828", "pro_wash_v3", "ar", "unused")
            .await;
        assert!(matches!(outcome, SendOutcome::MissingConfig));
    }

    #[ntex::test]
    async fn test_send_without_access_token_short_circuits() {
        let config = AppConfig {
            access_token: None,
            ..test_config()
        };
        let client = WhatsAppClient::new(&config).unwrap();

        let outcome = client
            .send_flow_template("201147372828", "pro_wash_v3", "ar", "unused")
            .await;
        assert!(matches!(outcome, SendOutcome::MissingConfig));
    }
}
