//! Application configuration loaded from environment variables.
//!
//! The configuration is loaded once in `main` and injected into handlers
//! through the application state; handler logic never reads the process
//! environment directly.

use envconfig::Envconfig;

/// Environment-provided configuration for the gateway.
///
/// # Security Notes
/// - `access_token` and `verify_token` are sensitive; never log them
/// - Production environments should use a secret management system
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEB_SERVER_HOST", default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(from = "WEB_SERVER_PORT", default = "5000")]
    pub web_server_port: u16,

    /// Graph API version used for the messages endpoint (NON-SENSITIVE)
    #[envconfig(from = "GRAPH_API_VERSION", default = "v22.0")]
    pub graph_api_version: String,

    /// WhatsApp Business phone number ID (SEMI-SENSITIVE)
    ///
    /// Optional so that its absence surfaces as a configuration error on
    /// the send path instead of failing startup.
    #[envconfig(from = "WHATSAPP_BUSINESS_PHONE_NUMBER_ID")]
    pub business_phone_number_id: Option<u64>,

    /// 🔒 SENSITIVE: WhatsApp Business API bearer token
    #[envconfig(from = "WHATSAPP_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// 🔒 SENSITIVE: Webhook verification token
    ///
    /// Must match the token configured in the WhatsApp dashboard. Kept
    /// distinct from the access token.
    #[envconfig(from = "WHATSAPP_VERIFY_TOKEN")]
    pub verify_token: String,

    /// Template name used when a send request does not name one (NON-SENSITIVE)
    #[envconfig(from = "WHATSAPP_DEFAULT_TEMPLATE", default = "pro_wash_v3")]
    pub default_template_name: String,

    /// Template language used when a send request does not name one (NON-SENSITIVE)
    #[envconfig(from = "WHATSAPP_DEFAULT_LANGUAGE", default = "ar")]
    pub default_language_code: String,
}

impl AppConfig {
    /// Constructs the WhatsApp Business API endpoint for sending messages.
    ///
    /// Returns `None` when the business phone number ID is not configured.
    pub fn send_message_endpoint(&self) -> Option<String> {
        self.business_phone_number_id.map(|id| {
            format!(
                "https://graph.facebook.com/{version}/{id}/messages",
                version = self.graph_api_version
            )
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Fully-populated configuration for unit tests.
    pub fn test_config() -> AppConfig {
        AppConfig {
            web_server_host: "0.0.0.0".into(),
            web_server_port: 5000,
            graph_api_version: "v22.0".into(),
            business_phone_number_id: Some(1234567890),
            access_token: Some("test-access-token".into()),
            verify_token: "test-verify-token".into(),
            default_template_name: "pro_wash_v3".into(),
            default_language_code: "ar".into(),
        }
    }

    #[test]
    fn test_send_message_endpoint() {
        let config = test_config();
        assert_eq!(
            config.send_message_endpoint().unwrap(),
            "https://graph.facebook.com/v22.0/1234567890/messages"
        );
    }

    #[test]
    fn test_send_message_endpoint_without_phone_number_id() {
        let config = AppConfig {
            business_phone_number_id: None,
            ..test_config()
        };
        assert!(config.send_message_endpoint().is_none());
    }
}
