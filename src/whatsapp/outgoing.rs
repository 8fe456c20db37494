//! # Outgoing Message Schemas
//!
//! Data structures for the messages this service sends to the WhatsApp
//! Business API: a template message carrying a single flow button.

use serde::{Deserialize, Serialize};

/// Template message to send to WhatsApp
#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateMessage {
    /// Messaging product, always "whatsapp"
    pub messaging_product: String,
    /// Recipient type, always "individual"
    pub recipient_type: String,
    /// Recipient's WhatsApp ID (phone number with country code)
    pub to: String,
    /// Message type, "template"
    #[serde(rename = "type")]
    pub msg_type: String,
    /// Template content
    pub template: Template,
}

impl TemplateMessage {
    /// Creates a template message with one flow button at index 0.
    ///
    /// The flow token is forwarded to the provider's action parameters and
    /// comes back with the flow response, correlating the invocation.
    pub fn flow(to: String, template_name: String, language_code: String, flow_token: String) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            recipient_type: "individual".to_string(),
            to,
            msg_type: "template".to_string(),
            template: Template {
                name: template_name,
                language: Language {
                    code: language_code,
                },
                components: vec![Component {
                    kind: "button".to_string(),
                    sub_type: "flow".to_string(),
                    index: "0".to_string(),
                    parameters: vec![Parameter {
                        kind: "action".to_string(),
                        action: Action { flow_token },
                    }],
                }],
            },
        }
    }
}

/// Template name, language and components
#[derive(Debug, Serialize, Deserialize)]
pub struct Template {
    /// Template name from the WhatsApp dashboard
    pub name: String,
    /// Template language
    pub language: Language,
    /// Template components (a single flow button here)
    pub components: Vec<Component>,
}

/// Template language
#[derive(Debug, Serialize, Deserialize)]
pub struct Language {
    /// Language code (e.g., "ar", "en_US")
    pub code: String,
}

/// Template button component
#[derive(Debug, Serialize, Deserialize)]
pub struct Component {
    /// Component type, "button"
    #[serde(rename = "type")]
    pub kind: String,
    /// Button sub-type, "flow"
    pub sub_type: String,
    /// Button index within the template, the provider wants it as a string
    pub index: String,
    /// Button parameters
    pub parameters: Vec<Parameter>,
}

/// Button parameter
#[derive(Debug, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter type, "action"
    #[serde(rename = "type")]
    pub kind: String,
    /// The action payload
    pub action: Action,
}

/// Flow action payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Action {
    /// Opaque token echoed back in the flow response
    pub flow_token: String,
}
