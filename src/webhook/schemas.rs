//! # Inbound Webhook Schemas
//!
//! Data structures for the webhook payloads sent by the WhatsApp Business
//! Cloud API. Every level of nesting is optional or defaulted: the
//! provider sends many event shapes (messages, statuses, account updates)
//! and absence of any field along the `entry → changes → value → messages`
//! path is a normal control path, not an error.

use serde::{Deserialize, Serialize};

/// Root webhook payload from WhatsApp
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WebhookPayload {
    /// The object type, typically "whatsapp_business_account"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Array of entry objects containing the actual data
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// Entry object containing changes and metadata
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Entry {
    /// Business Account ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Array of changes that occurred
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// Change object containing the actual webhook data
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Change {
    /// The field that changed (e.g., "messages")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The value containing the actual data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ChangeValue>,
}

/// Value object containing messages and delivery statuses
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChangeValue {
    /// Messaging product (e.g., "whatsapp")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_product: Option<String>,
    /// Array of messages received
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Array of statuses for previously sent messages
    #[serde(default)]
    pub statuses: Vec<DeliveryStatus>,
}

/// Inbound message object
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Message {
    /// Sender's WhatsApp ID (phone number)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Timestamp of the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Message type (text, interactive, image, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,
    /// Interactive content (if type is "interactive")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<Interactive>,
}

/// Interactive message content
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Interactive {
    /// Interactive sub-type; flow responses arrive as "nfm_reply"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Flow response content (if kind is "nfm_reply")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfm_reply: Option<NfmReply>,
}

/// Flow response as delivered by the provider
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NfmReply {
    /// The flow's answer payload, as an embedded JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_json: Option<String>,
    /// Flow name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable summary the provider attaches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Delivery status update for a previously sent message
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeliveryStatus {
    /// Message ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Status (sent, delivered, read, failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Recipient ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_response_payload_deserialization() {
        let json = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "123456",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [{
                            "from": "201147372828",
                            "id": "wamid.XYZ",
                            "timestamp": "1700000000",
                            "type": "interactive",
                            "interactive": {
                                "type": "nfm_reply",
                                "nfm_reply": {
                                    "name": "flow",
                                    "body": "Sent",
                                    "response_json": "{\"car_type\":\"suv\"}"
                                }
                            }
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.object.as_deref(), Some("whatsapp_business_account"));

        let message = &payload.entry[0].changes[0].value.as_ref().unwrap().messages[0];
        assert_eq!(message.from.as_deref(), Some("201147372828"));
        assert_eq!(message.msg_type.as_deref(), Some("interactive"));

        let interactive = message.interactive.as_ref().unwrap();
        assert_eq!(interactive.kind.as_deref(), Some("nfm_reply"));
        assert_eq!(
            interactive.nfm_reply.as_ref().unwrap().response_json.as_deref(),
            Some(r#"{"car_type":"suv"}"#)
        );
    }

    #[test]
    fn test_sparse_payloads_deserialize_to_defaults() {
        let payload: WebhookPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.entry.is_empty());

        let payload: WebhookPayload =
            serde_json::from_str(r#"{"entry": [{"changes": [{"field": "messages"}]}]}"#).unwrap();
        assert!(payload.entry[0].changes[0].value.is_none());
    }

    #[test]
    fn test_status_payload_deserialization() {
        let json = r#"{
            "entry": [{
                "changes": [{
                    "value": {
                        "statuses": [{
                            "id": "wamid.ABC",
                            "status": "delivered",
                            "recipient_id": "201147372828"
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        let value = payload.entry[0].changes[0].value.as_ref().unwrap();
        assert!(value.messages.is_empty());
        assert_eq!(value.statuses[0].status.as_deref(), Some("delivered"));
    }
}
