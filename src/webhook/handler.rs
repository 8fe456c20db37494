//! # Webhook Event Dispatcher
//!
//! Walks an inbound webhook payload, extracts flow-response events and
//! hands each one to the configured [`FlowResponseHook`]. The walk is
//! defensive by construction: a payload missing `entry`, `changes`,
//! `value` or `messages` at any level simply yields no events.

use super::schemas::{DeliveryStatus, Message, WebhookPayload};
use async_trait::async_trait;
use log::{debug, error, info, warn};

/// Parsed flow answer, an untyped key-value mapping.
pub type FlowResponse = serde_json::Map<String, serde_json::Value>;

/// A flow response extracted from an inbound message.
#[derive(Debug, PartialEq)]
pub struct FlowEvent {
    /// Sender's WhatsApp ID (phone number)
    pub sender: String,
    /// The parsed flow answer
    pub response: FlowResponse,
}

/// Processing hook invoked once per extracted flow response.
///
/// The default [`LoggingFlowHook`] only logs the event; a real deployment
/// injects an implementation that persists the answer or triggers
/// follow-up business logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlowResponseHook: Send + Sync {
    async fn on_flow_response(
        &self,
        sender: &str,
        response: &FlowResponse,
    ) -> anyhow::Result<()>;
}

/// Hook implementation that logs each flow response.
pub struct LoggingFlowHook;

#[async_trait]
impl FlowResponseHook for LoggingFlowHook {
    async fn on_flow_response(
        &self,
        sender: &str,
        response: &FlowResponse,
    ) -> anyhow::Result<()> {
        info!(
            "Flow response from {sender}: {data}",
            data = serde_json::Value::Object(response.clone())
        );
        Ok(())
    }
}

/// Extracts all flow-response events from a webhook payload.
///
/// A message yields an event iff its type is "interactive" and the
/// interactive sub-type is "nfm_reply". The embedded `response_json`
/// string (default `"{}"`) is parsed as a JSON object; a malformed
/// embedded document is logged and skipped.
pub fn extract_flow_events(payload: &WebhookPayload) -> Vec<FlowEvent> {
    payload
        .entry
        .iter()
        .flat_map(|entry| &entry.changes)
        .filter_map(|change| change.value.as_ref())
        .flat_map(|value| &value.messages)
        .filter_map(flow_event_from_message)
        .collect::<Vec<_>>()
}

/// Extracts all delivery status updates from a webhook payload.
pub fn extract_delivery_statuses(payload: &WebhookPayload) -> Vec<&DeliveryStatus> {
    payload
        .entry
        .iter()
        .flat_map(|entry| &entry.changes)
        .filter_map(|change| change.value.as_ref())
        .flat_map(|value| &value.statuses)
        .collect::<Vec<_>>()
}

fn flow_event_from_message(message: &Message) -> Option<FlowEvent> {
    if message.msg_type.as_deref() != Some("interactive") {
        debug!(
            "Ignoring message of type {msg_type:?} from {from:?}",
            msg_type = message.msg_type,
            from = message.from
        );
        return None;
    }

    let interactive = message.interactive.as_ref()?;
    if interactive.kind.as_deref() != Some("nfm_reply") {
        return None;
    }

    let raw = interactive
        .nfm_reply
        .as_ref()
        .and_then(|reply| reply.response_json.as_deref())
        .unwrap_or("{}");

    let response = match serde_json::from_str::<FlowResponse>(raw) {
        Ok(response) => response,
        Err(e) => {
            warn!("Discarding flow response with malformed response_json: {e}");
            return None;
        }
    };

    Some(FlowEvent {
        sender: message.from.clone().unwrap_or_default(),
        response,
    })
}

/// Main webhook processor.
///
/// Invokes the hook once per flow event and logs delivery statuses. Hook
/// failures are logged and swallowed; dispatch never fails, because the
/// provider expects an acknowledgment regardless to suppress redelivery.
pub async fn dispatch(payload: &WebhookPayload, hook: &dyn FlowResponseHook) {
    for event in extract_flow_events(payload) {
        if let Err(e) = hook.on_flow_response(&event.sender, &event.response).await {
            error!(
                "Flow response hook failed for sender {sender}: {e:#}",
                sender = event.sender
            );
        }
    }

    for status in extract_delivery_statuses(payload) {
        debug!(
            "Message {id:?} for {recipient:?} is now {status:?}",
            id = status.id,
            recipient = status.recipient_id,
            status = status.status
        );
    }
}
