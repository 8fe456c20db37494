//! Webhook integration module
//!
//! Handles the two requests WhatsApp makes against this service: the
//! verification handshake and event delivery.
//!
//! ## Submodules
//!
//! - [`handler`] - Event dispatcher and the flow-response hook seam
//! - [`routes`] - HTTP endpoint handlers
//! - [`schemas`] - Data structures for inbound webhook payloads

pub mod handler;
pub mod routes;
pub mod schemas;

pub use handler::{FlowResponse, FlowResponseHook, LoggingFlowHook};
