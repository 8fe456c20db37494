//! WhatsApp Business API integration module
//!
//! ## Submodules
//!
//! - [`client`] - API client for sending template messages
//! - [`outgoing`] - Data structures for outbound message payloads
//! - [`routes`] - HTTP endpoint exposing the send operation

pub mod client;
pub mod outgoing;
pub mod routes;

pub use client::{SendOutcome, WhatsAppClient};
