//! Shared application state injected into request handlers.

use crate::{
    config::AppConfig,
    webhook::{FlowResponseHook, LoggingFlowHook},
    whatsapp::WhatsAppClient,
};
use std::sync::Arc;

/// State shared by all request handlers.
///
/// Constructed once in `main`; handlers receive it through ntex's state
/// extractor and never touch the process environment themselves.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub whatsapp: WhatsAppClient,
    pub flow_hook: Arc<dyn FlowResponseHook>,
}

impl AppState {
    /// Builds the state with the default logging flow hook.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let whatsapp = WhatsAppClient::new(&config)?;

        Ok(Self {
            config,
            whatsapp,
            flow_hook: Arc::new(LoggingFlowHook),
        })
    }
}
