//! HTTP sink for analytics events.
//!
//! Events are posted one at a time as JSON to a configured collector
//! endpoint. There is no batching or retry: `log_event` is fire-and-forget
//! and a lost event is only logged.

use log::{debug, warn};

use super::host::BridgeError;
use super::types::AnalyticsEvent;

pub struct EventSink {
    endpoint: String,
    client: reqwest::Client,
}

impl EventSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, event: &AnalyticsEvent) -> Result<(), BridgeError> {
        debug!("Posting event '{}' ({}) to {}", event.name, event.id, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map_err(|e| BridgeError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Analytics endpoint error: {} - {}", status, message);
            return Err(BridgeError::Api { status, message });
        }

        Ok(())
    }
}
