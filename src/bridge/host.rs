use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use futures::future::try_join_all;

use super::types::{AnalyticsEvent, LaunchRequest, SelectionPrompt};
use crate::core::constants::App;

/// Errors that can occur while talking to the native host.
#[derive(Debug)]
pub enum BridgeError {
    /// The host invoked its error callback with this message.
    Host(String),
    /// The host released a completion handle without answering.
    Dropped,
    /// The host answered with something we cannot interpret.
    Protocol(String),
    /// Network-level failure (analytics endpoint).
    Network(String),
    /// Analytics endpoint returned an error response.
    Api { status: u16, message: String },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Host(msg) => write!(f, "{msg}"),
            BridgeError::Dropped => write!(f, "native host dropped the call without a result"),
            BridgeError::Protocol(msg) => write!(f, "protocol error: {msg}"),
            BridgeError::Network(msg) => write!(f, "network error: {msg}"),
            BridgeError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
        }
    }
}

impl std::error::Error for BridgeError {}

/// The native side of the launcher.
///
/// Every call resolves exactly once, either with its value or with a
/// `BridgeError`. Calls are independent of each other; implementations decide
/// whether they serialize them.
#[async_trait]
pub trait NavigatorBridge: Send + Sync {
    /// Returns the name of the bridge, for logs.
    fn name(&self) -> &str;

    /// Whether `app` is installed and launchable on this device.
    async fn is_app_available(&self, app: App) -> Result<bool, BridgeError>;

    /// Availability of each of `apps`. Queries them concurrently unless the
    /// host offers a bulk call.
    async fn available_apps(&self, apps: &[App]) -> Result<BTreeMap<App, bool>, BridgeError> {
        let checks = apps.iter().map(|&app| async move {
            self.is_app_available(app)
                .await
                .map(|available| (app, available))
        });
        Ok(try_join_all(checks).await?.into_iter().collect())
    }

    /// Opens the requested app with the (already normalized) request.
    async fn launch(&self, request: LaunchRequest) -> Result<(), BridgeError>;

    /// Shows the host's picker. `Ok(None)` means the user cancelled.
    async fn select_app(
        &self,
        candidates: &[App],
        prompt: &SelectionPrompt,
    ) -> Result<Option<App>, BridgeError>;

    /// Records an analytics event.
    async fn log_event(&self, event: AnalyticsEvent) -> Result<(), BridgeError>;
}
