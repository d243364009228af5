//! # Callback Hosts
//!
//! Native hosts speak in callbacks: every asynchronous call receives a success
//! callback and an error callback and must invoke exactly one of them, once.
//! Here that contract is a `Completion<T>`: a single-use handle that is
//! consumed by `success` or `error`, so firing twice does not compile. A
//! handle dropped without firing resolves the waiting side to
//! `BridgeError::Dropped` instead of hanging.
//!
//! `CallbackHost` is the host-facing interface, shaped like the native
//! plugin: string tokens and JSON payloads. `CallbackBridge` adapts any such
//! host to the typed `NavigatorBridge`.
//!
//! ```text
//! LaunchNavigator ──typed──▶ CallbackBridge ──tokens/JSON + Completion──▶ host
//!                 ◀─Result──                ◀──── success / error ──────
//! ```

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::oneshot;

use super::host::{BridgeError, NavigatorBridge};
use super::types::{AnalyticsEvent, LaunchRequest, SelectionPrompt};
use crate::core::constants::App;

/// Single-use result slot handed to a host call.
pub struct Completion<T> {
    tx: oneshot::Sender<Result<T, String>>,
}

impl<T> Completion<T> {
    pub fn success(self, value: T) {
        if self.tx.send(Ok(value)).is_err() {
            debug!("Completion delivered after the caller went away");
        }
    }

    pub fn error(self, message: impl Into<String>) {
        if self.tx.send(Err(message.into())).is_err() {
            debug!("Completion error delivered after the caller went away");
        }
    }

    /// Delivers a `Result` through the matching callback.
    pub fn finish(self, result: Result<T, String>) {
        match result {
            Ok(value) => self.success(value),
            Err(message) => self.error(message),
        }
    }
}

/// The waiting side of a `Completion`.
pub struct PendingCompletion<T> {
    rx: oneshot::Receiver<Result<T, String>>,
}

impl<T> PendingCompletion<T> {
    pub async fn wait(self) -> Result<T, BridgeError> {
        match self.rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(BridgeError::Host(message)),
            Err(_) => Err(BridgeError::Dropped),
        }
    }
}

pub fn completion<T>() -> (Completion<T>, PendingCompletion<T>) {
    let (tx, rx) = oneshot::channel();
    (Completion { tx }, PendingCompletion { rx })
}

/// A native host in its own vocabulary.
///
/// Implementations may fire the completion before returning, later from
/// another thread, or (if they misbehave) never.
pub trait CallbackHost: Send + Sync {
    fn name(&self) -> &str;

    fn is_app_available(&self, app: &str, done: Completion<bool>);

    /// Map of app token to availability for every app the host knows.
    fn available_apps(&self, done: Completion<HashMap<String, bool>>);

    /// `args` is a `LaunchRequest` in its JSON form.
    fn navigate(&self, args: serde_json::Value, done: Completion<()>);

    /// Resolves to the chosen app token, or `None` when cancelled.
    fn select_app(
        &self,
        candidates: Vec<String>,
        header: &str,
        cancel_button: &str,
        done: Completion<Option<String>>,
    );

    /// Hosts that do not track delivery may fire `done` straight away.
    fn log_event(
        &self,
        name: &str,
        params: Option<&serde_json::Value>,
        value_to_sum: Option<f64>,
        done: Completion<()>,
    );
}

/// Adapts a `CallbackHost` to `NavigatorBridge`.
pub struct CallbackBridge<H> {
    host: H,
}

impl<H: CallbackHost> CallbackBridge<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

#[async_trait]
impl<H: CallbackHost> NavigatorBridge for CallbackBridge<H> {
    fn name(&self) -> &str {
        self.host.name()
    }

    async fn is_app_available(&self, app: App) -> Result<bool, BridgeError> {
        let (done, pending) = completion();
        self.host.is_app_available(app.as_str(), done);
        pending.wait().await
    }

    async fn available_apps(&self, apps: &[App]) -> Result<BTreeMap<App, bool>, BridgeError> {
        let (done, pending) = completion();
        self.host.available_apps(done);
        let reported = pending.wait().await?;

        for token in reported.keys() {
            if token.parse::<App>().is_err() {
                debug!("Host reported unknown app '{}', ignoring", token);
            }
        }

        Ok(apps
            .iter()
            .map(|app| (*app, reported.get(app.as_str()).copied().unwrap_or(false)))
            .collect())
    }

    async fn launch(&self, request: LaunchRequest) -> Result<(), BridgeError> {
        let args =
            serde_json::to_value(&request).map_err(|e| BridgeError::Protocol(e.to_string()))?;
        debug!("navigate args: {}", args);
        let (done, pending) = completion();
        self.host.navigate(args, done);
        pending.wait().await
    }

    async fn select_app(
        &self,
        candidates: &[App],
        prompt: &SelectionPrompt,
    ) -> Result<Option<App>, BridgeError> {
        let tokens = candidates.iter().map(|app| app.as_str().to_string()).collect();
        let (done, pending) = completion();
        self.host
            .select_app(tokens, &prompt.header, &prompt.cancel_button, done);

        let Some(token) = pending.wait().await? else {
            return Ok(None);
        };
        match token.parse::<App>() {
            Ok(app) if candidates.contains(&app) => Ok(Some(app)),
            Ok(app) => Err(BridgeError::Protocol(format!(
                "host selected {app}, which was not offered"
            ))),
            Err(e) => Err(BridgeError::Protocol(e.to_string())),
        }
    }

    async fn log_event(&self, event: AnalyticsEvent) -> Result<(), BridgeError> {
        if event.name.trim().is_empty() {
            warn!("Dropping analytics event with an empty name");
            return Ok(());
        }
        let (done, pending) = completion();
        self.host
            .log_event(&event.name, event.params.as_ref(), event.value_to_sum, done);
        pending.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::Platform;
    use crate::core::location::Location;
    use std::sync::Mutex;

    /// Host that answers from fixed data, recording what it was sent.
    #[derive(Default)]
    struct FixedHost {
        installed: Vec<&'static str>,
        pick: Option<&'static str>,
        navigate_error: Option<&'static str>,
        drop_navigate: bool,
        navigated: Mutex<Vec<serde_json::Value>>,
        events: Mutex<Vec<String>>,
    }

    impl CallbackHost for FixedHost {
        fn name(&self) -> &str {
            "fixed"
        }

        fn is_app_available(&self, app: &str, done: Completion<bool>) {
            done.success(self.installed.contains(&app));
        }

        fn available_apps(&self, done: Completion<HashMap<String, bool>>) {
            let mut map: HashMap<String, bool> = self
                .installed
                .iter()
                .map(|app| (app.to_string(), true))
                .collect();
            map.insert("hovercraft".to_string(), true);
            done.success(map);
        }

        fn navigate(&self, args: serde_json::Value, done: Completion<()>) {
            self.navigated.lock().unwrap().push(args);
            if self.drop_navigate {
                return;
            }
            match self.navigate_error {
                Some(msg) => done.error(msg),
                None => done.success(()),
            }
        }

        fn select_app(
            &self,
            _candidates: Vec<String>,
            _header: &str,
            _cancel_button: &str,
            done: Completion<Option<String>>,
        ) {
            // Answer from another thread, the way a UI host would.
            let pick = self.pick.map(str::to_string);
            std::thread::spawn(move || done.success(pick));
        }

        fn log_event(
            &self,
            name: &str,
            _params: Option<&serde_json::Value>,
            _value: Option<f64>,
            done: Completion<()>,
        ) {
            self.events.lock().unwrap().push(name.to_string());
            done.success(());
        }
    }

    fn request() -> LaunchRequest {
        LaunchRequest {
            app: App::Waze,
            platform: Platform::Ios,
            destination: Location::parse("Buckingham Palace, London").unwrap(),
            destination_name: None,
            start: None,
            start_name: None,
            transport_mode: None,
            launch_mode: None,
            extras: BTreeMap::new(),
            enable_debug: false,
        }
    }

    #[tokio::test]
    async fn test_is_app_available_passes_token() {
        let bridge = CallbackBridge::new(FixedHost {
            installed: vec!["waze"],
            ..Default::default()
        });
        assert!(bridge.is_app_available(App::Waze).await.unwrap());
        assert!(!bridge.is_app_available(App::GoogleMaps).await.unwrap());
    }

    #[tokio::test]
    async fn test_available_apps_fills_missing_and_ignores_unknown() {
        let bridge = CallbackBridge::new(FixedHost {
            installed: vec!["waze"],
            ..Default::default()
        });
        let apps = bridge
            .available_apps(&[App::Waze, App::AppleMaps])
            .await
            .unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[&App::Waze], true);
        assert_eq!(apps[&App::AppleMaps], false);
    }

    #[tokio::test]
    async fn test_navigate_error_string_surfaces() {
        let bridge = CallbackBridge::new(FixedHost {
            navigate_error: Some("Waze is not installed"),
            ..Default::default()
        });
        let err = bridge.launch(request()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Host(ref m) if m == "Waze is not installed"));

        let sent = bridge.host().navigated.lock().unwrap();
        assert_eq!(sent[0]["app"], "waze");
        assert_eq!(sent[0]["destination"], "Buckingham Palace, London");
    }

    #[tokio::test]
    async fn test_dropped_completion_does_not_hang() {
        let bridge = CallbackBridge::new(FixedHost {
            drop_navigate: true,
            ..Default::default()
        });
        let err = bridge.launch(request()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Dropped));
    }

    #[tokio::test]
    async fn test_select_app_from_another_thread() {
        let prompt = SelectionPrompt {
            header: "Pick".into(),
            cancel_button: "Cancel".into(),
        };
        let bridge = CallbackBridge::new(FixedHost {
            pick: Some("citymapper"),
            ..Default::default()
        });
        let chosen = bridge
            .select_app(&[App::Waze, App::Citymapper], &prompt)
            .await
            .unwrap();
        assert_eq!(chosen, Some(App::Citymapper));

        let cancelled = CallbackBridge::new(FixedHost::default())
            .select_app(&[App::Waze], &prompt)
            .await
            .unwrap();
        assert_eq!(cancelled, None);
    }

    #[tokio::test]
    async fn test_select_app_rejects_unoffered_choice() {
        let prompt = SelectionPrompt {
            header: "Pick".into(),
            cancel_button: "Cancel".into(),
        };
        let bridge = CallbackBridge::new(FixedHost {
            pick: Some("uber"),
            ..Default::default()
        });
        let err = bridge.select_app(&[App::Waze], &prompt).await.unwrap_err();
        assert!(matches!(err, BridgeError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_log_event_reaches_host() {
        let bridge = CallbackBridge::new(FixedHost::default());
        bridge
            .log_event(AnalyticsEvent::new("route_opened", None, Some(1.0)))
            .await
            .unwrap();
        bridge
            .log_event(AnalyticsEvent::new("  ", None, None))
            .await
            .unwrap();
        assert_eq!(*bridge.host().events.lock().unwrap(), vec!["route_opened"]);
    }

    #[tokio::test]
    async fn test_completion_finish() {
        let (done, pending) = completion::<u8>();
        done.finish(Err("boom".into()));
        assert!(matches!(pending.wait().await, Err(BridgeError::Host(ref m)) if m == "boom"));
    }
}
