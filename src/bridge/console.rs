//! Desktop host used by the `launchnav` binary.
//!
//! Plays the part of a device for the configured platform: availability comes
//! from the configured installed list, a launch prints the app's launch URI,
//! the picker is the terminal overlay in `crate::tui`, and events go to the
//! analytics endpoint when one is configured.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, info};

use super::analytics::EventSink;
use super::completion::{CallbackHost, Completion};
use super::types::{AnalyticsEvent, LaunchRequest};
use super::uri::launch_uri;
use crate::core::capabilities::{get_app_display_name, get_apps_for_platform};
use crate::core::constants::{App, Platform};

pub struct ConsoleHost {
    platform: Platform,
    installed: Vec<App>,
    sink: Option<Arc<EventSink>>,
    opened: Mutex<Vec<String>>,
}

impl ConsoleHost {
    /// `installed` empty means every app of the platform counts as installed.
    pub fn new(platform: Platform, installed: Vec<App>, sink: Option<EventSink>) -> Self {
        let installed = if installed.is_empty() {
            get_apps_for_platform(platform)
        } else {
            installed
        };
        Self {
            platform,
            installed,
            sink: sink.map(Arc::new),
            opened: Mutex::new(Vec::new()),
        }
    }

    /// URIs launched so far.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn open(&self, request: &LaunchRequest) -> Result<(), String> {
        let name = get_app_display_name(request.app);
        let uri = launch_uri(request)
            .ok_or_else(|| format!("{name} cannot be launched by URI for this destination"))?;
        info!("Opening {} on {}: {}", name, self.platform, uri);
        println!("{uri}");
        self.opened
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(uri);
        Ok(())
    }
}

impl CallbackHost for ConsoleHost {
    fn name(&self) -> &str {
        "console"
    }

    fn is_app_available(&self, app: &str, done: Completion<bool>) {
        match app.parse::<App>() {
            Ok(app) => done.success(self.installed.contains(&app)),
            Err(e) => done.error(e.to_string()),
        }
    }

    fn available_apps(&self, done: Completion<HashMap<String, bool>>) {
        let apps = get_apps_for_platform(self.platform)
            .into_iter()
            .map(|app| (app.as_str().to_string(), self.installed.contains(&app)))
            .collect();
        done.success(apps);
    }

    fn navigate(&self, args: serde_json::Value, done: Completion<()>) {
        let result = serde_json::from_value::<LaunchRequest>(args)
            .map_err(|e| format!("malformed navigate arguments: {e}"))
            .and_then(|request| {
                if !self.installed.contains(&request.app) {
                    return Err(format!(
                        "{} is not installed",
                        get_app_display_name(request.app)
                    ));
                }
                self.open(&request)
            });
        done.finish(result);
    }

    fn select_app(
        &self,
        candidates: Vec<String>,
        header: &str,
        cancel_button: &str,
        done: Completion<Option<String>>,
    ) {
        let apps: Vec<App> = candidates
            .iter()
            .filter_map(|token| token.parse().ok())
            .collect();
        let header = header.to_string();
        let cancel_button = cancel_button.to_string();
        let platform = self.platform;

        // The picker owns the terminal until it returns.
        std::thread::spawn(move || {
            match crate::tui::pick_app(platform, &apps, &header, &cancel_button) {
                Ok(choice) => {
                    debug!("Picker returned {:?}", choice);
                    done.success(choice.map(|app| app.as_str().to_string()));
                }
                Err(e) => done.error(format!("app picker failed: {e}")),
            }
        });
    }

    fn log_event(
        &self,
        name: &str,
        params: Option<&serde_json::Value>,
        value_to_sum: Option<f64>,
        done: Completion<()>,
    ) {
        let Some(ref sink) = self.sink else {
            debug!("No analytics endpoint configured, event '{}' not sent", name);
            done.success(());
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            done.error(format!("no async runtime, event '{name}' not sent"));
            return;
        };

        let event = AnalyticsEvent::new(name, params.cloned(), value_to_sum);
        let sink = Arc::clone(sink);
        handle.spawn(async move {
            let sent = sink.send(&event).await;
            done.finish(sent.map_err(|e| e.to_string()));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::completion::CallbackBridge;
    use crate::bridge::NavigatorBridge;
    use crate::core::location::Location;
    use std::collections::BTreeMap;

    fn request(app: App) -> LaunchRequest {
        LaunchRequest {
            app,
            platform: Platform::Android,
            destination: Location::parse("50.1,-4.0").unwrap(),
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
    async fn test_empty_installed_list_means_all_platform_apps() {
        let bridge = CallbackBridge::new(ConsoleHost::new(Platform::Windows, vec![], None));
        assert!(bridge.is_app_available(App::BingMaps).await.unwrap());
        assert!(!bridge.is_app_available(App::Waze).await.unwrap());
    }

    #[tokio::test]
    async fn test_launch_records_uri() {
        let bridge = CallbackBridge::new(ConsoleHost::new(
            Platform::Android,
            vec![App::Waze],
            None,
        ));
        bridge.launch(request(App::Waze)).await.unwrap();
        assert_eq!(
            bridge.host().opened(),
            vec!["https://waze.com/ul?ll=50.1%2C-4&navigate=yes".to_string()]
        );
    }

    #[tokio::test]
    async fn test_launch_of_missing_app_fails_with_message() {
        let bridge = CallbackBridge::new(ConsoleHost::new(
            Platform::Android,
            vec![App::Waze],
            None,
        ));
        let err = bridge.launch(request(App::GoogleMaps)).await.unwrap_err();
        assert_eq!(err.to_string(), "Google Maps is not installed");
    }

    #[tokio::test]
    async fn test_app_without_uri_fails() {
        let bridge = CallbackBridge::new(ConsoleHost::new(Platform::Android, vec![], None));
        let err = bridge.launch(request(App::Lyft)).await.unwrap_err();
        assert!(err.to_string().contains("Lyft cannot be launched"));
    }

    #[tokio::test]
    async fn test_event_without_endpoint_resolves() {
        let bridge = CallbackBridge::new(ConsoleHost::new(Platform::Ios, vec![], None));
        bridge
            .log_event(AnalyticsEvent::new("route_opened", None, None))
            .await
            .unwrap();
    }
}
