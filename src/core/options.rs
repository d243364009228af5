//! # Launch Options
//!
//! The optional knobs of a `navigate` / `user_select` call. Every field may be
//! left unset; the navigator fills in defaults (driving, map view, the
//! configured picker texts) and drops what the chosen app cannot honour.
//!
//! Options deserialize from the host's camelCase JSON, so a payload like
//! `{"app": "waze", "transportMode": "walking", "start": [50.1, -4.0]}`
//! maps straight onto this struct. Picker settings are read either from a
//! nested `appSelection` object or from the flat `appSelectionDialogHeader`,
//! `appSelectionCancelButton` and `appSelectionList` keys; the nested object
//! wins where both are given.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::constants::{App, LaunchMode, TransportMode};
use super::location::Location;

pub const DEFAULT_DIALOG_HEADER: &str = "Select app for navigation";
pub const DEFAULT_CANCEL_BUTTON: &str = "Cancel";

/// Invoked with the app the user picked, before it is launched.
#[derive(Clone)]
pub struct SelectionCallback(Arc<dyn Fn(App) + Send + Sync>);

impl SelectionCallback {
    pub fn new(f: impl Fn(App) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, app: App) {
        (self.0)(app)
    }
}

impl fmt::Debug for SelectionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectionCallback(..)")
    }
}

/// Picker configuration used by user selection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSelection {
    /// Title of the picker. Defaults to "Select app for navigation".
    pub dialog_header: Option<String>,
    /// Label of the cancel button. Defaults to "Cancel".
    pub cancel_button: Option<String>,
    /// Restricts (and orders) the apps offered, if they are installed.
    #[serde(default)]
    pub list: Vec<App>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", from = "LaunchOptionsInput")]
pub struct LaunchOptions {
    /// App to launch. `None` asks the user to pick one.
    pub app: Option<App>,
    pub destination_name: Option<String>,
    /// Start point; the device's current location when unset.
    pub start: Option<Location>,
    pub start_name: Option<String>,
    pub transport_mode: Option<TransportMode>,
    #[serde(default)]
    pub enable_debug: bool,
    /// App-specific parameters passed through untouched, e.g. `{"t": "k"}`
    /// for Google Maps satellite view.
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    pub launch_mode: Option<LaunchMode>,
    #[serde(default)]
    pub app_selection: AppSelection,
    #[serde(skip)]
    pub app_selection_callback: Option<SelectionCallback>,
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(mut self, app: App) -> Self {
        self.app = Some(app);
        self
    }

    pub fn destination_name(mut self, name: impl Into<String>) -> Self {
        self.destination_name = Some(name.into());
        self
    }

    pub fn start(mut self, start: Location) -> Self {
        self.start = Some(start);
        self
    }

    pub fn start_name(mut self, name: impl Into<String>) -> Self {
        self.start_name = Some(name.into());
        self
    }

    pub fn transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = Some(mode);
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.launch_mode = Some(mode);
        self
    }

    pub fn enable_debug(mut self, enabled: bool) -> Self {
        self.enable_debug = enabled;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn dialog_header(mut self, header: impl Into<String>) -> Self {
        self.app_selection.dialog_header = Some(header.into());
        self
    }

    pub fn cancel_button(mut self, label: impl Into<String>) -> Self {
        self.app_selection.cancel_button = Some(label.into());
        self
    }

    pub fn selection_list(mut self, apps: impl IntoIterator<Item = App>) -> Self {
        self.app_selection.list = apps.into_iter().collect();
        self
    }

    pub fn on_app_selected(mut self, f: impl Fn(App) + Send + Sync + 'static) -> Self {
        self.app_selection_callback = Some(SelectionCallback::new(f));
        self
    }
}

/// Host payload for `LaunchOptions`, flat picker keys included.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LaunchOptionsInput {
    app: Option<App>,
    destination_name: Option<String>,
    start: Option<Location>,
    start_name: Option<String>,
    transport_mode: Option<TransportMode>,
    #[serde(default)]
    enable_debug: bool,
    #[serde(default)]
    extras: BTreeMap<String, String>,
    launch_mode: Option<LaunchMode>,
    #[serde(default)]
    app_selection: AppSelection,
    app_selection_dialog_header: Option<String>,
    app_selection_cancel_button: Option<String>,
    #[serde(default)]
    app_selection_list: Vec<App>,
}

impl From<LaunchOptionsInput> for LaunchOptions {
    fn from(input: LaunchOptionsInput) -> Self {
        let mut app_selection = input.app_selection;
        if app_selection.dialog_header.is_none() {
            app_selection.dialog_header = input.app_selection_dialog_header;
        }
        if app_selection.cancel_button.is_none() {
            app_selection.cancel_button = input.app_selection_cancel_button;
        }
        if app_selection.list.is_empty() {
            app_selection.list = input.app_selection_list;
        }

        Self {
            app: input.app,
            destination_name: input.destination_name,
            start: input.start,
            start_name: input.start_name,
            transport_mode: input.transport_mode,
            enable_debug: input.enable_debug,
            extras: input.extras,
            launch_mode: input.launch_mode,
            app_selection,
            app_selection_callback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_empty_json_is_valid_options() {
        let opts: LaunchOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.app.is_none());
        assert!(opts.extras.is_empty());
        assert!(!opts.enable_debug);
        assert!(opts.app_selection.list.is_empty());
    }

    #[test]
    fn test_host_style_json() {
        let json = r#"{
            "app": "google_maps",
            "destinationName": "Bob's House",
            "start": [50.1, -4.0],
            "transportMode": "transit",
            "launchMode": "turn-by-turn",
            "enableDebug": true,
            "extras": {"t": "k"},
            "appSelection": {"dialogHeader": "Pick one", "list": ["waze", "google_maps"]}
        }"#;
        let opts: LaunchOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.app, Some(App::GoogleMaps));
        assert_eq!(opts.destination_name.as_deref(), Some("Bob's House"));
        assert!(opts.start.as_ref().is_some_and(Location::is_coordinates));
        assert_eq!(opts.transport_mode, Some(TransportMode::Transit));
        assert_eq!(opts.launch_mode, Some(LaunchMode::TurnByTurn));
        assert!(opts.enable_debug);
        assert_eq!(opts.extras.get("t").map(String::as_str), Some("k"));
        assert_eq!(opts.app_selection.dialog_header.as_deref(), Some("Pick one"));
        assert_eq!(opts.app_selection.list, vec![App::Waze, App::GoogleMaps]);
    }

    #[test]
    fn test_flat_picker_keys() {
        let json = r#"{
            "appSelectionDialogHeader": "Pick",
            "appSelectionCancelButton": "No",
            "appSelectionList": ["waze", "citymapper"]
        }"#;
        let opts: LaunchOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.app_selection.dialog_header.as_deref(), Some("Pick"));
        assert_eq!(opts.app_selection.cancel_button.as_deref(), Some("No"));
        assert_eq!(opts.app_selection.list, vec![App::Waze, App::Citymapper]);
    }

    #[test]
    fn test_nested_picker_settings_win_over_flat_keys() {
        let json = r#"{
            "appSelection": {"dialogHeader": "Nested"},
            "appSelectionDialogHeader": "Flat",
            "appSelectionCancelButton": "Back"
        }"#;
        let opts: LaunchOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.app_selection.dialog_header.as_deref(), Some("Nested"));
        assert_eq!(opts.app_selection.cancel_button.as_deref(), Some("Back"));
    }

    #[test]
    fn test_unknown_app_token_is_rejected() {
        let result = serde_json::from_str::<LaunchOptions>(r#"{"app": "teleporter"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_and_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let opts = LaunchOptions::new()
            .app(App::Waze)
            .extra("navigate", "yes")
            .on_app_selected(move |app| sink.lock().unwrap().push(app));

        opts.app_selection_callback.as_ref().unwrap().call(App::Waze);
        assert_eq!(*seen.lock().unwrap(), vec![App::Waze]);
        assert_eq!(opts.app, Some(App::Waze));
        assert_eq!(opts.extras.len(), 1);
    }
}
