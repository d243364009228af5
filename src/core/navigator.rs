//! # Launch Navigator
//!
//! The public entry point. Owns a bridge to the native host and the platform
//! the host runs on, and turns caller input into normalized launch requests.
//!
//! ```text
//! navigate(dest, opts)
//!   ├── opts.app set?  ──yes──▶ validate app ─▶ normalize ─▶ bridge.launch
//!   └── no ─▶ user_select
//!               available apps ∩ selection list
//!               ├── none   ─▶ NoAppsAvailable
//!               ├── one    ─▶ use it
//!               └── many   ─▶ bridge.select_app ─▶ (None ⇒ SelectionCancelled)
//!               callback(app) ─▶ normalize ─▶ bridge.launch
//! ```
//!
//! Every asynchronous operation resolves to a single `Result`; there are no
//! separate success and error callbacks.

use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::capabilities::{
    get_app_display_name, get_apps_for_platform, get_transport_modes, is_app_supported,
    supports_dest_name, supports_launch_mode, supports_start, supports_start_name,
    supports_transport_mode,
};
use super::config::ResolvedConfig;
use super::constants::{App, LaunchMode, Platform, TransportMode};
use super::error::LaunchError;
use super::location::{IntoLocation, Location};
use super::options::{DEFAULT_CANCEL_BUTTON, DEFAULT_DIALOG_HEADER, LaunchOptions};
use crate::bridge::{AnalyticsEvent, LaunchRequest, NavigatorBridge, SelectionPrompt};

/// Fallbacks for anything a call's `LaunchOptions` leaves unset.
#[derive(Debug, Clone)]
pub struct NavigatorDefaults {
    pub app: Option<App>,
    pub transport_mode: TransportMode,
    pub launch_mode: LaunchMode,
    pub dialog_header: String,
    pub cancel_button: String,
    pub selection_list: Vec<App>,
    pub enable_debug: bool,
}

impl Default for NavigatorDefaults {
    fn default() -> Self {
        Self {
            app: None,
            transport_mode: TransportMode::default(),
            launch_mode: LaunchMode::default(),
            dialog_header: DEFAULT_DIALOG_HEADER.to_string(),
            cancel_button: DEFAULT_CANCEL_BUTTON.to_string(),
            selection_list: Vec::new(),
            enable_debug: false,
        }
    }
}

impl From<&ResolvedConfig> for NavigatorDefaults {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            app: config.default_app,
            transport_mode: config.transport_mode,
            launch_mode: config.launch_mode,
            dialog_header: config.dialog_header.clone(),
            cancel_button: config.cancel_button.clone(),
            selection_list: config.selection_apps.clone(),
            enable_debug: config.enable_debug,
        }
    }
}

pub struct LaunchNavigator {
    bridge: Arc<dyn NavigatorBridge>,
    platform: Platform,
    defaults: NavigatorDefaults,
}

impl LaunchNavigator {
    pub fn new(bridge: Arc<dyn NavigatorBridge>, platform: Platform) -> Self {
        Self {
            bridge,
            platform,
            defaults: NavigatorDefaults::default(),
        }
    }

    pub fn from_config(bridge: Arc<dyn NavigatorBridge>, config: &ResolvedConfig) -> Self {
        Self::new(bridge, config.platform).with_defaults(NavigatorDefaults::from(config))
    }

    pub fn with_defaults(mut self, defaults: NavigatorDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    // ── Capability queries for the current platform ─────────────────────────

    pub fn app_display_name(&self, app: App) -> &'static str {
        get_app_display_name(app)
    }

    pub fn apps(&self) -> Vec<App> {
        get_apps_for_platform(self.platform)
    }

    pub fn supports_transport_mode(&self, app: App) -> bool {
        supports_transport_mode(app, self.platform)
    }

    pub fn transport_modes(&self, app: App) -> &'static [TransportMode] {
        get_transport_modes(app, self.platform)
    }

    pub fn supports_launch_mode(&self, app: App) -> bool {
        supports_launch_mode(app, self.platform)
    }

    pub fn supports_start(&self, app: App) -> bool {
        supports_start(app, self.platform)
    }

    pub fn supports_start_name(&self, app: App) -> bool {
        supports_start_name(app, self.platform)
    }

    pub fn supports_dest_name(&self, app: App) -> bool {
        supports_dest_name(app, self.platform)
    }

    // ── Availability ────────────────────────────────────────────────────────

    /// Whether `app` is installed. Apps the platform cannot launch at all are
    /// an error rather than `false`.
    pub async fn is_app_available(&self, app: App) -> Result<bool, LaunchError> {
        self.ensure_supported(app)?;
        let available = self.bridge.is_app_available(app).await?;
        debug!("{} available on {}: {}", app, self.platform, available);
        Ok(available)
    }

    /// Availability of every app of the platform.
    pub async fn available_apps(&self) -> Result<BTreeMap<App, bool>, LaunchError> {
        let apps = get_apps_for_platform(self.platform);
        let mut reported = self.bridge.available_apps(&apps).await?;
        reported.retain(|app, _| apps.contains(app));
        for app in &apps {
            reported.entry(*app).or_insert(false);
        }
        debug!(
            "{} of {} apps available on {}",
            reported.values().filter(|v| **v).count(),
            reported.len(),
            self.platform
        );
        Ok(reported)
    }

    // ── Launching ───────────────────────────────────────────────────────────

    /// Launches a navigation app. Without an app (in the options or the
    /// defaults) this is `user_select`.
    pub async fn navigate(
        &self,
        destination: impl IntoLocation,
        options: LaunchOptions,
    ) -> Result<(), LaunchError> {
        let destination = destination.into_location()?;
        match options.app.or(self.defaults.app) {
            Some(app) => self.launch(app, destination, &options).await,
            None => self.select_and_launch(destination, options).await.map(|_| ()),
        }
    }

    /// Lets the user pick among the installed apps, then launches the choice.
    /// Returns the app that was launched.
    pub async fn user_select(
        &self,
        destination: impl IntoLocation,
        options: LaunchOptions,
    ) -> Result<App, LaunchError> {
        let destination = destination.into_location()?;
        self.select_and_launch(destination, options).await
    }

    /// Records an analytics event without waiting for it. The handle
    /// resolves once the bridge has handled the event and may be dropped;
    /// failures are logged, never returned. Outside a tokio runtime the event
    /// is discarded and `None` is returned.
    pub fn log_event(
        &self,
        name: impl Into<String>,
        params: Option<serde_json::Value>,
        value_to_sum: Option<f64>,
    ) -> Option<JoinHandle<()>> {
        let event = AnalyticsEvent::new(name, params, value_to_sum);
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime, event '{}' not logged", event.name);
            return None;
        };

        let bridge = Arc::clone(&self.bridge);
        Some(runtime.spawn(async move {
            let name = event.name.clone();
            if let Err(e) = bridge.log_event(event).await {
                warn!("Failed to log event '{}': {}", name, e);
            }
        }))
    }

    /// Applies defaults and strips what `app` cannot honour on this platform.
    pub fn build_request(
        &self,
        app: App,
        destination: Location,
        options: &LaunchOptions,
    ) -> LaunchRequest {
        let platform = self.platform;

        let modes = get_transport_modes(app, platform);
        let requested = options.transport_mode.unwrap_or(self.defaults.transport_mode);
        let transport_mode = if modes.is_empty() {
            if options.transport_mode.is_some() {
                warn!("{app} on {platform} does not support transport modes, ignoring '{requested}'");
            }
            None
        } else if modes.contains(&requested) {
            Some(requested)
        } else {
            warn!("{app} on {platform} does not support '{requested}', using the app default");
            None
        };

        let launch_mode = if supports_launch_mode(app, platform) {
            Some(options.launch_mode.unwrap_or(self.defaults.launch_mode))
        } else {
            if options.launch_mode.is_some() {
                warn!("{app} on {platform} does not support launch mode, ignoring it");
            }
            None
        };

        let start = match options.start {
            Some(_) if !supports_start(app, platform) => {
                warn!("{app} on {platform} does not support a start location, ignoring it");
                None
            }
            ref start => start.clone(),
        };

        let start_name = match options.start_name {
            Some(_) if start.is_none() || !supports_start_name(app, platform) => {
                warn!("{app} on {platform} cannot use a start name here, ignoring it");
                None
            }
            ref name => name.clone(),
        };

        let destination_name = match options.destination_name {
            Some(_) if !supports_dest_name(app, platform) => {
                warn!("{app} on {platform} does not support a destination name, ignoring it");
                None
            }
            ref name => name.clone(),
        };

        LaunchRequest {
            app,
            platform,
            destination,
            destination_name,
            start,
            start_name,
            transport_mode,
            launch_mode,
            extras: options.extras.clone(),
            enable_debug: options.enable_debug || self.defaults.enable_debug,
        }
    }

    fn ensure_supported(&self, app: App) -> Result<(), LaunchError> {
        if is_app_supported(app, self.platform) {
            Ok(())
        } else {
            Err(LaunchError::UnsupportedApp {
                app,
                platform: self.platform,
            })
        }
    }

    async fn launch(
        &self,
        app: App,
        destination: Location,
        options: &LaunchOptions,
    ) -> Result<(), LaunchError> {
        self.ensure_supported(app)?;
        let request = self.build_request(app, destination, options);

        if request.enable_debug {
            info!("Launching {} via {}: {:?}", app, self.bridge.name(), request);
        } else {
            debug!("Launching {} via {}: {:?}", app, self.bridge.name(), request);
        }

        self.bridge.launch(request).await?;
        info!("Launched {} on {}", get_app_display_name(app), self.platform);
        Ok(())
    }

    async fn select_and_launch(
        &self,
        destination: Location,
        options: LaunchOptions,
    ) -> Result<App, LaunchError> {
        let list = if options.app_selection.list.is_empty() {
            &self.defaults.selection_list
        } else {
            &options.app_selection.list
        };
        let candidates = self.selection_candidates(list).await?;

        let app = match candidates.as_slice() {
            [] => return Err(LaunchError::NoAppsAvailable),
            [only] => {
                info!("Only {} is available, skipping the picker", only);
                *only
            }
            _ => {
                let prompt = SelectionPrompt {
                    header: options
                        .app_selection
                        .dialog_header
                        .clone()
                        .unwrap_or_else(|| self.defaults.dialog_header.clone()),
                    cancel_button: options
                        .app_selection
                        .cancel_button
                        .clone()
                        .unwrap_or_else(|| self.defaults.cancel_button.clone()),
                };
                debug!("Offering {} apps: {:?}", candidates.len(), candidates);
                self.bridge
                    .select_app(&candidates, &prompt)
                    .await?
                    .ok_or(LaunchError::SelectionCancelled)?
            }
        };

        if let Some(ref callback) = options.app_selection_callback {
            callback.call(app);
        }

        self.launch(app, destination, &options).await?;
        Ok(app)
    }

    /// Installed apps of this platform, restricted to and ordered by `list`
    /// when it is non-empty.
    async fn selection_candidates(&self, list: &[App]) -> Result<Vec<App>, LaunchError> {
        let availability = self.available_apps().await?;
        let order = if list.is_empty() {
            get_apps_for_platform(self.platform)
        } else {
            list.to_vec()
        };

        let mut seen = HashSet::new();
        Ok(order
            .into_iter()
            .filter(|app| seen.insert(*app))
            .filter(|app| availability.get(app).copied().unwrap_or(false))
            .collect())
    }
}
