//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.launchnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{App, LaunchMode, Platform, TransportMode};
use super::options::{DEFAULT_CANCEL_BUTTON, DEFAULT_DIALOG_HEADER};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LaunchNavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub app_selection: AppSelectionConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub platform: Option<Platform>,
    pub default_app: Option<App>,
    pub enable_debug: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub transport_mode: Option<TransportMode>,
    pub launch_mode: Option<LaunchMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppSelectionConfig {
    pub dialog_header: Option<String>,
    pub cancel_button: Option<String>,
    #[serde(default)]
    pub apps: Vec<App>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeviceConfig {
    #[serde(default)]
    pub installed_apps: Vec<App>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    pub endpoint: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Used when neither the CLI, the environment nor the config names a
/// platform and the build target is not a mobile/Windows platform.
pub const DEFAULT_PLATFORM: Platform = Platform::Android;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub platform: Platform,
    pub default_app: Option<App>,
    pub enable_debug: bool,
    pub transport_mode: TransportMode,
    pub launch_mode: LaunchMode,
    pub dialog_header: String,
    pub cancel_button: String,
    pub selection_apps: Vec<App>,
    pub installed_apps: Vec<App>,
    pub analytics_endpoint: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&LaunchNavConfig::default(), &CliOverrides::default())
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.launchnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".launchnav").join("config.toml"))
}

/// Load config from `~/.launchnav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LaunchNavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LaunchNavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LaunchNavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LaunchNavConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LaunchNavConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LaunchNavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# launchnav configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# platform = "android"               # "android", "ios" or "windows"; or LAUNCHNAV_PLATFORM
# default_app = "google_maps"        # unset = ask with the picker; or LAUNCHNAV_APP
# enable_debug = false

# [navigation]
# transport_mode = "driving"         # "driving", "walking", "bicycling", "transit"
# launch_mode = "maps"               # "maps" or "turn-by-turn" (Google Maps on Android)

# [app_selection]
# dialog_header = "Select app for navigation"
# cancel_button = "Cancel"
# apps = ["google_maps", "waze"]     # restrict and order the picker

# [device]
# installed_apps = ["google_maps", "waze", "citymapper"]   # empty = all apps

# [analytics]
# endpoint = "https://collector.example.com/events"       # or LAUNCHNAV_ANALYTICS_URL
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub platform: Option<Platform>,
    pub app: Option<App>,
    pub enable_debug: bool,
}

/// Reads an env var holding a constant token, warning on bad values.
fn env_token<T: std::str::FromStr>(name: &str) -> Option<T>
where
    T::Err: fmt::Display,
{
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}: {}", name, e);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LaunchNavConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Platform: CLI → env → config → build target → default
    let platform = cli
        .platform
        .or_else(|| env_token("LAUNCHNAV_PLATFORM"))
        .or(config.general.platform)
        .or_else(Platform::current)
        .unwrap_or(DEFAULT_PLATFORM);

    // Default app: CLI → env → config → none (user selection)
    let default_app = cli
        .app
        .or_else(|| env_token("LAUNCHNAV_APP"))
        .or(config.general.default_app);

    // Analytics endpoint: env → config
    let analytics_endpoint = std::env::var("LAUNCHNAV_ANALYTICS_URL")
        .ok()
        .or_else(|| config.analytics.endpoint.clone());

    ResolvedConfig {
        platform,
        default_app,
        enable_debug: cli.enable_debug || config.general.enable_debug.unwrap_or(false),
        transport_mode: config.navigation.transport_mode.unwrap_or_default(),
        launch_mode: config.navigation.launch_mode.unwrap_or_default(),
        dialog_header: config
            .app_selection
            .dialog_header
            .clone()
            .unwrap_or_else(|| DEFAULT_DIALOG_HEADER.to_string()),
        cancel_button: config
            .app_selection
            .cancel_button
            .clone()
            .unwrap_or_else(|| DEFAULT_CANCEL_BUTTON.to_string()),
        selection_apps: config.app_selection.apps.clone(),
        installed_apps: config.device.installed_apps.clone(),
        analytics_endpoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = LaunchNavConfig::default();
        assert!(config.general.platform.is_none());
        assert!(config.device.installed_apps.is_empty());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&LaunchNavConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.transport_mode, TransportMode::Driving);
        assert_eq!(resolved.launch_mode, LaunchMode::Maps);
        assert_eq!(resolved.dialog_header, DEFAULT_DIALOG_HEADER);
        assert_eq!(resolved.cancel_button, DEFAULT_CANCEL_BUTTON);
        assert!(resolved.selection_apps.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = LaunchNavConfig {
            navigation: NavigationConfig {
                transport_mode: Some(TransportMode::Walking),
                launch_mode: Some(LaunchMode::TurnByTurn),
            },
            app_selection: AppSelectionConfig {
                dialog_header: Some("Choose".to_string()),
                cancel_button: Some("Nope".to_string()),
                apps: vec![App::Waze],
            },
            general: GeneralConfig {
                enable_debug: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.transport_mode, TransportMode::Walking);
        assert_eq!(resolved.launch_mode, LaunchMode::TurnByTurn);
        assert_eq!(resolved.dialog_header, "Choose");
        assert_eq!(resolved.cancel_button, "Nope");
        assert_eq!(resolved.selection_apps, vec![App::Waze]);
        assert!(resolved.enable_debug);
    }

    #[test]
    fn test_resolve_cli_platform_and_app_win() {
        let config = LaunchNavConfig {
            general: GeneralConfig {
                platform: Some(Platform::Windows),
                default_app: Some(App::BingMaps),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            platform: Some(Platform::Ios),
            app: Some(App::AppleMaps),
            enable_debug: false,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.platform, Platform::Ios);
        assert_eq!(resolved.default_app, Some(App::AppleMaps));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
platform = "ios"
default_app = "apple_maps"
enable_debug = true

[navigation]
transport_mode = "transit"
launch_mode = "turn-by-turn"

[app_selection]
dialog_header = "Navigate with"
apps = ["apple_maps", "google_maps", "taxis_99"]

[device]
installed_apps = ["apple_maps", "waze"]

[analytics]
endpoint = "http://localhost:9000/events"
"#;
        let config: LaunchNavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.platform, Some(Platform::Ios));
        assert_eq!(config.general.default_app, Some(App::AppleMaps));
        assert_eq!(config.navigation.transport_mode, Some(TransportMode::Transit));
        assert_eq!(config.navigation.launch_mode, Some(LaunchMode::TurnByTurn));
        assert_eq!(config.app_selection.apps.len(), 3);
        assert_eq!(config.app_selection.apps[2], App::Taxis99);
        assert!(config.app_selection.cancel_button.is_none());
        assert_eq!(config.device.installed_apps, vec![App::AppleMaps, App::Waze]);
        assert_eq!(
            config.analytics.endpoint.as_deref(),
            Some("http://localhost:9000/events")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[navigation]
transport_mode = "walking"
"#;
        let config: LaunchNavConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.navigation.transport_mode, Some(TransportMode::Walking));
        assert!(config.general.default_app.is_none());
        assert!(config.app_selection.apps.is_empty());
    }

    #[test]
    fn test_unknown_app_in_toml_is_a_parse_error() {
        let result = toml::from_str::<LaunchNavConfig>("[general]\ndefault_app = \"jetpack\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("launchnav-test-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[general]\nplatform = \"windows\"\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.platform, Some(Platform::Windows));
        fs::remove_file(&path).unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }
}
