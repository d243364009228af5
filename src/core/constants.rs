//! # Constant Groups
//!
//! The closed identifier sets shared with the native host. Every value has a
//! stable string token (the one the host understands), exposed through
//! `as_str()`, `Display`, `FromStr` and serde.
//!
//! ```text
//! Platform       android | ios | windows
//! App            geo | google_maps | apple_maps | ... | gaode
//! TransportMode  driving | walking | bicycling | transit
//! LaunchMode     maps | turn-by-turn
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a string is not a known token of a constant group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseTokenError {}

/// Looks up `value` among the tokens of `all`, case-insensitively.
fn parse_token<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    token: fn(T) -> &'static str,
) -> Result<T, ParseTokenError> {
    let needle = value.trim();
    all.iter()
        .copied()
        .find(|candidate| token(*candidate).eq_ignore_ascii_case(needle))
        .ok_or_else(|| ParseTokenError {
            kind,
            value: value.to_string(),
        })
}

// ── Platform ────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Windows];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Windows => "windows",
        }
    }

    /// The platform this binary was compiled for, if it is one the host supports.
    pub fn current() -> Option<Platform> {
        if cfg!(target_os = "android") {
            Some(Platform::Android)
        } else if cfg!(target_os = "ios") {
            Some(Platform::Ios)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("platform", s, &Platform::ALL, Platform::as_str)
    }
}

// ── App ─────────────────────────────────────────────────────────────────────

/// A navigation app the host knows how to launch.
///
/// There is deliberately no "user select" variant: leaving the app unset in
/// `LaunchOptions` is how a caller asks for the picker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum App {
    /// Android's generic `geo:` intent, resolved by the OS chooser.
    Geo,
    GoogleMaps,
    AppleMaps,
    Citymapper,
    Navigon,
    TransitApp,
    Waze,
    Yandex,
    Uber,
    Tomtom,
    BingMaps,
    Sygic,
    HereMaps,
    Moovit,
    Lyft,
    MapsMe,
    Cabify,
    Baidu,
    #[serde(rename = "taxis_99")]
    Taxis99,
    Gaode,
}

impl App {
    pub const ALL: [App; 20] = [
        App::Geo,
        App::GoogleMaps,
        App::AppleMaps,
        App::Citymapper,
        App::Navigon,
        App::TransitApp,
        App::Waze,
        App::Yandex,
        App::Uber,
        App::Tomtom,
        App::BingMaps,
        App::Sygic,
        App::HereMaps,
        App::Moovit,
        App::Lyft,
        App::MapsMe,
        App::Cabify,
        App::Baidu,
        App::Taxis99,
        App::Gaode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            App::Geo => "geo",
            App::GoogleMaps => "google_maps",
            App::AppleMaps => "apple_maps",
            App::Citymapper => "citymapper",
            App::Navigon => "navigon",
            App::TransitApp => "transit_app",
            App::Waze => "waze",
            App::Yandex => "yandex",
            App::Uber => "uber",
            App::Tomtom => "tomtom",
            App::BingMaps => "bing_maps",
            App::Sygic => "sygic",
            App::HereMaps => "here_maps",
            App::Moovit => "moovit",
            App::Lyft => "lyft",
            App::MapsMe => "maps_me",
            App::Cabify => "cabify",
            App::Baidu => "baidu",
            App::Taxis99 => "taxis_99",
            App::Gaode => "gaode",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for App {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("app", s, &App::ALL, App::as_str)
    }
}

// ── TransportMode ───────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TransportMode {
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Driving,
        TransportMode::Walking,
        TransportMode::Bicycling,
        TransportMode::Transit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Bicycling => "bicycling",
            TransportMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("transport mode", s, &TransportMode::ALL, TransportMode::as_str)
    }
}

// ── LaunchMode ──────────────────────────────────────────────────────────────

/// Google Maps on Android only: plain map view or straight into turn-by-turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LaunchMode {
    #[default]
    #[serde(rename = "maps")]
    Maps,
    #[serde(rename = "turn-by-turn")]
    TurnByTurn,
}

impl LaunchMode {
    pub const ALL: [LaunchMode; 2] = [LaunchMode::Maps, LaunchMode::TurnByTurn];

    pub fn as_str(self) -> &'static str {
        match self {
            LaunchMode::Maps => "maps",
            LaunchMode::TurnByTurn => "turn-by-turn",
        }
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchMode {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token("launch mode", s, &LaunchMode::ALL, LaunchMode::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_tokens_round_trip_through_from_str() {
        for app in App::ALL {
            assert_eq!(app.as_str().parse::<App>(), Ok(app));
        }
    }

    #[test]
    fn test_app_serde_matches_as_str() {
        for app in App::ALL {
            let json = serde_json::to_string(&app).unwrap();
            assert_eq!(json, format!("\"{}\"", app.as_str()));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" Google_Maps ".parse::<App>(), Ok(App::GoogleMaps));
        assert_eq!("IOS".parse::<Platform>(), Ok(Platform::Ios));
    }

    #[test]
    fn test_unknown_token_is_descriptive() {
        let err = "teleport".parse::<TransportMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown transport mode: 'teleport'");
    }

    #[test]
    fn test_launch_mode_uses_hyphenated_token() {
        assert_eq!(LaunchMode::TurnByTurn.to_string(), "turn-by-turn");
        let parsed: LaunchMode = serde_json::from_str("\"turn-by-turn\"").unwrap();
        assert_eq!(parsed, LaunchMode::TurnByTurn);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TransportMode::default(), TransportMode::Driving);
        assert_eq!(LaunchMode::default(), LaunchMode::Maps);
    }
}
