//! # Capability Tables
//!
//! Static knowledge of which apps exist on which platform and which optional
//! launch parameters each of them honours. Every query is a pure lookup: an
//! app/platform pair missing from the table answers `false` (or an empty list).
//!
//! Transport mode support is derived from the mode list, so
//! `supports_transport_mode` and `get_transport_modes` can never disagree.

use super::constants::{App, Platform, TransportMode};
use super::constants::TransportMode::{Bicycling, Driving, Transit, Walking};

/// One row of a platform table.
#[derive(Debug, Clone, Copy)]
struct AppSupport {
    app: App,
    transport_modes: &'static [TransportMode],
    launch_mode: bool,
    start: bool,
    start_name: bool,
    dest_name: bool,
}

const NONE: &[TransportMode] = &[];
const ALL_MODES: &[TransportMode] = &[Driving, Walking, Bicycling, Transit];
const NO_CYCLING: &[TransportMode] = &[Driving, Walking, Transit];
const ROAD: &[TransportMode] = &[Driving, Walking];

const fn row(
    app: App,
    transport_modes: &'static [TransportMode],
    start: bool,
    start_name: bool,
    dest_name: bool,
) -> AppSupport {
    AppSupport {
        app,
        transport_modes,
        launch_mode: false,
        start,
        start_name,
        dest_name,
    }
}

const ANDROID: &[AppSupport] = &[
    row(App::Geo, NONE, false, false, true),
    AppSupport {
        app: App::GoogleMaps,
        transport_modes: ALL_MODES,
        launch_mode: true,
        start: true,
        start_name: false,
        dest_name: false,
    },
    row(App::Citymapper, NONE, true, true, true),
    row(App::Uber, NONE, true, true, true),
    row(App::Waze, NONE, false, false, false),
    row(App::Yandex, NONE, true, false, false),
    row(App::Sygic, ROAD, false, false, false),
    row(App::HereMaps, NONE, true, true, true),
    row(App::Moovit, NONE, true, true, true),
    row(App::Lyft, NONE, true, false, false),
    row(App::MapsMe, ALL_MODES, true, true, true),
    row(App::Cabify, NONE, true, true, true),
    row(App::Baidu, ALL_MODES, true, true, true),
    row(App::Taxis99, NONE, true, true, true),
    row(App::Gaode, ALL_MODES, true, true, true),
];

const IOS: &[AppSupport] = &[
    row(App::AppleMaps, NO_CYCLING, true, false, false),
    row(App::GoogleMaps, ALL_MODES, true, false, false),
    row(App::Citymapper, NONE, true, true, true),
    row(App::Navigon, NONE, false, false, true),
    row(App::TransitApp, NONE, true, false, false),
    row(App::Waze, NONE, false, false, false),
    row(App::Yandex, NONE, true, false, false),
    row(App::Uber, NONE, true, true, true),
    row(App::Tomtom, NONE, false, false, true),
    row(App::Sygic, ROAD, false, false, false),
    row(App::HereMaps, NONE, true, true, true),
    row(App::Moovit, NONE, true, true, true),
    row(App::Lyft, NONE, true, false, false),
    row(App::MapsMe, ALL_MODES, true, true, true),
    row(App::Cabify, NONE, true, true, true),
    row(App::Baidu, ALL_MODES, true, true, true),
    row(App::Taxis99, NONE, true, true, true),
    row(App::Gaode, ALL_MODES, true, true, true),
];

const WINDOWS: &[AppSupport] = &[row(App::BingMaps, NO_CYCLING, true, false, false)];

fn table(platform: Platform) -> &'static [AppSupport] {
    match platform {
        Platform::Android => ANDROID,
        Platform::Ios => IOS,
        Platform::Windows => WINDOWS,
    }
}

fn lookup(app: App, platform: Platform) -> Option<&'static AppSupport> {
    table(platform).iter().find(|entry| entry.app == app)
}

/// Human readable name of an app, e.g. "Google Maps".
pub fn get_app_display_name(app: App) -> &'static str {
    match app {
        App::Geo => "[Native chooser]",
        App::GoogleMaps => "Google Maps",
        App::AppleMaps => "Apple Maps",
        App::Citymapper => "Citymapper",
        App::Navigon => "Navigon",
        App::TransitApp => "Transit App",
        App::Waze => "Waze",
        App::Yandex => "Yandex Navigator",
        App::Uber => "Uber",
        App::Tomtom => "TomTom",
        App::BingMaps => "Bing Maps",
        App::Sygic => "Sygic",
        App::HereMaps => "HERE Maps",
        App::Moovit => "Moovit",
        App::Lyft => "Lyft",
        App::MapsMe => "MAPS.ME",
        App::Cabify => "Cabify",
        App::Baidu => "Baidu Maps",
        App::Taxis99 => "99 Taxi",
        App::Gaode => "Gaode Maps",
    }
}

/// Apps the host can launch on `platform`, in picker order.
pub fn get_apps_for_platform(platform: Platform) -> Vec<App> {
    table(platform).iter().map(|entry| entry.app).collect()
}

pub fn is_app_supported(app: App, platform: Platform) -> bool {
    lookup(app, platform).is_some()
}

pub fn supports_transport_mode(app: App, platform: Platform) -> bool {
    !get_transport_modes(app, platform).is_empty()
}

/// Transport modes `app` accepts on `platform`; empty when it takes none.
pub fn get_transport_modes(app: App, platform: Platform) -> &'static [TransportMode] {
    lookup(app, platform).map_or(NONE, |entry| entry.transport_modes)
}

/// Only Google Maps on Android distinguishes map view from turn-by-turn.
pub fn supports_launch_mode(app: App, platform: Platform) -> bool {
    lookup(app, platform).is_some_and(|entry| entry.launch_mode)
}

pub fn supports_start(app: App, platform: Platform) -> bool {
    lookup(app, platform).is_some_and(|entry| entry.start)
}

pub fn supports_start_name(app: App, platform: Platform) -> bool {
    lookup(app, platform).is_some_and(|entry| entry.start_name)
}

pub fn supports_dest_name(app: App, platform: Platform) -> bool {
    lookup(app, platform).is_some_and(|entry| entry.dest_name)
}
