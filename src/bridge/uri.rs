//! Launch URIs for apps with public URL schemes.
//!
//! Used by hosts that open apps by URI rather than through a platform SDK.
//! Apps without a documented scheme, and coordinate-only schemes given an
//! address, yield `None`.

use reqwest::Url;

use super::types::LaunchRequest;
use crate::core::constants::{App, LaunchMode, Platform, TransportMode};
use crate::core::location::{Coordinates, Location};

pub fn launch_uri(request: &LaunchRequest) -> Option<String> {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    let base = match request.app {
        App::GoogleMaps => google_maps(request, &mut pairs),
        App::AppleMaps => apple_maps(request, &mut pairs),
        App::Waze => waze(request, &mut pairs),
        App::Citymapper => citymapper(request, &mut pairs),
        App::BingMaps => bing_maps(request, &mut pairs),
        App::Geo => geo(request, &mut pairs),
        App::HereMaps => here_maps(request)?,
        App::Yandex => yandex(request, &mut pairs)?,
        App::MapsMe => maps_me(request, &mut pairs)?,
        _ => return None,
    };

    let mut url = Url::parse(&base).ok()?;
    if !pairs.is_empty() || !request.extras.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        for (key, value) in &request.extras {
            query.append_pair(key, value);
        }
    }
    Some(url.into())
}

fn google_maps(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    let turn_by_turn = request.platform == Platform::Android
        && request.launch_mode == Some(LaunchMode::TurnByTurn);

    if turn_by_turn {
        pairs.push(("q", request.destination.to_string()));
        if let Some(mode) = request.transport_mode {
            let flag = match mode {
                TransportMode::Driving => "d",
                TransportMode::Walking => "w",
                TransportMode::Bicycling => "b",
                TransportMode::Transit => "r",
            };
            pairs.push(("mode", flag.to_string()));
        }
        return "google.navigation:".to_string();
    }

    pairs.push(("api", "1".to_string()));
    pairs.push(("destination", request.destination.to_string()));
    if let Some(ref start) = request.start {
        pairs.push(("origin", start.to_string()));
    }
    if let Some(mode) = request.transport_mode {
        pairs.push(("travelmode", mode.as_str().to_string()));
    }
    "https://www.google.com/maps/dir/".to_string()
}

fn apple_maps(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    pairs.push(("daddr", request.destination.to_string()));
    if let Some(ref start) = request.start {
        pairs.push(("saddr", start.to_string()));
    }
    if let Some(mode) = request.transport_mode {
        let flag = match mode {
            TransportMode::Walking => "w",
            TransportMode::Transit => "r",
            TransportMode::Driving | TransportMode::Bicycling => "d",
        };
        pairs.push(("dirflg", flag.to_string()));
    }
    "https://maps.apple.com/".to_string()
}

fn waze(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    match request.destination {
        Location::Coordinates(c) => pairs.push(("ll", c.to_string())),
        Location::Address(ref address) => pairs.push(("q", address.clone())),
    }
    pairs.push(("navigate", "yes".to_string()));
    "https://waze.com/ul".to_string()
}

fn citymapper(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    push_point(pairs, "endcoord", "endaddress", &request.destination);
    if let Some(ref name) = request.destination_name {
        pairs.push(("endname", name.clone()));
    }
    if let Some(ref start) = request.start {
        push_point(pairs, "startcoord", "startaddress", start);
        if let Some(ref name) = request.start_name {
            pairs.push(("startname", name.clone()));
        }
    }
    "https://citymapper.com/directions".to_string()
}

fn push_point(
    pairs: &mut Vec<(&str, String)>,
    coord_key: &'static str,
    address_key: &'static str,
    location: &Location,
) {
    match location {
        Location::Coordinates(c) => pairs.push((coord_key, c.to_string())),
        Location::Address(address) => pairs.push((address_key, address.clone())),
    }
}

fn bing_maps(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    let point = |location: &Location| match location {
        Location::Coordinates(c) => format!("pos.{}_{}", c.lat, c.lng),
        Location::Address(address) => format!("adr.{address}"),
    };
    let start = request.start.as_ref().map(point).unwrap_or_default();
    pairs.push(("rtp", format!("{}~{}", start, point(&request.destination))));
    if let Some(mode) = request.transport_mode {
        let flag = match mode {
            TransportMode::Walking => "w",
            TransportMode::Transit => "t",
            TransportMode::Driving | TransportMode::Bicycling => "d",
        };
        pairs.push(("mode", flag.to_string()));
    }
    "bingmaps:".to_string()
}

fn geo(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> String {
    match request.destination {
        Location::Coordinates(c) => {
            let label = request
                .destination_name
                .as_ref()
                .map(|name| format!("{c}({name})"))
                .unwrap_or_else(|| c.to_string());
            pairs.push(("q", label));
            format!("geo:{c}")
        }
        Location::Address(ref address) => {
            pairs.push(("q", address.clone()));
            "geo:0,0".to_string()
        }
    }
}

/// HERE takes coordinates in the path: `/r/<start>/<lat>,<lng>,<name>`.
fn here_maps(request: &LaunchRequest) -> Option<String> {
    let dest = request.destination.coordinates()?;
    let label = |c: Coordinates, name: &Option<String>| match name {
        Some(name) => format!("{c},{name}"),
        None => c.to_string(),
    };
    let start = match request.start.as_ref().and_then(Location::coordinates) {
        Some(c) => label(c, &request.start_name),
        None => "mylocation".to_string(),
    };

    let mut url = Url::parse("https://share.here.com/r").ok()?;
    url.path_segments_mut()
        .ok()?
        .push(&start)
        .push(&label(dest, &request.destination_name));
    Some(url.into())
}

fn yandex(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> Option<String> {
    let dest = request.destination.coordinates()?;
    pairs.push(("lat_to", dest.lat.to_string()));
    pairs.push(("lon_to", dest.lng.to_string()));
    if let Some(start) = request.start.as_ref().and_then(Location::coordinates) {
        pairs.push(("lat_from", start.lat.to_string()));
        pairs.push(("lon_from", start.lng.to_string()));
    }
    Some("yandexnavi://build_route_on_map".to_string())
}

fn maps_me(request: &LaunchRequest, pairs: &mut Vec<(&str, String)>) -> Option<String> {
    let dest = request.destination.coordinates()?;
    if let Some(start) = request.start.as_ref().and_then(Location::coordinates) {
        pairs.push(("sll", start.to_string()));
        pairs.push(("saddr", request.start_name.clone().unwrap_or_default()));
    }
    pairs.push(("dll", dest.to_string()));
    pairs.push(("daddr", request.destination_name.clone().unwrap_or_default()));
    let kind = match request.transport_mode.unwrap_or_default() {
        TransportMode::Driving => "vehicle",
        TransportMode::Walking => "pedestrian",
        TransportMode::Bicycling => "bicycle",
        TransportMode::Transit => "transit",
    };
    pairs.push(("type", kind.to_string()));
    Some("mapsme://route".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn request(app: App, platform: Platform, destination: &str) -> LaunchRequest {
        LaunchRequest {
            app,
            platform,
            destination: Location::parse(destination).unwrap(),
            destination_name: None,
            start: None,
            start_name: None,
            transport_mode: None,
            launch_mode: None,
            extras: BTreeMap::new(),
            enable_debug: false,
        }
    }

    #[test]
    fn test_google_maps_directions_url() {
        let mut req = request(App::GoogleMaps, Platform::Ios, "Buckingham Palace, London");
        req.transport_mode = Some(TransportMode::Transit);
        let uri = launch_uri(&req).unwrap();
        assert!(uri.starts_with("https://www.google.com/maps/dir/?api=1"));
        assert!(uri.contains("destination=Buckingham+Palace%2C+London"));
        assert!(uri.contains("travelmode=transit"));
    }

    #[test]
    fn test_google_maps_turn_by_turn_on_android() {
        let mut req = request(App::GoogleMaps, Platform::Android, "50.1,-4.0");
        req.launch_mode = Some(LaunchMode::TurnByTurn);
        req.transport_mode = Some(TransportMode::Walking);
        let uri = launch_uri(&req).unwrap();
        assert!(uri.starts_with("google.navigation:"));
        assert!(uri.contains("q=50.1%2C-4"));
        assert!(uri.contains("mode=w"));
    }

    #[test]
    fn test_waze_uses_ll_for_coordinates() {
        let uri = launch_uri(&request(App::Waze, Platform::Android, "50.1,-4.0")).unwrap();
        assert_eq!(uri, "https://waze.com/ul?ll=50.1%2C-4&navigate=yes");
    }

    #[test]
    fn test_extras_are_appended() {
        let mut req = request(App::AppleMaps, Platform::Ios, "Paris");
        req.extras.insert("t".into(), "k".into());
        let uri = launch_uri(&req).unwrap();
        assert!(uri.starts_with("https://maps.apple.com/?daddr=Paris"));
        assert!(uri.ends_with("t=k"));
    }

    #[test]
    fn test_coordinate_only_apps_reject_addresses() {
        assert!(launch_uri(&request(App::Yandex, Platform::Android, "Moscow")).is_none());
        assert!(launch_uri(&request(App::MapsMe, Platform::Ios, "Berlin")).is_none());
        assert!(launch_uri(&request(App::HereMaps, Platform::Ios, "Oslo")).is_none());
        assert!(launch_uri(&request(App::Yandex, Platform::Android, "55.7,37.6")).is_some());
    }

    #[test]
    fn test_here_maps_path() {
        let mut req = request(App::HereMaps, Platform::Android, "52.5,13.4");
        req.destination_name = Some("Office".into());
        let uri = launch_uri(&req).unwrap();
        assert_eq!(uri, "https://share.here.com/r/mylocation/52.5,13.4,Office");
    }

    #[test]
    fn test_bing_route_with_start() {
        let mut req = request(App::BingMaps, Platform::Windows, "Seattle");
        req.start = Some(Location::parse("47.6,-122.3").unwrap());
        req.transport_mode = Some(TransportMode::Walking);
        let uri = launch_uri(&req).unwrap();
        assert!(uri.starts_with("bingmaps:?rtp="));
        assert!(uri.contains("adr.Seattle"));
        assert!(uri.contains("mode=w"));
    }

    #[test]
    fn test_geo_with_label() {
        let mut req = request(App::Geo, Platform::Android, "50.1,-4.0");
        req.destination_name = Some("Home".into());
        let uri = launch_uri(&req).unwrap();
        assert!(uri.starts_with("geo:50.1,-4?q="));
    }

    #[test]
    fn test_apps_without_scheme() {
        assert!(launch_uri(&request(App::Navigon, Platform::Ios, "Rome")).is_none());
    }
}
