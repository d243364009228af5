//! # Locations
//!
//! A destination or start point is either a free-text address or a
//! latitude/longitude pair. Callers hand us strings and number pairs; this
//! module is the one place those are turned into a `Location`, so nothing
//! downstream has to sniff shapes again.
//!
//! ```text
//! "Buckingham Palace, London"  →  Address("Buckingham Palace, London")
//! "50.1, -4.0"                 →  Coordinates { lat: 50.1, lng: -4.0 }
//! [50.1, -4.0]                 →  Coordinates { lat: 50.1, lng: -4.0 }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    Empty,
    /// Numeric pair with a component outside the valid range (or NaN/inf).
    OutOfRange { lat: f64, lng: f64 },
    /// Array form with other than two elements.
    WrongArity(usize),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::Empty => write!(f, "location is empty"),
            LocationError::OutOfRange { lat, lng } => {
                write!(f, "coordinates out of range: {lat},{lng}")
            }
            LocationError::WrongArity(n) => {
                write!(f, "expected [latitude, longitude], got {n} numbers")
            }
        }
    }
}

impl std::error::Error for LocationError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocationError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(LocationError::OutOfRange { lat, lng })
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationInput", into = "LocationOutput")]
pub enum Location {
    Address(String),
    Coordinates(Coordinates),
}

impl Location {
    /// Parses user input. A comma separated numeric pair becomes coordinates,
    /// anything else is taken as an address.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LocationError::Empty);
        }

        if let Some((lat, lng)) = split_numeric_pair(trimmed) {
            return Coordinates::new(lat, lng).map(Location::Coordinates);
        }

        Ok(Location::Address(trimmed.to_string()))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Location::Coordinates(c) => Some(*c),
            Location::Address(_) => None,
        }
    }

    pub fn is_coordinates(&self) -> bool {
        matches!(self, Location::Coordinates(_))
    }
}

/// Returns the pair if `s` looks like `<number>,<number>`.
fn split_numeric_pair(s: &str) -> Option<(f64, f64)> {
    let (a, b) = s.split_once(',')?;
    let (a, b) = (a.trim(), b.trim());
    if !looks_numeric(a) || !looks_numeric(b) {
        return None;
    }
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// Plain decimal only: `f64::from_str` would also accept "inf" or "NaN",
/// which are place names as far as we are concerned.
fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Address(address) => f.write_str(address),
            Location::Coordinates(c) => c.fmt(f),
        }
    }
}

impl From<Coordinates> for Location {
    fn from(c: Coordinates) -> Self {
        Location::Coordinates(c)
    }
}

impl TryFrom<&str> for Location {
    type Error = LocationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Location::parse(s)
    }
}

impl TryFrom<String> for Location {
    type Error = LocationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Location::parse(&s)
    }
}

impl TryFrom<&[f64]> for Location {
    type Error = LocationError;

    fn try_from(pair: &[f64]) -> Result<Self, Self::Error> {
        match pair {
            [lat, lng] => Coordinates::new(*lat, *lng).map(Location::Coordinates),
            other => Err(LocationError::WrongArity(other.len())),
        }
    }
}

impl TryFrom<[f64; 2]> for Location {
    type Error = LocationError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinates::new(lat, lng).map(Location::Coordinates)
    }
}

impl TryFrom<(f64, f64)> for Location {
    type Error = LocationError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self, Self::Error> {
        Coordinates::new(lat, lng).map(Location::Coordinates)
    }
}

/// Anything a caller may pass as a destination or start point.
pub trait IntoLocation {
    fn into_location(self) -> Result<Location, LocationError>;
}

impl IntoLocation for Location {
    fn into_location(self) -> Result<Location, LocationError> {
        Ok(self)
    }
}

impl IntoLocation for Coordinates {
    fn into_location(self) -> Result<Location, LocationError> {
        Ok(Location::Coordinates(self))
    }
}

impl IntoLocation for &str {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::parse(self)
    }
}

impl IntoLocation for String {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::parse(&self)
    }
}

impl IntoLocation for &String {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::parse(self)
    }
}

impl IntoLocation for [f64; 2] {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::try_from(self)
    }
}

impl IntoLocation for (f64, f64) {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::try_from(self)
    }
}

impl IntoLocation for &[f64] {
    fn into_location(self) -> Result<Location, LocationError> {
        Location::try_from(self)
    }
}

/// Wire shape accepted from JSON/TOML: a string, `[lat, lng]`, or
/// `{"address": "..."}` for text that must not be read as coordinates.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationInput {
    Text(String),
    Pair(Vec<f64>),
    Tagged { address: String },
}

impl TryFrom<LocationInput> for Location {
    type Error = LocationError;

    fn try_from(input: LocationInput) -> Result<Self, Self::Error> {
        match input {
            LocationInput::Text(s) => Location::parse(&s),
            LocationInput::Pair(v) => Location::try_from(v.as_slice()),
            LocationInput::Tagged { address } if address.trim().is_empty() => {
                Err(LocationError::Empty)
            }
            LocationInput::Tagged { address } => Ok(Location::Address(address)),
        }
    }
}

/// Coordinates and ordinary addresses go out as plain strings. An address
/// that would parse back as a pair is tagged.
#[derive(Serialize)]
#[serde(untagged)]
enum LocationOutput {
    Text(String),
    Tagged { address: String },
}

impl From<Location> for LocationOutput {
    fn from(location: Location) -> Self {
        match location {
            Location::Address(address) if split_numeric_pair(address.trim()).is_some() => {
                LocationOutput::Tagged { address }
            }
            Location::Address(address) => LocationOutput::Text(address),
            Location::Coordinates(c) => LocationOutput::Text(c.to_string()),
        }
    }
}
