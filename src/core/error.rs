use std::fmt;

use super::constants::{App, Platform};
use super::location::LocationError;
use crate::bridge::BridgeError;

/// Errors surfaced by `LaunchNavigator`'s asynchronous calls.
///
/// `Display` is the one descriptive message a caller's error handler gets.
#[derive(Debug)]
pub enum LaunchError {
    /// Destination or start could not be turned into a location.
    InvalidLocation(LocationError),
    /// The app is not launchable on this platform at all.
    UnsupportedApp { app: App, platform: Platform },
    /// User selection found nothing to offer.
    NoAppsAvailable,
    /// The picker was dismissed without a choice.
    SelectionCancelled,
    /// The native host reported a failure.
    Bridge(BridgeError),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::InvalidLocation(e) => write!(f, "invalid location: {e}"),
            LaunchError::UnsupportedApp { app, platform } => {
                write!(f, "{app} is not supported on {platform}")
            }
            LaunchError::NoAppsAvailable => {
                write!(f, "no navigation apps are available on this device")
            }
            LaunchError::SelectionCancelled => write!(f, "app selection was cancelled"),
            LaunchError::Bridge(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::InvalidLocation(e) => Some(e),
            LaunchError::Bridge(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LocationError> for LaunchError {
    fn from(e: LocationError) -> Self {
        LaunchError::InvalidLocation(e)
    }
}

impl From<BridgeError> for LaunchError {
    fn from(e: BridgeError) -> Self {
        LaunchError::Bridge(e)
    }
}
