//! launchnav library exports

use clap::ValueEnum;

pub mod bridge;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::capabilities::{
    get_app_display_name, get_apps_for_platform, get_transport_modes, supports_dest_name,
    supports_launch_mode, supports_start, supports_start_name, supports_transport_mode,
};
pub use crate::core::{
    App, LaunchError, LaunchMode, LaunchNavigator, LaunchOptions, Location, Platform,
    TransportMode,
};

/// Native host the binary drives.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Host {
    /// Prints launch URIs and shows a terminal picker
    #[default]
    Console,
    /// Records calls without launching anything
    DryRun,
}
