//! # Core Launcher Logic
//!
//! Everything that does not depend on a particular native host.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • constants / tables   │
//!                    │  • Location, options    │
//!                    │  • LaunchNavigator      │
//!                    └───────────┬─────────────┘
//!                                │ NavigatorBridge
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Callback  │      │  Scripted  │      │  Console   │
//!     │   hosts    │      │  (tests)   │      │  (desktop) │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`constants`]: `Platform`, `App`, `TransportMode`, `LaunchMode`
//! - [`capabilities`]: per app/platform support tables
//! - [`location`]: destination and start parsing
//! - [`options`]: `LaunchOptions`
//! - [`navigator`]: `LaunchNavigator`, the entry point
//! - [`config`]: `~/.launchnav/config.toml`

pub mod capabilities;
pub mod config;
pub mod constants;
pub mod error;
pub mod location;
pub mod navigator;
pub mod options;

pub use constants::{App, LaunchMode, ParseTokenError, Platform, TransportMode};
pub use error::LaunchError;
pub use location::{Coordinates, IntoLocation, Location, LocationError};
pub use navigator::{LaunchNavigator, NavigatorDefaults};
pub use options::{AppSelection, LaunchOptions, SelectionCallback};
