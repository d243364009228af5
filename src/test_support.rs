//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::bridge::ScriptedBridge;
use crate::core::constants::Platform;
use crate::core::navigator::LaunchNavigator;

/// Creates a navigator over `bridge`, handing back the bridge for inspection.
pub fn test_navigator(
    platform: Platform,
    bridge: ScriptedBridge,
) -> (LaunchNavigator, Arc<ScriptedBridge>) {
    let bridge = Arc::new(bridge);
    let navigator = LaunchNavigator::new(bridge.clone(), platform);
    (navigator, bridge)
}
