use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::core::constants::{App, LaunchMode, Platform, TransportMode};
use crate::core::location::Location;

/// A launch the host should perform. Built by the navigator after it has
/// applied defaults and stripped anything `app` cannot honour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub app: App,
    pub platform: Platform,
    pub destination: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_mode: Option<LaunchMode>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
    #[serde(default)]
    pub enable_debug: bool,
}

/// Texts for the host's app picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPrompt {
    pub header: String,
    pub cancel_button: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_to_sum: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(
        name: impl Into<String>,
        params: Option<serde_json::Value>,
        value_to_sum: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            params,
            value_to_sum,
            timestamp: Utc::now(),
        }
    }
}
