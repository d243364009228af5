//! In-memory bridge with scripted answers.
//!
//! Stands in for a device: which apps are "installed", what the user picks,
//! which calls fail. Everything it is asked to do is recorded so tests (and
//! embedders running without a native host) can inspect it.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use super::host::{BridgeError, NavigatorBridge};
use super::types::{AnalyticsEvent, LaunchRequest, SelectionPrompt};
use crate::core::constants::App;

/// What the scripted picker answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerScript {
    /// The first candidate offered.
    #[default]
    First,
    /// A specific app; an error if it was not offered.
    Choose(App),
    /// Dismiss the picker.
    Cancel,
}

#[derive(Default)]
pub struct ScriptedBridge {
    installed: HashSet<App>,
    picker: PickerScript,
    availability_error: Option<String>,
    launch_error: Option<String>,
    launches: Mutex<Vec<LaunchRequest>>,
    prompts: Mutex<Vec<(Vec<App>, SelectionPrompt)>>,
    events: Mutex<Vec<AnalyticsEvent>>,
    availability_queries: Mutex<Vec<App>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(mut self, apps: impl IntoIterator<Item = App>) -> Self {
        self.installed = apps.into_iter().collect();
        self
    }

    pub fn picker(mut self, script: PickerScript) -> Self {
        self.picker = script;
        self
    }

    pub fn fail_availability(mut self, message: impl Into<String>) -> Self {
        self.availability_error = Some(message.into());
        self
    }

    pub fn fail_launch(mut self, message: impl Into<String>) -> Self {
        self.launch_error = Some(message.into());
        self
    }

    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn prompts(&self) -> Vec<(Vec<App>, SelectionPrompt)> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn availability_queries(&self) -> Vec<App> {
        self.availability_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl NavigatorBridge for ScriptedBridge {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn is_app_available(&self, app: App) -> Result<bool, BridgeError> {
        self.availability_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(app);
        if let Some(ref message) = self.availability_error {
            return Err(BridgeError::Host(message.clone()));
        }
        Ok(self.installed.contains(&app))
    }

    async fn launch(&self, request: LaunchRequest) -> Result<(), BridgeError> {
        debug!("Scripted launch: {:?}", request);
        self.launches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        match self.launch_error {
            Some(ref message) => Err(BridgeError::Host(message.clone())),
            None => Ok(()),
        }
    }

    async fn select_app(
        &self,
        candidates: &[App],
        prompt: &SelectionPrompt,
    ) -> Result<Option<App>, BridgeError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((candidates.to_vec(), prompt.clone()));

        match self.picker {
            PickerScript::First => Ok(candidates.first().copied()),
            PickerScript::Choose(app) if candidates.contains(&app) => Ok(Some(app)),
            PickerScript::Choose(app) => Err(BridgeError::Host(format!(
                "{app} was not offered in the picker"
            ))),
            PickerScript::Cancel => Ok(None),
        }
    }

    async fn log_event(&self, event: AnalyticsEvent) -> Result<(), BridgeError> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
        Ok(())
    }
}
