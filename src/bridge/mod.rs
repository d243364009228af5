pub mod analytics;
pub mod completion;
pub mod console;
pub mod host;
pub mod scripted;
pub mod types;
pub mod uri;

pub use analytics::EventSink;
pub use completion::{CallbackBridge, CallbackHost, Completion, PendingCompletion, completion};
pub use console::ConsoleHost;
pub use host::{BridgeError, NavigatorBridge};
pub use scripted::{PickerScript, ScriptedBridge};
pub use types::{AnalyticsEvent, LaunchRequest, SelectionPrompt};
pub use uri::launch_uri;
