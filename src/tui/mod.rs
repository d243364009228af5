//! # TUI Adapter
//!
//! Terminal rendition of the native app picker, used by the console host.
//! Rows are labelled with what each app supports on the host's platform.
//! This is the only module that knows about ratatui and crossterm.

mod event;
mod picker;

use log::info;
use std::time::Duration;

use ratatui::DefaultTerminal;

use crate::core::constants::{App, Platform};
use crate::tui::event::poll_event;
use crate::tui::picker::{AppPicker, AppPickerState, PickerEvent};

/// Shows the picker full screen and blocks until the user chooses or
/// cancels. `Ok(None)` means cancelled.
pub fn pick_app(
    platform: Platform,
    apps: &[App],
    header: &str,
    cancel_button: &str,
) -> std::io::Result<Option<App>> {
    let mut state = AppPickerState::new(platform, apps);
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut state, header, cancel_button);
    ratatui::restore();
    info!("App picker closed with {:?}", result.as_ref().ok());
    result
}

fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppPickerState,
    header: &str,
    cancel_button: &str,
) -> std::io::Result<Option<App>> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| AppPicker::new(state, header, cancel_button).render(f, f.area()))?;
            needs_redraw = false;
        }

        let Some(event) = poll_event(Duration::from_millis(250))? else {
            continue;
        };
        needs_redraw = true;
        match state.handle_event(&event) {
            Some(PickerEvent::Select(app)) => return Ok(Some(app)),
            Some(PickerEvent::Dismiss) => return Ok(None),
            None => {}
        }
    }
}
