use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Picker input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Up,
    Down,
    Submit,
    Cancel,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            match (key.modifiers, key.code) {
                // Ctrl+C cancels like Esc
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Cancel),
                (_, KeyCode::Esc | KeyCode::Char('q')) => Some(TuiEvent::Cancel),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Up | KeyCode::Char('k')) => Some(TuiEvent::Up),
                (_, KeyCode::Down | KeyCode::Char('j')) => Some(TuiEvent::Down),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}
