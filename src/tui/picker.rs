//! # App Picker
//!
//! Overlay listing the candidate apps. Each row shows the display name and
//! the transport modes the app takes on the host's platform; the line under
//! the list tells which optional parameters the highlighted app honours.
//!
//! `AppPickerState` lives for the whole prompt, `AppPicker` borrows it for
//! one frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::capabilities::{
    get_app_display_name, get_transport_modes, supports_dest_name, supports_start,
    supports_start_name,
};
use crate::core::constants::{App, Platform, TransportMode};
use crate::tui::event::TuiEvent;

/// One candidate with its labels resolved for the platform.
struct PickerRow {
    app: App,
    name: &'static str,
    modes: String,
    detail: String,
}

impl PickerRow {
    fn new(app: App, platform: Platform) -> Self {
        let modes = get_transport_modes(app, platform);
        let modes = if modes.is_empty() {
            String::new()
        } else {
            modes.iter().map(|m| mode_badge(*m)).collect::<Vec<_>>().join(" ")
        };

        let flag = |on: bool, label: &str| format!("{}{label}", if on { '+' } else { '-' });
        let detail = [
            flag(supports_start(app, platform), "start"),
            flag(supports_start_name(app, platform), "start name"),
            flag(supports_dest_name(app, platform), "dest name"),
        ]
        .join("  ");

        Self {
            app,
            name: get_app_display_name(app),
            modes,
            detail,
        }
    }
}

fn mode_badge(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Driving => "car",
        TransportMode::Walking => "walk",
        TransportMode::Bicycling => "bike",
        TransportMode::Transit => "bus",
    }
}

pub struct AppPickerState {
    rows: Vec<PickerRow>,
    list_state: ListState,
}

impl AppPickerState {
    pub fn new(platform: Platform, apps: &[App]) -> Self {
        let rows: Vec<PickerRow> = apps.iter().map(|app| PickerRow::new(*app, platform)).collect();
        let list_state = ListState::default().with_selected((!rows.is_empty()).then_some(0));
        Self { rows, list_state }
    }

    pub fn highlighted(&self) -> Option<App> {
        self.list_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.app)
    }

    /// Moves by `step` rows, wrapping at either end.
    fn step(&mut self, step: isize) {
        let len = self.rows.len() as isize;
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        self.list_state
            .select(Some((current + step).rem_euclid(len) as usize));
    }

    /// Returns the outcome once the prompt should close.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        match event {
            TuiEvent::Up => self.step(-1),
            TuiEvent::Down => self.step(1),
            TuiEvent::Submit => return self.highlighted().map(PickerEvent::Select),
            TuiEvent::Cancel => return Some(PickerEvent::Dismiss),
            TuiEvent::Resize => {}
        }
        None
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PickerEvent {
    Select(App),
    Dismiss,
}

pub struct AppPicker<'a> {
    state: &'a mut AppPickerState,
    header: &'a str,
    cancel_button: &'a str,
}

impl<'a> AppPicker<'a> {
    pub fn new(state: &'a mut AppPickerState, header: &'a str, cancel_button: &'a str) -> Self {
        Self {
            state,
            header,
            cancel_button,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let height = (self.state.rows.len() as u16).max(1) + 4;
        let overlay = overlay_area(area, 64, height);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Line::from(format!(" {} ", self.header)).bold())
            .title_bottom(
                Line::from(vec![
                    Span::raw(" ↑↓ move  Enter open  Esc "),
                    Span::raw(self.cancel_button),
                    Span::raw(" "),
                ])
                .right_aligned(),
            );
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        if self.state.rows.is_empty() {
            frame.render_widget(
                Paragraph::new("Nothing to choose from").centered().dark_gray(),
                inner,
            );
            return;
        }

        let [list_area, _, detail_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let modes_width = self
            .state
            .rows
            .iter()
            .map(|row| row.modes.width())
            .max()
            .unwrap_or(0);
        let name_width = (list_area.width as usize).saturating_sub(modes_width + 3);

        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    Span::raw(fit(row.name, name_width)),
                    Span::raw("  "),
                    Span::styled(row.modes.clone(), Style::default().fg(Color::Green)),
                ]))
            })
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        if let Some(row) = self.state.list_state.selected().and_then(|i| self.state.rows.get(i)) {
            frame.render_widget(
                Paragraph::new(format!(" {}  {}", row.app, row.detail)).dark_gray(),
                detail_area,
            );
        }
    }
}

/// Pads or cuts `s` to exactly `width` columns, marking a cut with `~`.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{s}{}", " ".repeat(width - s.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('~');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// A box of at most `width` x `height` cells centered in `area`.
fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [overlay] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    overlay
}
