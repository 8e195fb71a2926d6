//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! header, the KPI row, the stacked widget cards and the footer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::fetch::QueryData;
use crate::format::relative_time;
use crate::layout::WidgetKey;
use crate::notify::{Toast, ToastKind};
use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::widgets::integrity::status_color;
use crate::widgets::{card_height, render_widget_card, widget_view, WidgetContext};

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "FICE Dashboard";

/// Footer text showing available keybindings.
pub const FOOTER_TEXT: &str =
    "[j/k] Move  [Space] Grab/Drop  [c] Collapse  [x] Remove  [R] Reset  [r] Role  [i] Integrity  [q] Quit";

/// Footer text while a widget is grabbed.
pub const GRAB_FOOTER_TEXT: &str = "[j/k] Choose target  [Space] Drop  [Esc] Cancel";

/// Shown when every widget has been removed.
pub const EMPTY_LAYOUT_TEXT: &str = "No widgets. Press R to reset the layout.";

/// Placeholder for a KPI without data.
const NO_VALUE: &str = "\u{2014}";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the full dashboard: header, KPI row, widget cards, footer.
pub fn render_dashboard<S: KeyValueStore + Clone>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // KPIs
            Constraint::Min(0),    // cards
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_kpis(frame, app, chunks[1]);
    render_cards(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let padding_len = (area.width as usize)
        .saturating_sub(HEADER_TEXT.len())
        .saturating_sub(VERSION_TEXT.len());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan)),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

/// Session role, identity age and latest integrity status.
fn render_kpis<S: KeyValueStore + Clone>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let now = chrono::Utc::now();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().add_modifier(Modifier::BOLD);

    let role = app
        .viewer
        .role
        .map_or_else(|| NO_VALUE.to_string(), |r| r.to_string());
    let identity_age = match app.queries.data(WidgetKey::IdentitySummary) {
        Some(QueryData::Identity(identity)) => relative_time(identity.last_updated, now),
        _ => NO_VALUE.to_string(),
    };
    let integrity = match app.queries.data(WidgetKey::IntegrityStatus) {
        Some(QueryData::Integrity(checks)) => checks.first().map(|c| c.status),
        _ => None,
    };
    let integrity_span = match integrity {
        Some(status) => Span::styled(status.to_string(), value.fg(status_color(status))),
        None => Span::styled(NO_VALUE, value),
    };

    let line = Line::from(vec![
        Span::styled("Session ", label),
        Span::styled(role, value),
        Span::styled("   Identity updated ", label),
        Span::styled(identity_age, value),
        Span::styled("   Integrity ", label),
        integrity_span,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Stacks the cards top to bottom, scrolling so the focused card is visible.
fn render_cards<S: KeyValueStore + Clone>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let widgets = &app.controller.layout().widgets;
    if widgets.is_empty() {
        let text = Paragraph::new(Line::styled(
            EMPTY_LAYOUT_TEXT,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(text, area);
        return;
    }

    let ctx = WidgetContext::new(&app.queries).with_role(app.viewer.role);
    let views: Vec<_> = widgets.iter().map(|w| widget_view(w.id, &ctx)).collect();
    let heights: Vec<u16> = widgets
        .iter()
        .zip(&views)
        .map(|(w, v)| card_height(w, v))
        .collect();

    let start = first_visible(&heights, app.cursor, area.height);
    let mut y = area.y;
    let bottom = area.y + area.height;
    for ((state, view), height) in widgets.iter().zip(&views).zip(&heights).skip(start) {
        let remaining = bottom.saturating_sub(y);
        if remaining < 2 {
            break;
        }
        let card = Rect::new(area.x, y, area.width, (*height).min(remaining));
        render_widget_card(frame, card, state, view, app.card_focus(state.id));
        y += card.height;
    }
}

/// Index of the first card to draw so that the card at `cursor` fits.
pub fn first_visible(heights: &[u16], cursor: usize, available: u16) -> usize {
    let cursor = cursor.min(heights.len().saturating_sub(1));
    let mut start = 0;
    while start < cursor {
        let used: u32 = heights[start..=cursor].iter().map(|h| u32::from(*h)).sum();
        if used <= u32::from(available) {
            break;
        }
        start += 1;
    }
    start
}

fn render_footer<S: KeyValueStore + Clone>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = match app.toasts.visible() {
        Some(toast) => toast_line(toast),
        None if app.grabbed.is_some() => {
            Line::styled(GRAB_FOOTER_TEXT, Style::default().fg(Color::Yellow))
        }
        None => Line::styled(FOOTER_TEXT, Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn toast_line(toast: &Toast) -> Line<'static> {
    let color = match toast.kind {
        ToastKind::Message => Color::Cyan,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    Line::styled(toast.to_string(), Style::default().fg(color))
}
