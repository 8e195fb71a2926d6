//! Integrity status: the latest check's status and age.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use fice_data::IntegrityStatus;

use crate::fetch::{QueryData, QueryState};
use crate::format::relative_time;
use crate::layout::WidgetKey;
use crate::widgets::{Widget, WidgetContext, WidgetView};

pub const EMPTY_TITLE: &str = "No checks";
pub const EMPTY_DESCRIPTION: &str = "Run an integrity check with `i`.";

pub struct IntegrityStatusWidget;

/// Color of an integrity status.
pub fn status_color(status: IntegrityStatus) -> Color {
    match status {
        IntegrityStatus::Ok => Color::Green,
        IntegrityStatus::Warn => Color::Yellow,
    }
}

impl Widget for IntegrityStatusWidget {
    fn key(&self) -> WidgetKey {
        WidgetKey::IntegrityStatus
    }

    fn view(&self, ctx: &WidgetContext) -> WidgetView {
        let latest = match ctx.query(self.key()) {
            QueryState::Pending => return WidgetView::Loading,
            QueryState::Ready(QueryData::Integrity(list)) => list.first(),
            _ => None,
        };
        let Some(latest) = latest else {
            return WidgetView::Empty {
                title: EMPTY_TITLE,
                description: EMPTY_DESCRIPTION,
            };
        };

        WidgetView::Populated(vec![
            Line::from(vec![
                Span::styled("Status  ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    latest.status.to_string(),
                    Style::default()
                        .fg(status_color(latest.status))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", latest.name),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::styled(
                format!("Last check: {}", relative_time(latest.created_at, ctx.now)),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}
