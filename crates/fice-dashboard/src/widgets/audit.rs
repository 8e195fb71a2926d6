//! Recent audit events, scoped to the viewer unless they are an admin.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::fetch::{QueryData, QueryState};
use crate::format::relative_time;
use crate::layout::WidgetKey;
use crate::widgets::{Widget, WidgetContext, WidgetView};

/// Number of events shown.
pub const MAX_ROWS: usize = 6;

pub const EMPTY_TITLE: &str = "No events";
pub const EMPTY_DESCRIPTION: &str = "System and user actions will appear here.";

pub struct RecentAuditWidget;

impl Widget for RecentAuditWidget {
    fn key(&self) -> WidgetKey {
        WidgetKey::RecentAudit
    }

    fn view(&self, ctx: &WidgetContext) -> WidgetView {
        let events = match ctx.query(self.key()) {
            QueryState::Pending => return WidgetView::Loading,
            QueryState::Ready(QueryData::Audit(list)) if !list.is_empty() => list,
            _ => {
                return WidgetView::Empty {
                    title: EMPTY_TITLE,
                    description: EMPTY_DESCRIPTION,
                }
            }
        };

        let lines = events
            .iter()
            .take(MAX_ROWS)
            .map(|event| {
                Line::from(vec![
                    Span::styled(
                        event.action.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} \u{2022} {}", event.actor, event.entity),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("  {}", relative_time(event.created_at, ctx.now)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        WidgetView::Populated(lines)
    }
}
