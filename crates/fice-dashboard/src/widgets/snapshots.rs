//! Recent snapshots: change reason, age and the traits captured.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::fetch::{QueryData, QueryState};
use crate::format::relative_time;
use crate::layout::WidgetKey;
use crate::widgets::{Widget, WidgetContext, WidgetView};

/// Number of snapshots shown. Each takes two lines.
pub const MAX_ROWS: usize = 4;

pub const EMPTY_TITLE: &str = "No snapshots";
pub const EMPTY_DESCRIPTION: &str = "Generated when inputs are saved.";

pub struct RecentSnapshotsWidget;

impl Widget for RecentSnapshotsWidget {
    fn key(&self) -> WidgetKey {
        WidgetKey::RecentSnapshots
    }

    fn view(&self, ctx: &WidgetContext) -> WidgetView {
        let snapshots = match ctx.query(self.key()) {
            QueryState::Pending => return WidgetView::Loading,
            QueryState::Ready(QueryData::Snapshots(list)) if !list.is_empty() => list,
            _ => {
                return WidgetView::Empty {
                    title: EMPTY_TITLE,
                    description: EMPTY_DESCRIPTION,
                }
            }
        };

        let mut lines = Vec::with_capacity(MAX_ROWS * 2);
        for snapshot in snapshots.iter().take(MAX_ROWS) {
            let reason = snapshot
                .change_reason
                .clone()
                .unwrap_or_else(|| "Snapshot".to_string());
            lines.push(Line::from(vec![
                Span::styled(reason, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", relative_time(snapshot.created_at, ctx.now)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            let data = &snapshot.snapshot_data;
            lines.push(Line::styled(
                format!(
                    "  Stability: {} \u{2022} Risk: {}",
                    data.income_stability_score, data.risk_tolerance
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        WidgetView::Populated(lines)
    }
}
