//! Recent inputs: the newest financial profile inputs with their age.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::fetch::{QueryData, QueryState};
use crate::format::relative_time;
use crate::layout::WidgetKey;
use crate::widgets::{Widget, WidgetContext, WidgetView};

/// Number of inputs shown.
pub const MAX_ROWS: usize = 5;

pub const EMPTY_TITLE: &str = "No inputs";
pub const EMPTY_DESCRIPTION: &str = "Add the first input with `fice add-input`.";

pub struct RecentInputsWidget;

impl Widget for RecentInputsWidget {
    fn key(&self) -> WidgetKey {
        WidgetKey::RecentInputs
    }

    fn view(&self, ctx: &WidgetContext) -> WidgetView {
        let inputs = match ctx.query(self.key()) {
            QueryState::Pending => return WidgetView::Loading,
            QueryState::Ready(QueryData::Inputs(list)) if !list.is_empty() => list,
            _ => {
                return WidgetView::Empty {
                    title: EMPTY_TITLE,
                    description: EMPTY_DESCRIPTION,
                }
            }
        };

        let lines = inputs
            .iter()
            .take(MAX_ROWS)
            .map(|input| {
                Line::from(vec![
                    Span::styled(
                        input.input_type.to_string(),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(" "),
                    Span::raw(input.input_value.clone()),
                    Span::styled(
                        format!("  {}", relative_time(input.created_at, ctx.now)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();
        WidgetView::Populated(lines)
    }
}
