//! Financial identity summary: the four identity KPIs.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::fetch::{QueryData, QueryState};
use crate::layout::WidgetKey;
use crate::widgets::{Widget, WidgetContext, WidgetView};

pub const EMPTY_TITLE: &str = "No identity";
pub const EMPTY_DESCRIPTION: &str = "This user has no financial_identity.";

/// Width of the KPI label column.
const LABEL_WIDTH: usize = 15;

pub struct IdentitySummaryWidget;

impl Widget for IdentitySummaryWidget {
    fn key(&self) -> WidgetKey {
        WidgetKey::IdentitySummary
    }

    fn view(&self, ctx: &WidgetContext) -> WidgetView {
        let identity = match ctx.query(self.key()) {
            QueryState::Pending => return WidgetView::Loading,
            QueryState::Ready(QueryData::Identity(identity)) => identity,
            _ => {
                return WidgetView::Empty {
                    title: EMPTY_TITLE,
                    description: EMPTY_DESCRIPTION,
                }
            }
        };

        WidgetView::Populated(vec![
            kpi("Income type", identity.income_type.to_string()),
            kpi(
                "Stability",
                format!("{}/100", identity.income_stability_score),
            ),
            kpi("Risk", identity.risk_tolerance.to_string()),
            kpi("Decision style", identity.decision_style.to_string()),
        ])
    }
}

fn kpi(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}
