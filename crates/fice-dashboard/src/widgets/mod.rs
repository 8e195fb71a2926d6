//! Dashboard widgets.
//!
//! This module defines the [`Widget`] trait every dashboard widget
//! implements and the [`widget_view`] entry point the renderer calls.
//!
//! # Architecture
//!
//! Each widget binds to exactly one query and turns its state into a
//! [`WidgetView`]: a loading placeholder while the query is pending, an
//! empty state when the data is empty or missing, or a bounded excerpt of
//! styled lines. Widgets never talk to each other; user requests such as
//! collapse or remove reach the controller through key actions, not through
//! the widget.
//!
//! [`card`] draws a view inside its frame.

pub mod audit;
pub mod card;
pub mod context;
pub mod identity;
pub mod inputs;
pub mod integrity;
pub mod snapshots;

pub use card::{card_height, render_widget_card, CardFocus};
pub use context::WidgetContext;

use ratatui::text::Line;

use crate::layout::WidgetKey;

/// What a widget shows inside its card.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView {
    /// The backing query is still pending.
    Loading,
    /// Nothing to show; the entity is absent, the list is empty or the
    /// query failed.
    Empty {
        title: &'static str,
        description: &'static str,
    },
    /// A bounded excerpt of the data.
    Populated(Vec<Line<'static>>),
}

impl WidgetView {
    /// Number of body rows the view occupies.
    pub fn height(&self) -> u16 {
        match self {
            WidgetView::Loading => 1,
            WidgetView::Empty { .. } => 2,
            WidgetView::Populated(lines) => lines.len().max(1) as u16,
        }
    }
}

/// A dashboard widget.
///
/// Implementors are stateless; everything they render comes from the
/// [`WidgetContext`].
pub trait Widget: Send + Sync {
    /// Layout key this widget renders for.
    fn key(&self) -> WidgetKey;

    /// Builds the view from the widget's query state.
    fn view(&self, ctx: &WidgetContext) -> WidgetView;
}

/// Returns the widget bound to `key`.
pub fn widget_for(key: WidgetKey) -> &'static dyn Widget {
    match key {
        WidgetKey::IdentitySummary => &identity::IdentitySummaryWidget,
        WidgetKey::RecentInputs => &inputs::RecentInputsWidget,
        WidgetKey::RecentSnapshots => &snapshots::RecentSnapshotsWidget,
        WidgetKey::RecentAudit => &audit::RecentAuditWidget,
        WidgetKey::IntegrityStatus => &integrity::IntegrityStatusWidget,
    }
}

/// Builds the view of the widget bound to `key`.
pub fn widget_view(key: WidgetKey, ctx: &WidgetContext) -> WidgetView {
    widget_for(key).view(ctx)
}
