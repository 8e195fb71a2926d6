//! Widget card: the bordered frame around a widget's view.
//!
//! The top border carries the drag handle, title and subtitle on the left
//! and the collapse indicator on the right. Border color tells the focus
//! state apart: dark gray when idle, cyan when focused, bold yellow while
//! grabbed. A collapsed card is only its frame.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::layout::WidgetState;
use crate::widgets::WidgetView;

/// Drag handle glyph drawn before the title.
pub const DRAG_HANDLE: &str = "\u{283f}";

/// Collapse indicator of an expanded card.
pub const EXPANDED_INDICATOR: &str = "[-]";

/// Collapse indicator of a collapsed card.
pub const COLLAPSED_INDICATOR: &str = "[+]";

const LOADING_TEXT: &str = "Loading\u{2026}";

/// Interaction state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFocus {
    None,
    /// Under the cursor.
    Focused,
    /// Picked up and waiting to be dropped.
    Grabbed,
}

impl CardFocus {
    fn border_style(self) -> Style {
        match self {
            CardFocus::None => Style::default().fg(Color::DarkGray),
            CardFocus::Focused => Style::default().fg(Color::Cyan),
            CardFocus::Grabbed => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Rows the card needs, borders included.
pub fn card_height(state: &WidgetState, view: &WidgetView) -> u16 {
    if state.collapsed {
        2
    } else {
        view.height() + 2
    }
}

/// Draws `view` inside a card for `state` at `area`.
pub fn render_widget_card(
    frame: &mut Frame,
    area: Rect,
    state: &WidgetState,
    view: &WidgetView,
    focus: CardFocus,
) {
    if area.height < 2 || area.width < 8 {
        return;
    }

    let border_style = focus.border_style();
    let handle_style = match focus {
        CardFocus::Grabbed => border_style,
        _ => Style::default().fg(Color::DarkGray),
    };
    let indicator = if state.collapsed {
        COLLAPSED_INDICATOR
    } else {
        EXPANDED_INDICATOR
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title_top(Line::from(vec![
            Span::styled(format!(" {} ", DRAG_HANDLE), handle_style),
            Span::styled(
                state.id.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" \u{00b7} {} ", state.id.subtitle()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .title_top(Line::from(format!(" {} ", indicator)).right_aligned());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if state.collapsed || inner.height == 0 {
        return;
    }

    frame.render_widget(Paragraph::new(body_lines(view)), inner);
}

fn body_lines(view: &WidgetView) -> Vec<Line<'static>> {
    match view {
        WidgetView::Loading => vec![Line::styled(
            LOADING_TEXT,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )],
        WidgetView::Empty { title, description } => vec![
            Line::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(*description, Style::default().fg(Color::DarkGray)),
        ],
        WidgetView::Populated(lines) => lines.clone(),
    }
}
