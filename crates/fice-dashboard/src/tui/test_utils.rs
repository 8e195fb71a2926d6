//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helpers for creating test terminals, extracting buffer content,
//! asserting colors, and building query fixtures from the seeded database.

#![cfg(test)]

use chrono::{DateTime, TimeZone, Utc};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

use fice_data::{MockDb, Role};

use crate::auth::Viewer;
use crate::fetch::QueryCache;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|&row| row_contains(buffer, row, text))
}

/// All rows joined with newlines.
pub fn buffer_text(buffer: &Buffer) -> String {
    (0..buffer.area().height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Finds the first occurrence of `text` in the specified row and checks
/// if the first character of that text has the specified foreground color.
///
/// Columns are counted in cells, so multi-byte glyphs earlier in the row
/// do not shift the lookup.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    let row_string = row_text(buffer, row);
    let byte_idx = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    let col = row_string[..byte_idx].chars().count();
    assert_fg_color(buffer, col as u16, row, color);
}

/// Fixed reference time for deterministic ages.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

/// The demo user viewer.
pub fn user_viewer() -> Viewer {
    Viewer {
        user_id: "u_user".to_string(),
        role: Some(Role::User),
    }
}

/// The demo admin viewer.
pub fn admin_viewer() -> Viewer {
    Viewer {
        user_id: "u_admin".to_string(),
        role: Some(Role::Admin),
    }
}

/// A query cache resolved against the seeded database at [`fixed_now`].
pub fn seeded_cache(viewer: &Viewer) -> QueryCache {
    let db = MockDb::seeded(fixed_now());
    let mut cache = QueryCache::new();
    cache.fill(&db, viewer);
    cache
}
