//! Widget context providing shared state for widget rendering.
//!
//! The [`WidgetContext`] carries everything a widget may need to build its
//! view: query results for the current generation, the current time for
//! relative ages, and the viewer's role. It is passed by reference to each
//! widget.

use chrono::{DateTime, Utc};
use fice_data::Role;

use crate::fetch::{QueryCache, QueryState};
use crate::layout::WidgetKey;

/// Shared context passed to widgets during rendering.
///
/// All data is borrowed so building a context per frame is free.
#[derive(Debug)]
pub struct WidgetContext<'a> {
    /// Query states of the current fetch generation.
    pub queries: &'a QueryCache,

    /// Reference time for relative ages.
    pub now: DateTime<Utc>,

    /// Role of the viewer, `None` when anonymous.
    pub role: Option<Role>,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context at the current time with no role.
    pub fn new(queries: &'a QueryCache) -> Self {
        Self {
            queries,
            now: Utc::now(),
            role: None,
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    /// State of the query bound to `key`.
    pub fn query(&self, key: WidgetKey) -> &'a QueryState {
        self.queries.state(key)
    }
}
