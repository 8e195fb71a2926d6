//! Toast notifications.
//!
//! The controller emits informational toasts through the [`Notifier`] sink;
//! the TUI shows them in the footer via [`ToastQueue`] until they expire,
//! and CLI commands collect them into a `Vec` and print them.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral information.
    Message,
    Success,
    Error,
}

/// A fire-and-forget notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn message(message: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: ToastKind::Message,
            message: message.into(),
            description,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            description: None,
        }
    }

    pub fn error(message: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            description,
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{}: {}", self.message, desc),
            None => f.write_str(&self.message),
        }
    }
}

/// Sink accepting toasts; no acknowledgement.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

impl Notifier for Vec<Toast> {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}

/// Queue of toasts shown one at a time, each for a fixed duration.
///
/// The head toast's clock starts when it becomes visible, so a burst of
/// toasts is shown in sequence rather than expiring together.
#[derive(Debug)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    current: Option<(Toast, Instant)>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            duration,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.pending.push_back(toast);
    }

    /// Drops the visible toast if it has expired and promotes the next one.
    ///
    /// Returns `true` when what is visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some((_, shown_at)) = &self.current {
            if now.duration_since(*shown_at) >= self.duration {
                self.current = None;
                changed = true;
            }
        }
        if self.current.is_none() {
            if let Some(next) = self.pending.pop_front() {
                self.current = Some((next, now));
                changed = true;
            }
        }
        changed
    }

    /// The toast currently visible, if any.
    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref().map(|(toast, _)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}
