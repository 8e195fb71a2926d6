//! FICE Dashboard library
//!
//! This crate provides the terminal console for the FICE financial identity
//! demo: a persisted, reorderable widget layout, the widgets that render
//! mock backend data, and the session and configuration plumbing shared by
//! the `fice` binary.
//!
//! The data itself (domain types, mock database, HTTP client) lives in the
//! `fice-data` crate.

/// Auth session persisted across runs, and the viewer derived from it.
pub mod auth;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Dashboard controller: the layout operations the UI triggers.
pub mod dashboard;

/// Widget data queries, fetch tasks and the generation-guarded cache.
pub mod fetch;

/// Human-readable time formatting.
pub mod format;

/// Layout model, persistence and the reorder engine.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Toast notifications.
pub mod notify;

/// Key-value storage backends.
pub mod storage;

/// Plain-text tables for the `list` command.
pub mod tables;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget system for composable dashboard UI components.
pub mod widgets;
