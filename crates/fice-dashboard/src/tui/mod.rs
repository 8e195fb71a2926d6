//! TUI module for the FICE dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm that
//! shows the reorderable widget layout for the current viewer.

pub mod app;
pub mod event;
pub(crate) mod test_utils;
pub mod ui;

pub use app::{App, AppOptions};
