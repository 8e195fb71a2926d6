//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! Layout operations run synchronously on the UI task; widget data arrives
//! from fetch tasks over an mpsc channel and is filtered by generation.

use std::io::{self, stdout};
use std::sync::PoisonError;
use std::time::{Duration, Instant};

use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use fice_data::{IntegrityStatus, Role};

use crate::auth::{AuthState, AuthStore, Viewer};
use crate::config::{Config, ConfigError};
use crate::dashboard::DashboardController;
use crate::fetch::{DataMessage, Fetcher, QueryCache, SharedDb};
use crate::layout::WidgetKey;
use crate::notify::{Toast, ToastQueue};
use crate::storage::KeyValueStore;
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::widgets::CardFocus;

/// Capacity of the query result channel.
const DATA_CHANNEL_CAPACITY: usize = 64;

/// Runtime knobs of the TUI.
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub tick_rate: Duration,
    pub latency: Duration,
    pub toast_duration: Duration,
    /// User shown to anonymous viewers.
    pub fallback_user: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            latency: Duration::from_millis(450),
            toast_duration: Duration::from_secs(2),
            fallback_user: "u_user".to_string(),
        }
    }
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            tick_rate: config.tui.tick_rate()?,
            latency: config.data.latency()?,
            toast_duration: config.tui.toast_duration()?,
            fallback_user: config.data.fallback_user.clone(),
        })
    }
}

/// Main application state for the TUI.
pub struct App<S> {
    pub controller: DashboardController<S>,
    pub auth: AuthStore<S>,
    pub viewer: Viewer,
    pub db: SharedDb,
    pub queries: QueryCache,
    pub toasts: ToastQueue,
    /// Index of the focused card in the layout.
    pub cursor: usize,
    /// Widget picked up for a move, if any.
    pub grabbed: Option<WidgetKey>,
    pub should_quit: bool,
    options: AppOptions,
    fetcher: Option<Fetcher>,
}

impl<S: KeyValueStore + Clone> App<S> {
    /// Builds the app for whoever is logged in according to `storage`.
    pub fn new(storage: S, db: SharedDb, options: AppOptions) -> Self {
        let auth = AuthStore::new(storage.clone());
        let viewer = auth.state().viewer(&options.fallback_user);
        let controller = DashboardController::new(viewer.role, storage);
        Self {
            controller,
            auth,
            viewer,
            db,
            queries: QueryCache::new(),
            toasts: ToastQueue::new(options.toast_duration),
            cursor: 0,
            grabbed: None,
            should_quit: false,
            options,
            fetcher: None,
        }
    }

    // -----------------------------------------------------------------------
    // Cursor and grab
    // -----------------------------------------------------------------------

    /// Key of the widget under the cursor.
    pub fn focused(&self) -> Option<WidgetKey> {
        self.controller
            .layout()
            .widgets
            .get(self.cursor)
            .map(|w| w.id)
    }

    /// Focus state of `key` for card rendering.
    pub fn card_focus(&self, key: WidgetKey) -> CardFocus {
        if self.grabbed == Some(key) {
            CardFocus::Grabbed
        } else if self.focused() == Some(key) {
            CardFocus::Focused
        } else {
            CardFocus::None
        }
    }

    pub fn select_next(&mut self) {
        let last = self.controller.layout().widgets.len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let last = self.controller.layout().widgets.len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }

    /// Grabs the focused widget, or drops the grabbed one onto it.
    ///
    /// Dropping a widget onto itself just releases it.
    pub fn grab_or_drop(&mut self) {
        let Some(over) = self.focused() else {
            return;
        };
        match self.grabbed.take() {
            None => self.grabbed = Some(over),
            Some(active) => {
                if self.controller.drag_end(active, over) {
                    if let Some(pos) = self.controller.layout().position(active) {
                        self.cursor = pos;
                    }
                }
            }
        }
    }

    pub fn cancel_grab(&mut self) {
        self.grabbed = None;
    }

    // -----------------------------------------------------------------------
    // Layout mutations
    // -----------------------------------------------------------------------

    pub fn toggle_collapse_focused(&mut self) {
        if let Some(key) = self.focused() {
            self.controller.toggle_collapse(key);
        }
    }

    pub fn remove_focused(&mut self) {
        let Some(key) = self.focused() else {
            return;
        };
        if self.controller.remove(key, &mut self.toasts) && self.grabbed == Some(key) {
            self.grabbed = None;
        }
        self.clamp_cursor();
    }

    pub fn reset_layout(&mut self) {
        self.grabbed = None;
        self.controller.reset(&mut self.toasts);
        self.clamp_cursor();
    }

    // -----------------------------------------------------------------------
    // Data
    // -----------------------------------------------------------------------

    /// Starts a new fetch generation for the current viewer.
    ///
    /// Without a running fetcher (before [`App::run`], or in tests) the
    /// queries resolve synchronously.
    pub fn refetch(&mut self) {
        match &self.fetcher {
            Some(fetcher) => {
                let generation = self.queries.begin();
                fetcher.spawn_all(generation, &self.viewer);
            }
            None => {
                let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
                self.queries.fill(&db, &self.viewer);
            }
        }
    }

    /// Applies a fetch answer; returns whether it was current.
    pub fn apply_data(&mut self, msg: DataMessage) -> bool {
        self.queries.apply(msg)
    }

    /// Demo role switcher: toggles between admin and user, persists the
    /// role when logged in, re-derives the layout and refetches.
    pub fn switch_role(&mut self) {
        let next = self.viewer.role.map_or(Role::Admin, Role::toggled);
        if let AuthState::Authenticated(_) = self.auth.state() {
            if let Err(e) = self.auth.switch_role(next) {
                warn!(error = %e, "failed to persist role");
                self.toasts
                    .push(Toast::error("Role switch failed", Some(e.to_string())));
                return;
            }
        }
        self.viewer.role = Some(next);
        self.controller.set_role(Some(next));
        self.grabbed = None;
        self.clamp_cursor();
        debug!(role = %next, "role switched");
        self.toasts
            .push(Toast::message("Role switched", Some(next.to_string())));
        self.refetch();
    }

    /// Runs an integrity check against the shared database and refetches.
    pub fn run_integrity(&mut self) {
        let check = {
            let mut db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
            db.run_integrity_check()
        };
        let toast = match check.status {
            IntegrityStatus::Ok => Toast::success(format!("Integrity {}", check.status)),
            IntegrityStatus::Warn => Toast::error(
                format!("Integrity {}", check.status),
                Some(check.detail.clone()),
            ),
        };
        self.toasts.push(toast);
        self.refetch();
    }

    /// Applies an action returned by key handling.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::SwitchRole => self.switch_role(),
            Action::RunIntegrity => self.run_integrity(),
            Action::Refetch => self.refetch(),
        }
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Restore the terminal before the default hook prints the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.options.tick_rate);
        let mut reader = EventStream::new();

        let (data_tx, mut data_rx) = mpsc::channel::<DataMessage>(DATA_CHANNEL_CAPACITY);
        self.fetcher = Some(Fetcher::new(
            self.db.clone(),
            self.options.latency,
            data_tx,
        ));
        self.refetch();
        self.toasts.tick(Instant::now());
        terminal.draw(|frame| render_dashboard(frame, self))?;

        loop {
            // Drain query answers before rendering
            let mut changed = false;
            while let Ok(msg) = data_rx.try_recv() {
                changed |= self.apply_data(msg);
            }

            let event = event_handler.next(&mut reader).await?;
            let should_render = match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.apply_action(action);
                    if self.should_quit {
                        return Ok(());
                    }
                    self.toasts.tick(Instant::now());
                    true
                }
                Event::Tick => self.toasts.tick(Instant::now()) || changed,
                Event::Resize(_, _) => true,
            };

            if should_render || changed {
                terminal.draw(|frame| render_dashboard(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}
