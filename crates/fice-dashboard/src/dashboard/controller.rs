//! Dashboard controller: owns the active layout and applies every mutation.
//!
//! All operations are synchronous and persist immediately. Once a custom
//! layout exists in storage it wins over role defaults until reset.

use tracing::debug;

use fice_data::Role;

use crate::layout::model::{default_layout, default_layout_for_role, DashboardLayout, WidgetKey};
use crate::layout::reorder::{array_move, move_indices};
use crate::layout::store::LayoutStore;
use crate::notify::{Notifier, Toast};
use crate::storage::KeyValueStore;

pub const REMOVED_MESSAGE: &str = "Widget removed";
pub const RESET_MESSAGE: &str = "Layout reset";

pub struct DashboardController<S> {
    store: LayoutStore<S>,
    layout: DashboardLayout,
    role: Option<Role>,
}

impl<S: KeyValueStore> DashboardController<S> {
    /// Loads the stored layout, falling back to the role default.
    pub fn new(role: Option<Role>, storage: S) -> Self {
        let store = LayoutStore::new(storage);
        let layout = store.load(default_layout_for_role(role));
        Self {
            store,
            layout,
            role,
        }
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn store(&self) -> &LayoutStore<S> {
        &self.store
    }

    /// Reacts to a role change. Without a stored custom layout the new
    /// role's default replaces the active layout.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
        if !self.store.has_custom() {
            self.layout = default_layout_for_role(role);
            debug!(?role, "applied role default layout");
        }
    }

    /// Completes a drag: moves `active` onto `over`'s position and saves.
    ///
    /// Returns `false` (and does not save) for a no-op drag.
    pub fn drag_end(&mut self, active: WidgetKey, over: WidgetKey) -> bool {
        let Some((from, to)) = move_indices(&self.layout.ids(), &active, &over) else {
            return false;
        };
        array_move(&mut self.layout.widgets, from, to);
        self.store.save(&self.layout);
        debug!(%active, %over, "widget moved");
        true
    }

    /// Flips the collapsed flag of `id` and saves.
    ///
    /// Returns `false` (and does not save) when `id` is not in the layout.
    pub fn toggle_collapse(&mut self, id: WidgetKey) -> bool {
        let Some(widget) = self.layout.widgets.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        widget.collapsed = !widget.collapsed;
        self.store.save(&self.layout);
        true
    }

    /// Removes `id`, saves, and notifies which widget was removed.
    ///
    /// Returns `false` (no save, no toast) when `id` is not in the layout.
    pub fn remove(&mut self, id: WidgetKey, notifier: &mut impl Notifier) -> bool {
        let Some(index) = self.layout.position(id) else {
            return false;
        };
        self.layout.widgets.remove(index);
        self.store.save(&self.layout);
        notifier.notify(Toast::message(REMOVED_MESSAGE, Some(id.to_string())));
        true
    }

    /// Restores the canonical default (regardless of role), saves it, and
    /// notifies once.
    pub fn reset(&mut self, notifier: &mut impl Notifier) {
        self.layout = default_layout();
        self.store.save(&self.layout);
        notifier.notify(Toast::success(RESET_MESSAGE));
    }
}
