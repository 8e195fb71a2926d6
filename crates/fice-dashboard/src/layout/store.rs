//! Layout persistence over a [`KeyValueStore`].
//!
//! Loading never fails: a missing, malformed, wrong-version or duplicate-id
//! entry is treated as absent and the caller's fallback is returned. Saving
//! never fails either; storage errors are logged and dropped.

use tracing::{debug, warn};

use crate::layout::model::{DashboardLayout, LAYOUT_VERSION};
use crate::storage::KeyValueStore;

/// Storage key of the persisted layout.
pub const LAYOUT_KEY: &str = "fice.dashboard.layout.v1";

/// Reads and writes the dashboard layout.
#[derive(Debug, Clone)]
pub struct LayoutStore<S> {
    storage: S,
}

impl<S: KeyValueStore> LayoutStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The stored layout, if one exists and is valid.
    pub fn read(&self) -> Option<DashboardLayout> {
        let raw = match self.storage.get(LAYOUT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "layout storage unreadable");
                return None;
            }
        };
        decode(&raw)
    }

    /// The stored layout, or `fallback` when there is no valid one.
    pub fn load(&self, fallback: DashboardLayout) -> DashboardLayout {
        self.read().unwrap_or(fallback)
    }

    /// True when a fresh [`load`](Self::load) would not use its fallback.
    pub fn has_custom(&self) -> bool {
        self.read().is_some()
    }

    /// Writes `layout`, overwriting any prior value.
    pub fn save(&self, layout: &DashboardLayout) {
        let json = match serde_json::to_string(layout) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize layout");
                return;
            }
        };
        match self.storage.set(LAYOUT_KEY, &json) {
            Ok(()) => debug!(widgets = layout.widgets.len(), "layout saved"),
            Err(e) => warn!(error = %e, "failed to save layout"),
        }
    }
}

/// Parses a stored layout, rejecting other versions and duplicate ids.
pub fn decode(raw: &str) -> Option<DashboardLayout> {
    let layout: DashboardLayout = match serde_json::from_str(raw) {
        Ok(layout) => layout,
        Err(e) => {
            debug!(error = %e, "stored layout is not valid JSON");
            return None;
        }
    };
    if layout.version != LAYOUT_VERSION {
        debug!(version = layout.version, "discarding stored layout with other version");
        return None;
    }
    if !layout.has_unique_ids() {
        debug!("discarding stored layout with duplicate widgets");
        return None;
    }
    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::model::{default_layout, default_layout_for_role, WidgetKey};
    use crate::storage::{MemoryStore, StorageError};
    use fice_data::Role;

    fn store() -> LayoutStore<MemoryStore> {
        LayoutStore::new(MemoryStore::new())
    }

    /// A store whose writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Serialize("broken".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Serialize("broken".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Serialize("broken".into()))
        }
    }

    #[test]
    fn test_empty_storage_returns_fallback() {
        let fallback = default_layout_for_role(Some(Role::Admin));
        assert_eq!(store().load(fallback.clone()), fallback);
        assert!(!store().has_custom());
    }

    #[test]
    fn test_round_trip() {
        let store = store();
        let mut layout = default_layout();
        layout.widgets.swap(0, 3);
        layout.widgets[1].collapsed = true;
        layout.widgets.pop();

        store.save(&layout);
        assert_eq!(store.load(default_layout()), layout);
        assert!(store.has_custom());
    }

    #[test]
    fn test_corrupt_entries_return_fallback() {
        let fallback = default_layout_for_role(Some(Role::Admin));
        let cases = [
            "",
            "not json",
            "{}",
            r#"{"version":2,"widgets":[]}"#,
            r#"{"version":1,"widgets":[{"key":"unknown_widget"}]}"#,
            r#"{"version":1,"widgets":[{"key":"recent_audit"},{"key":"recent_audit"}]}"#,
            r#"{"version":1}"#,
        ];
        for raw in cases {
            let store = store();
            store.storage().set(LAYOUT_KEY, raw).unwrap();
            assert_eq!(store.load(fallback.clone()), fallback, "case {raw:?}");
            assert!(!store.has_custom(), "case {raw:?}");
        }
    }

    #[test]
    fn test_empty_widget_list_is_a_valid_custom_layout() {
        let store = store();
        store
            .storage()
            .set(LAYOUT_KEY, r#"{"version":1,"widgets":[]}"#)
            .unwrap();
        assert!(store.load(default_layout()).widgets.is_empty());
    }

    #[test]
    fn test_reads_original_wire_format() {
        let store = store();
        store
            .storage()
            .set(
                LAYOUT_KEY,
                r#"{"version":1,"widgets":[{"key":"recent_inputs","collapsed":true},{"key":"identity_summary"}]}"#,
            )
            .unwrap();
        let layout = store.load(default_layout());
        assert_eq!(layout.ids(), vec![WidgetKey::RecentInputs, WidgetKey::IdentitySummary]);
        assert!(layout.widgets[0].collapsed);
    }

    #[test]
    fn test_storage_failures_do_not_propagate() {
        let store = LayoutStore::new(BrokenStore);
        store.save(&default_layout());
        assert_eq!(store.load(default_layout()), default_layout());
        assert!(!store.has_custom());
    }
}
