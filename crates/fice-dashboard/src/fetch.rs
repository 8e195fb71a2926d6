//! Per-widget data queries against the shared mock database.
//!
//! Each widget binds to exactly one query. A fetch round spawns one task per
//! query; each task sleeps the configured latency, runs its query, and sends
//! a [`DataMessage`] tagged with the round's generation. [`QueryCache`]
//! drops messages from older rounds, so a slow answer for the previous
//! viewer never overwrites data for the current one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use fice_data::{
    AuditEvent, DataError, FinancialIdentity, FinancialIdentitySnapshot, FinancialProfileInput,
    IntegrityCheck, MockDb,
};

use crate::auth::Viewer;
use crate::layout::WidgetKey;

/// Mock database shared between the UI task and query tasks.
pub type SharedDb = Arc<Mutex<MockDb>>;

/// Resolved data of one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Identity(FinancialIdentity),
    Inputs(Vec<FinancialProfileInput>),
    Snapshots(Vec<FinancialIdentitySnapshot>),
    Audit(Vec<AuditEvent>),
    Integrity(Vec<IntegrityCheck>),
}

/// Lifecycle of one query within the current generation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Pending,
    Ready(QueryData),
    Failed(String),
}

/// A query answer sent from a fetch task to the UI task.
#[derive(Debug, Clone)]
pub struct DataMessage {
    pub generation: u64,
    pub key: WidgetKey,
    pub result: Result<QueryData, DataError>,
}

/// Runs the query bound to `key` for `viewer`.
///
/// # Errors
///
/// Only the identity query fails, with [`DataError::IdentityNotFound`]
/// when the viewer owns no identity.
pub fn run_query(db: &MockDb, key: WidgetKey, viewer: &Viewer) -> Result<QueryData, DataError> {
    let data = match key {
        WidgetKey::IdentitySummary => QueryData::Identity(db.financial_identity(&viewer.user_id)?),
        WidgetKey::RecentInputs => QueryData::Inputs(db.inputs(&viewer.user_id)),
        WidgetKey::RecentSnapshots => QueryData::Snapshots(db.snapshots(&viewer.user_id)),
        WidgetKey::RecentAudit => QueryData::Audit(db.audit_events(viewer.audit_scope())),
        WidgetKey::IntegrityStatus => QueryData::Integrity(db.integrity_checks()),
    };
    Ok(data)
}

/// Spawns query tasks that report over an mpsc channel.
#[derive(Debug, Clone)]
pub struct Fetcher {
    db: SharedDb,
    latency: Duration,
    tx: mpsc::Sender<DataMessage>,
}

impl Fetcher {
    pub fn new(db: SharedDb, latency: Duration, tx: mpsc::Sender<DataMessage>) -> Self {
        Self { db, latency, tx }
    }

    pub fn db(&self) -> &SharedDb {
        &self.db
    }

    /// Spawns one task per query, all tagged with `generation`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_all(&self, generation: u64, viewer: &Viewer) {
        debug!(generation, user = %viewer.user_id, "fetching widget data");
        for key in WidgetKey::ALL {
            let db = Arc::clone(&self.db);
            let tx = self.tx.clone();
            let viewer = viewer.clone();
            let latency = self.latency;
            tokio::spawn(async move {
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }
                let result = {
                    let db = db.lock().unwrap_or_else(PoisonError::into_inner);
                    run_query(&db, key, &viewer)
                };
                // The receiver is gone once the app has quit.
                let _ = tx
                    .send(DataMessage {
                        generation,
                        key,
                        result,
                    })
                    .await;
            });
        }
    }
}

/// Query states for the current generation.
#[derive(Debug, Default)]
pub struct QueryCache {
    generation: u64,
    states: HashMap<WidgetKey, QueryState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new round: bumps the generation and marks every query
    /// pending. Returns the new generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.states.clear();
        self.generation
    }

    /// Applies an answer. Answers from another generation are dropped and
    /// `false` is returned.
    pub fn apply(&mut self, msg: DataMessage) -> bool {
        if msg.generation != self.generation {
            trace!(
                stale = msg.generation,
                current = self.generation,
                key = %msg.key,
                "dropping stale query result"
            );
            return false;
        }
        let state = match msg.result {
            Ok(data) => QueryState::Ready(data),
            Err(e) => QueryState::Failed(e.to_string()),
        };
        self.states.insert(msg.key, state);
        true
    }

    /// Current state of the query bound to `key`.
    pub fn state(&self, key: WidgetKey) -> &QueryState {
        const PENDING: &QueryState = &QueryState::Pending;
        self.states.get(&key).unwrap_or(PENDING)
    }

    /// Resolved data of `key`, if any.
    pub fn data(&self, key: WidgetKey) -> Option<&QueryData> {
        match self.state(key) {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Stores results computed synchronously, e.g. in tests or snapshots
    /// rendered without a runtime.
    pub fn fill(&mut self, db: &MockDb, viewer: &Viewer) {
        let generation = self.begin();
        for key in WidgetKey::ALL {
            self.apply(DataMessage {
                generation,
                key,
                result: run_query(db, key, viewer),
            });
        }
    }
}
