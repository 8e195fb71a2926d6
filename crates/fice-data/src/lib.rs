//! # fice-data
//!
//! Data layer for the FICE console: the financial identity domain types,
//! an in-memory mock database seeded with demo records, and a small
//! blocking HTTP client for the TALC/FICE backends.
//!
//! ## Features
//!
//! - Typed domain records (users, sessions, inputs, identities, snapshots,
//!   audit events, integrity checks)
//! - Deterministic identity recalculation when a new input is recorded
//! - Deterministic ledger consistency check over snapshots and audit events
//! - Field-by-field comparison of the two newest identity snapshots
//! - `blocking` (default): `reqwest`-based auth API client
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use fice_data::MockDb;
//!
//! let mut db = MockDb::seeded(Utc::now());
//! let token = db.login("user@devioz.pe", "secret").expect("seed user exists");
//! assert_eq!(token.user_id, "u_user");
//! assert_eq!(db.inputs("u_user").len(), 3);
//! ```

pub mod compare;
pub mod error;
pub mod integrity;
pub mod mock;
pub mod recalc;
pub mod types;

#[cfg(feature = "blocking")]
pub mod http;

pub use compare::{compare_snapshots, FieldDiff};
pub use error::{ApiError, DataError};
pub use mock::{InputOutcome, MockDb, NewInput};
pub use recalc::recalculate;
pub use types::*;
