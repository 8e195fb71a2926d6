//! Auth session: who is viewing the dashboard.
//!
//! The session is created at login, persisted under [`AUTH_KEY`], and
//! removed at logout. Consumers never read it ambiently; they receive a
//! [`Viewer`] derived from the current [`AuthState`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use fice_data::http::{auth_api, ApiClient};
use fice_data::{ApiError, DataError, MockDb, Role};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the persisted session.
pub const AUTH_KEY: &str = "fice.auth";

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub role: Role,
}

/// Either nobody is logged in or a session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(AuthSession),
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(session) => Some(session.role),
        }
    }

    /// The session, or [`AuthError::NotLoggedIn`] when anonymous.
    pub fn require_session(&self) -> Result<&AuthSession, AuthError> {
        match self {
            AuthState::Anonymous => Err(AuthError::NotLoggedIn),
            AuthState::Authenticated(session) => Ok(session),
        }
    }

    /// The session if it carries the admin role.
    pub fn require_admin(&self) -> Result<&AuthSession, AuthError> {
        let session = self.require_session()?;
        match session.role {
            Role::Admin => Ok(session),
            Role::User => Err(AuthError::AdminRequired),
        }
    }

    /// The viewer for data queries; anonymous viewers see `fallback_user`
    /// with no role.
    pub fn viewer(&self, fallback_user: &str) -> Viewer {
        match self {
            AuthState::Anonymous => Viewer {
                user_id: fallback_user.to_string(),
                role: None,
            },
            AuthState::Authenticated(session) => Viewer {
                user_id: session.user_id.clone(),
                role: Some(session.role),
            },
        }
    }
}

/// Identity and role the dashboard renders for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub role: Option<Role>,
}

impl Viewer {
    /// Audit scope: admins see every event, everyone else only their own.
    pub fn audit_scope(&self) -> Option<&str> {
        match self.role {
            Some(Role::Admin) => None,
            _ => Some(self.user_id.as_str()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to persist session")]
    Storage(#[from] StorageError),

    /// The remote login answered without a token or user id.
    #[error("Login response is missing {0}")]
    IncompleteResponse(&'static str),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Admin role required")]
    AdminRequired,
}

/// Reads and writes the persisted session.
#[derive(Debug, Clone)]
pub struct AuthStore<S> {
    storage: S,
}

impl<S: KeyValueStore> AuthStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current state. A missing or unreadable entry is anonymous.
    pub fn state(&self) -> AuthState {
        let raw = match self.storage.get(AUTH_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AuthState::Anonymous,
            Err(e) => {
                warn!(error = %e, "auth storage unreadable");
                return AuthState::Anonymous;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => AuthState::Authenticated(session),
            Err(e) => {
                debug!(error = %e, "ignoring corrupt auth entry");
                AuthState::Anonymous
            }
        }
    }

    fn write(&self, session: &AuthSession) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.set(AUTH_KEY, &json)?;
        Ok(())
    }

    /// Logs in against the mock database and persists the session.
    pub fn login(
        &self,
        db: &mut MockDb,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let token = db.login(email, password)?;
        let session = AuthSession {
            token: token.token,
            user_id: token.user_id,
            role: token.role,
        };
        self.write(&session)?;
        debug!(user = %session.user_id, role = %session.role, "logged in");
        Ok(session)
    }

    /// Logs in against the TALC backend and persists the session.
    ///
    /// A response without a role is treated as a regular user.
    pub fn login_remote(
        &self,
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let res = auth_api::login(client, email, password)?;
        let session = AuthSession {
            token: res.token.ok_or(AuthError::IncompleteResponse("token"))?,
            user_id: res.user_id.ok_or(AuthError::IncompleteResponse("user_id"))?,
            role: res.role.unwrap_or(Role::User),
        };
        self.write(&session)?;
        Ok(session)
    }

    /// Records the logout and removes the session. Anonymous is a no-op.
    pub fn logout(&self, db: &mut MockDb) -> Result<(), AuthError> {
        if let AuthState::Authenticated(session) = self.state() {
            db.logout(&session.user_id);
            debug!(user = %session.user_id, "logged out");
        }
        self.storage.remove(AUTH_KEY)?;
        Ok(())
    }

    /// Demo helper: rewrites the role of the current session.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotLoggedIn`] when anonymous.
    pub fn switch_role(&self, role: Role) -> Result<AuthSession, AuthError> {
        match self.state() {
            AuthState::Anonymous => Err(AuthError::NotLoggedIn),
            AuthState::Authenticated(mut session) => {
                session.role = role;
                self.write(&session)?;
                Ok(session)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use fice_data::AuditAction;

    fn setup() -> (AuthStore<MemoryStore>, MockDb) {
        (AuthStore::new(MemoryStore::new()), MockDb::seeded(Utc::now()))
    }

    #[test]
    fn starts_anonymous() {
        let (auth, _) = setup();
        assert_eq!(auth.state(), AuthState::Anonymous);
        let viewer = auth.state().viewer("u_user");
        assert_eq!(viewer.user_id, "u_user");
        assert_eq!(viewer.role, None);
        assert_eq!(viewer.audit_scope(), Some("u_user"));
    }

    #[test]
    fn login_persists_session() {
        let (auth, mut db) = setup();
        let session = auth.login(&mut db, "admin@devioz.pe", "pw").unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(auth.state(), AuthState::Authenticated(session.clone()));

        let viewer = auth.state().viewer("u_user");
        assert_eq!(viewer.user_id, "u_admin");
        assert_eq!(viewer.audit_scope(), None);
    }

    #[test]
    fn failed_login_leaves_state_untouched() {
        let (auth, mut db) = setup();
        let err = auth.login(&mut db, "ghost@devioz.pe", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Data(DataError::InvalidCredentials)));
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[test]
    fn logout_records_event_and_clears() {
        let (auth, mut db) = setup();
        auth.login(&mut db, "user@devioz.pe", "pw").unwrap();
        auth.logout(&mut db).unwrap();
        assert_eq!(auth.state(), AuthState::Anonymous);
        assert_eq!(db.audit_events(Some("u_user"))[0].action, AuditAction::Logout);
    }

    #[test]
    fn switch_role_requires_session() {
        let (auth, mut db) = setup();
        assert!(matches!(auth.switch_role(Role::Admin), Err(AuthError::NotLoggedIn)));

        auth.login(&mut db, "user@devioz.pe", "pw").unwrap();
        let session = auth.switch_role(Role::Admin).unwrap();
        assert_eq!(session.user_id, "u_user");
        assert_eq!(auth.state().role(), Some(Role::Admin));
    }

    #[test]
    fn corrupt_entry_reads_as_anonymous() {
        let (auth, _) = setup();
        auth.storage.set(AUTH_KEY, "{broken").unwrap();
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[test]
    fn entry_uses_plain_json_fields() {
        let (auth, _) = setup();
        auth.storage
            .set(AUTH_KEY, r#"{"token":"tk","user_id":"u_user","role":"User"}"#)
            .unwrap();
        assert_eq!(auth.state().role(), Some(Role::User));
    }

    #[test]
    fn remote_login_without_backend_fails_cleanly() {
        let (auth, _) = setup();
        let client = ApiClient::new("", "");
        let err = auth.login_remote(&client, "user@devioz.pe", "pw").unwrap_err();
        assert!(matches!(err, AuthError::Api(ApiError::MissingBaseUrl(_))));
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[test]
    fn require_session_and_admin() {
        let (auth, mut db) = setup();
        assert!(matches!(
            auth.state().require_session(),
            Err(AuthError::NotLoggedIn)
        ));
        assert!(matches!(
            auth.state().require_admin(),
            Err(AuthError::NotLoggedIn)
        ));

        auth.login(&mut db, "user@devioz.pe", "pw").unwrap();
        assert_eq!(auth.state().require_session().unwrap().user_id, "u_user");
        assert!(matches!(
            auth.state().require_admin(),
            Err(AuthError::AdminRequired)
        ));

        auth.switch_role(Role::Admin).unwrap();
        assert_eq!(auth.state().require_admin().unwrap().role, Role::Admin);
    }
}
