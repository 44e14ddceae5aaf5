//! Explicit session context for authenticated API access.
//!
//! The session (Bearer token plus the logged-in user) is an injected
//! dependency of every remote call, never ambient global state. Lifecycle is
//! explicit: [`SessionContext::hydrate`] loads a persisted session from a
//! [`SessionStore`], [`SessionContext::activate`] installs and persists a
//! fresh login, and [`SessionContext::teardown`] clears both the in-memory
//! state and the persisted copy.
//!
//! # Example
//!
//! ```rust
//! use trainify_link::session::{MemorySessionStore, SessionContext, SessionStore};
//! use trainify_link::models::UserInfo;
//!
//! let mut store = MemorySessionStore::new();
//! let session = SessionContext::new();
//!
//! let user = UserInfo {
//!     id: "u1".into(),
//!     name: "Alice".into(),
//!     email: "alice@example.com".into(),
//! };
//! session.activate("tok-123".into(), user, &mut store).unwrap();
//! assert!(session.is_authenticated());
//!
//! session.teardown(&mut store).unwrap();
//! assert!(!session.is_authenticated());
//! assert!(store.get().unwrap().is_none());
//! ```

use crate::error::Result;
use crate::models::UserInfo;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A session as persisted by a [`SessionStore`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    /// Bearer token issued by the management API at login.
    pub token: String,
    /// The user the token belongs to.
    pub user: UserInfo,
}

/// Storage backend for persisting a session across process restarts.
///
/// Implementations range from the in-memory store below (tests, throwaway
/// sessions) to file-backed stores with restrictive permissions (the CLI).
pub trait SessionStore {
    /// Load the persisted session, if any.
    fn get(&self) -> Result<Option<StoredSession>>;

    /// Persist a session, replacing any previous one.
    fn set(&mut self, session: &StoredSession) -> Result<()>;

    /// Remove the persisted session. Succeeds even if none was stored.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory session store. Does not survive restarts.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Option<StoredSession>,
}

impl MemorySessionStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.clone())
    }

    fn set(&mut self, session: &StoredSession) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }
}

/// Shared handle to the current session state.
///
/// Cheap to clone; all clones observe the same state. The context is handed
/// to every API group by [`TrainifyClient`](crate::TrainifyClient) so the
/// Authorization header is attached (or not) in exactly one place.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<StoredSession>>>,
}

impl SessionContext {
    /// Create an unauthenticated context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a persisted session from `store` into this context.
    ///
    /// A missing persisted session leaves the context unauthenticated; that
    /// is not an error.
    pub fn hydrate(&self, store: &dyn SessionStore) -> Result<()> {
        let loaded = store.get()?;
        let mut guard = self.write();
        *guard = loaded;
        Ok(())
    }

    /// Install a fresh login and persist it.
    pub fn activate(
        &self,
        token: String,
        user: UserInfo,
        store: &mut dyn SessionStore,
    ) -> Result<()> {
        let session = StoredSession { token, user };
        store.set(&session)?;
        let mut guard = self.write();
        *guard = Some(session);
        Ok(())
    }

    /// Clear the in-memory session and the persisted copy.
    pub fn teardown(&self, store: &mut dyn SessionStore) -> Result<()> {
        store.clear()?;
        let mut guard = self.write();
        *guard = None;
        Ok(())
    }

    /// Attach `Authorization: Bearer <token>` when a session is active.
    ///
    /// Unauthenticated contexts pass the request through unchanged, which
    /// lets anonymous endpoints (register, login) share the same call path.
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.read().as_ref() {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    /// `true` when a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<UserInfo> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    /// The active token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<StoredSession>> {
        // Lock poisoning only happens if a holder panicked; the session data
        // itself is still coherent, so recover the guard.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<StoredSession>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[test]
    fn hydrate_from_empty_store_stays_unauthenticated() {
        let store = MemorySessionStore::new();
        let ctx = SessionContext::new();
        ctx.hydrate(&store).unwrap();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.token(), None);
    }

    #[test]
    fn activate_persists_and_authenticates() {
        let mut store = MemorySessionStore::new();
        let ctx = SessionContext::new();
        ctx.activate("tok".into(), user(), &mut store).unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token().as_deref(), Some("tok"));
        assert_eq!(store.get().unwrap().unwrap().token, "tok");

        // A second context hydrated from the same store sees the session.
        let other = SessionContext::new();
        other.hydrate(&store).unwrap();
        assert_eq!(other.user().unwrap().name, "Alice");
    }

    #[test]
    fn teardown_clears_memory_and_store() {
        let mut store = MemorySessionStore::new();
        let ctx = SessionContext::new();
        ctx.activate("tok".into(), user(), &mut store).unwrap();

        ctx.teardown(&mut store).unwrap();
        assert!(!ctx.is_authenticated());
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn clones_share_state() {
        let mut store = MemorySessionStore::new();
        let ctx = SessionContext::new();
        let clone = ctx.clone();
        ctx.activate("tok".into(), user(), &mut store).unwrap();
        assert!(clone.is_authenticated());
    }
}
