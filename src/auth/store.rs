//! The session store: sole owner of the current [`Session`].
//!
//! Reads take a shared lock and return snapshots; `set`, `update_user` and
//! `clear` take the exclusive lock for the whole change, including the write
//! to the durable medium, so a token is never paired with another login's
//! user.
//!
//! The token and user are persisted together as one JSON value under
//! [`SESSION_KEY`], so the medium holds either a whole session or none.

use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::auth::session::{AccessToken, Session, User};
use crate::auth::storage::{CredentialStorage, MemoryStorage, SESSION_KEY};

#[derive(Serialize)]
struct PersistedSession<'a> {
    token: &'a str,
    user: &'a User,
}

#[derive(Deserialize)]
struct StoredSession {
    token: String,
    user: User,
}

/// Holds the current authentication state.
///
/// A store is created empty (or restored from a durable medium) and handed to
/// the [`HttpClient`](crate::clients::HttpClient) and resource services at
/// construction, usually wrapped in an [`Arc`](std::sync::Arc).
///
/// # Example
///
/// ```rust
/// use storefront_api::{AccessToken, Role, SessionStore, User};
///
/// let store = SessionStore::new();
/// assert!(!store.is_authenticated());
///
/// let user: User = serde_json::from_str(r#"{"id":1,"role":"customer"}"#).unwrap();
/// store.set(AccessToken::new("t1"), user);
/// assert!(store.is_authenticated());
/// assert!(!store.is_admin());
///
/// store.clear();
/// assert!(store.get().is_none());
/// ```
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    storage: Box<dyn CredentialStorage>,
}

impl SessionStore {
    /// Creates an empty store backed by [`MemoryStorage`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            storage: Box::new(MemoryStorage::new()),
        }
    }

    /// Creates a store backed by `storage`, restoring any persisted session.
    ///
    /// A session is restored only when the stored value holds both a token and
    /// a parseable user. Anything else is wiped from the medium.
    #[must_use]
    pub fn with_storage(storage: impl CredentialStorage + 'static) -> Self {
        let restored = storage.get(SESSION_KEY).and_then(|raw| {
            match serde_json::from_str::<StoredSession>(&raw) {
                Ok(stored) => Some(Session::new(AccessToken::new(stored.token), stored.user)),
                Err(e) => {
                    tracing::debug!("Dropping unreadable persisted session: {}", e);
                    wipe(&storage);
                    None
                }
            }
        });

        if let Some(session) = &restored {
            tracing::debug!(user_id = session.user.id, "Restored persisted session");
        }

        Self {
            current: RwLock::new(restored),
            storage: Box::new(storage),
        }
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<AccessToken> {
        self.current.read().as_ref().map(|s| s.token.clone())
    }

    /// Returns the current user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    /// Replaces the token and user together.
    pub fn set(&self, token: AccessToken, user: User) {
        let mut current = self.current.write();
        self.persist(&token, &user);
        *current = Some(Session::new(token, user));
    }

    /// Replaces the user of the current session, keeping its token.
    ///
    /// Returns `false` (and changes nothing) when there is no session.
    pub fn update_user(&self, user: User) -> bool {
        let mut current = self.current.write();
        let Some(session) = current.as_mut() else {
            return false;
        };

        self.persist(&session.token, &user);
        session.user = user;
        true
    }

    /// Removes the session.
    pub fn clear(&self) {
        let mut current = self.current.write();
        wipe(self.storage.as_ref());
        *current = None;
    }

    /// Removes the session only if it still holds `token`.
    ///
    /// Returns `true` if the session was removed. A session started after
    /// `token` was read (e.g., by a new login) is kept.
    pub fn clear_if_current(&self, token: &AccessToken) -> bool {
        let mut current = self.current.write();
        if !matches!(current.as_ref(), Some(session) if session.token == *token) {
            return false;
        }

        wipe(self.storage.as_ref());
        *current = None;
        true
    }

    /// Returns `true` if a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Returns `true` if a session is present and its user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.read().as_ref().is_some_and(Session::is_admin)
    }

    fn persist(&self, token: &AccessToken, user: &User) {
        let stored = PersistedSession {
            token: token.as_ref(),
            user,
        };
        let result = serde_json::to_string(&stored)
            .map_err(Into::into)
            .and_then(|raw| self.storage.set(SESSION_KEY, &raw));

        // A stale session left on the medium would come back on restart
        if let Err(e) = result {
            tracing::warn!("Failed to persist session: {}", e);
            wipe(self.storage.as_ref());
        }
    }
}

fn wipe(storage: &dyn CredentialStorage) {
    let Err(e) = storage.remove(SESSION_KEY) else {
        return;
    };
    tracing::warn!("Failed to remove persisted session: {}", e);

    // An empty value is dropped as unreadable on the next restore
    if let Err(e) = storage.set(SESSION_KEY, "") {
        tracing::warn!("Failed to invalidate persisted session: {}", e);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.current.read())
            .finish_non_exhaustive()
    }
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
};
