//! Durable persistence of the `(Session, token)` pair.

use thiserror::Error;

use assetology_core::{BearerToken, Session};

use crate::storage::{KeyValueStorage, StorageError};

/// Slot holding the serialised [`Session`].
pub const USER_KEY: &str = "user";
/// Slot holding the raw bearer token.
pub const TOKEN_KEY: &str = "access_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("no stored session to update")]
    NoSession,
}

/// A session restored together with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub session: Session,
    pub token: BearerToken,
}

/// Persists the session and its token as one logical unit.
///
/// - `save` writes both slots or leaves neither
/// - `load` never fails: unreadable or partial state is cleared and reported absent
/// - No network IO
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, session: &Session, token: &BearerToken) -> Result<(), StoreError> {
        let user = serde_json::to_string(session)?;
        self.storage.set(USER_KEY, &user)?;

        if let Err(err) = self.storage.set(TOKEN_KEY, token.as_str()) {
            if let Err(rollback) = self.storage.remove(USER_KEY) {
                tracing::error!("failed to roll back user slot after token write failure: {rollback}");
            }
            return Err(err.into());
        }

        Ok(())
    }

    /// Load the persisted pair, self-healing anything that is not a valid pair.
    pub fn load(&self) -> Option<StoredSession> {
        let (user, token) = match (self.storage.get(USER_KEY), self.storage.get(TOKEN_KEY)) {
            (Ok(user), Ok(token)) => (user, token),
            (Err(err), _) | (_, Err(err)) => {
                // Unreadable is not corrupt: keep the slots for the next attempt.
                tracing::warn!("failed to read session slots: {err}");
                return None;
            }
        };

        let (user, token) = match (user, token) {
            (None, None) => return None,
            (Some(user), Some(token)) => (user, token),
            (user, _) => {
                let present = if user.is_some() { USER_KEY } else { TOKEN_KEY };
                tracing::warn!(slot = present, "orphaned session slot found; clearing");
                self.clear_quietly();
                return None;
            }
        };

        let session = match serde_json::from_str::<Session>(&user) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("stored session is corrupted ({err}); clearing");
                self.clear_quietly();
                return None;
            }
        };

        if let Err(err) = session.validate() {
            tracing::warn!("stored session is invalid ({err}); clearing");
            self.clear_quietly();
            return None;
        }

        match BearerToken::new(token) {
            Ok(token) => Some(StoredSession { session, token }),
            Err(err) => {
                tracing::warn!("stored token is invalid ({err}); clearing");
                self.clear_quietly();
                None
            }
        }
    }

    /// Rewrite the `user` slot of an existing pair (profile edits).
    pub fn update_session(&self, session: &Session) -> Result<(), StoreError> {
        if self.storage.get(TOKEN_KEY)?.is_none() {
            return Err(StoreError::NoSession);
        }
        let user = serde_json::to_string(session)?;
        self.storage.set(USER_KEY, &user)?;
        Ok(())
    }

    /// Remove both slots. The token goes first so a failure in between
    /// leaves only an orphan `user`, which `load` treats as absent.
    pub fn clear(&self) -> Result<(), StoreError> {
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token?;
        user?;
        Ok(())
    }

    fn clear_quietly(&self) {
        if let Err(err) = self.clear() {
            tracing::error!("failed to clear session slots: {err}");
        }
    }
}
