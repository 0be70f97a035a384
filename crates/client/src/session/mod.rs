//! Client-held authentication state
//!
//! The [`SessionStore`] owns the access token, the refresh token and a cached
//! copy of the signed-in user's profile. It keeps them in memory for the
//! request pipeline and mirrors every change into a [`SessionStorage`]
//! back-end. Nothing else reads or writes those keys.
//!
//! The store never inspects tokens. A token is only known to be invalid when
//! the server answers 401.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;

use maidease_core::UserProfile;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key of the cached user profile (JSON)
pub const USER_KEY: &str = "user";

/// Snapshot of the session
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Display cache only; never an authorization source
    pub cached_user: Option<UserProfile>,
}

impl Session {
    /// No tokens means logged out, whatever the cached user says
    pub const fn is_logged_out(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("cached_user", &self.cached_user.as_ref().map(|u| &u.email))
            .finish()
    }
}

/// The token half of a session
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("access_token", &self.access_token.is_some())
            .field("refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// Shared, persisted session state
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// An empty store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(Session::default()),
            storage: Box::new(MemoryStorage::new()),
        }
    }

    /// Rehydrate a store from previously persisted state
    ///
    /// An unreadable user snapshot is discarded. A corrupt back-end is wiped
    /// and the store starts logged out.
    pub fn load(storage: impl SessionStorage + 'static) -> Result<Self, StorageError> {
        let storage: Box<dyn SessionStorage> = Box::new(storage);
        let session = match read_session(storage.as_ref()) {
            Ok(session) => session,
            Err(StorageError::Corrupt(e)) => {
                warn!("Discarding corrupt session storage: {e}");
                for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
                    storage.remove(key)?;
                }
                Session::default()
            }
            Err(e) => return Err(e),
        };

        debug!(
            has_access_token = session.access_token.is_some(),
            has_refresh_token = session.refresh_token.is_some(),
            has_cached_user = session.cached_user.is_some(),
            "Loaded session"
        );

        Ok(Self {
            state: RwLock::new(session),
            storage,
        })
    }

    /// Overwrite both tokens and persist them
    pub fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<(), StorageError> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        {
            let mut state = self.write();
            state.access_token = Some(access_token.clone());
            state.refresh_token = Some(refresh_token.clone());
        }
        self.storage.set(ACCESS_TOKEN_KEY, &access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, &refresh_token)
    }

    /// Current tokens
    pub fn tokens(&self) -> Tokens {
        let state = self.read();
        Tokens {
            access_token: state.access_token.clone(),
            refresh_token: state.refresh_token.clone(),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    /// Drop both tokens and the cached user; safe to call repeatedly
    pub fn clear_tokens(&self) -> Result<(), StorageError> {
        *self.write() = Session::default();

        let mut first_error = None;
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove {key} from session storage: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn cached_user(&self) -> Option<UserProfile> {
        self.read().cached_user.clone()
    }

    /// Replace the display copy of the signed-in user
    pub fn set_cached_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        self.write().cached_user = Some(user.clone());
        let serialized = serde_json::to_string(user)?;
        self.storage.set(USER_KEY, &serialized)
    }

    /// Copy of the whole session
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.read())
            .finish_non_exhaustive()
    }
}

fn read_session(storage: &dyn SessionStorage) -> Result<Session, StorageError> {
    let access_token = storage.get(ACCESS_TOKEN_KEY)?;
    let refresh_token = storage.get(REFRESH_TOKEN_KEY)?;
    let cached_user = match storage.get(USER_KEY)? {
        Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Dropping unreadable cached user: {e}");
                storage.remove(USER_KEY)?;
                None
            }
        },
        None => None,
    };

    Ok(Session {
        access_token,
        refresh_token,
        cached_user,
    })
}
