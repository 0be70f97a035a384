//! Session bootstrap
//!
//! Run once at startup to decide whether the persisted tokens still describe a
//! signed-in user.

use crate::client::MaidEaseClient;
use maidease_core::{UserProfile, UserRole};
use tracing::{debug, info, warn};

/// Result of restoring the session at startup
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Tokens were accepted; the user comes from the server
    Authenticated(UserProfile),
    /// Nobody is signed in
    ///
    /// `cached_user` is the last known user, kept for display only. It never
    /// grants access.
    Anonymous { cached_user: Option<UserProfile> },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The server-validated user, if any
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous { .. } => None,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user().map(|user| user.role)
    }
}

impl MaidEaseClient {
    /// Restore the session from storage
    ///
    /// With an access token present the profile is fetched through the normal
    /// pipeline, so an expired token gets one refresh attempt first. Any
    /// failure leaves the session cleared.
    pub async fn bootstrap(&self) -> AuthState {
        if self.session().access_token().is_none() {
            debug!("No stored access token, starting anonymous");
            return AuthState::Anonymous {
                cached_user: self.session().cached_user(),
            };
        }

        match self.me().await {
            Ok(user) => {
                if let Err(e) = self.session().set_cached_user(&user) {
                    warn!("Failed to cache user profile: {e}");
                }
                info!(user_id = %user.id, role = %user.role, "Session restored");
                AuthState::Authenticated(user)
            }
            Err(e) => {
                warn!("Stored session is no longer valid: {e}");
                if let Err(e) = self.session().clear_tokens() {
                    warn!("Failed to clear session storage: {e}");
                }
                AuthState::Anonymous { cached_user: None }
            }
        }
    }
}
