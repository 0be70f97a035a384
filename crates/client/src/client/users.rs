//! Profile client methods

use super::{ApiRequest, MaidEaseClient};
use crate::error::ClientError;
use maidease_core::validation::validate_user_update;
use maidease_core::{UserProfile, UserRole, UserUpdate};

impl MaidEaseClient {
    /// Get the signed-in user
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.execute(ApiRequest::get("/users/me")).await
    }

    /// Update the signed-in user's profile
    ///
    /// `role` decides which fields are sent: provider-only fields are dropped
    /// for customers. The refreshed profile replaces the cached user.
    pub async fn update_me(
        &self,
        changes: &UserUpdate,
        role: UserRole,
    ) -> Result<UserProfile, ClientError> {
        let update = validate_user_update(changes, role)?;
        let request = ApiRequest::put("/users/me").json(&update)?;
        let user: UserProfile = self.execute(request).await?;
        self.session.set_cached_user(&user)?;
        Ok(user)
    }
}
