//! Authentication API client methods

use super::{ApiRequest, MaidEaseClient};
use crate::error::ClientError;
use maidease_core::{LoginForm, RegisterRequest, TokenPair, UserProfile};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl MaidEaseClient {
    /// Create an account
    ///
    /// The returned profile becomes the cached display user; no tokens are
    /// issued, so the session stays logged out until [`Self::login`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        // Fields are public, so check again in case the caller built it by hand
        let request = RegisterRequest::new(
            &request.email,
            &request.full_name,
            request.role,
            &request.password,
            request.phone_number.as_deref(),
        )?;
        let req = ApiRequest::post("/auth/register").json(&request)?;
        let user: UserProfile = self.execute_public(req).await?;
        info!(user_id = %user.id, role = %user.role, "Registered account");
        self.session.set_cached_user(&user)?;
        Ok(user)
    }

    /// Log in with email and password, then fetch and cache the profile
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let form = LoginForm::new(email, password)?;
        let req = ApiRequest::post("/auth/login")
            .multipart([("username", form.username), ("password", form.password)]);
        let tokens: TokenPair = self.execute_public(req).await?;

        self.session.set_tokens(tokens.access_token, tokens.refresh_token)?;

        let user = self.me().await?;
        self.session.set_cached_user(&user)?;
        info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// Sent without a bearer header and outside the recovery pipeline; the
    /// result is not stored.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        let req = ApiRequest::post("/auth/refresh").json(&RefreshRequest { refresh_token })?;
        self.execute_public(req).await
    }

    /// Forget the session locally
    pub fn logout(&self) -> Result<(), ClientError> {
        if let Err(e) = self.session.clear_tokens() {
            warn!("Failed to clear session storage on logout: {e}");
            return Err(e.into());
        }
        info!("Logged out");
        Ok(())
    }
}
