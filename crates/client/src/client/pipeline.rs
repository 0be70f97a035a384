//! Authenticated request pipeline
//!
//! Every authenticated call goes through the same stages:
//! attach credentials → dispatch → classify → maybe recover → return.
//!
//! Recovery happens only for a 401. It refreshes the token pair once, rebuilds
//! the request from its [`ApiRequest`] description with the new access token
//! and dispatches it one more time. Whatever that second attempt returns,
//! including another 401, goes back to the caller unchanged. When the refresh
//! is impossible or rejected, the session is cleared, the [`LoginRedirect`]
//! hook fires and the caller gets [`ClientError::SessionExpired`].
//!
//! Refreshes are serialized by a gate. A request that reaches the gate after
//! another one has already rotated the tokens reuses the new access token
//! instead of refreshing again.
//!
//! [`LoginRedirect`]: crate::redirect::LoginRedirect

use super::MaidEaseClient;
use crate::error::ClientError;
use reqwest::header::{self, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, info, warn};

/// Request payload, kept in a form that can be rebuilt for a retry
#[derive(Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `multipart/form-data` text fields
    Multipart(Vec<(String, String)>),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(_) => f.write_str("Json(..)"),
            // Field values may be credentials
            Self::Multipart(fields) => f
                .debug_tuple("Multipart")
                .field(&fields.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Description of one logical API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart form body
    pub fn multipart<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Multipart(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Add query parameters
    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }
}

impl MaidEaseClient {
    /// Run a request through the authenticated pipeline and decode the body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.send_authenticated(&request).await?;
        Ok(response.json().await?)
    }

    /// Run a request without credentials or recovery (login, register, refresh)
    pub async fn execute_public<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(&request, None).await?;
        Ok(response.json().await?)
    }

    async fn send_authenticated(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let sent_with = self.session.access_token();

        match self.dispatch(request, sent_with.as_deref()).await {
            Err(error) if error.is_unauthorized() => {
                debug!(path = %request.path, "Unauthorized, attempting token refresh");
                let access_token = self.recover(sent_with.as_deref()).await?;
                // Second and final attempt; its outcome is returned as is
                self.dispatch(request, Some(&access_token)).await
            }
            other => other,
        }
    }

    /// Obtain a usable access token after `sent_with` was rejected
    async fn recover(&self, sent_with: Option<&str>) -> Result<String, ClientError> {
        let _gate = self.refresh_gate.lock().await;

        let tokens = self.session.tokens();
        if let Some(current) = tokens.access_token.as_deref() {
            if Some(current) != sent_with {
                debug!("Tokens were rotated by a concurrent request, reusing them");
                return Ok(current.to_string());
            }
        } else if sent_with.is_some() {
            // A concurrent request already expired the session and fired the redirect
            debug!("Session was cleared while waiting for refresh");
            return Err(ClientError::SessionExpired(Box::new(
                ClientError::MissingRefreshToken,
            )));
        }

        let Some(refresh_token) = tokens.refresh_token else {
            return Err(self.expire_session(ClientError::MissingRefreshToken));
        };

        match self.refresh_tokens(&refresh_token).await {
            Ok(pair) => {
                self.session.set_tokens(pair.access_token.clone(), pair.refresh_token)?;
                info!("Access token refreshed");
                Ok(pair.access_token)
            }
            Err(error) => Err(self.expire_session(error)),
        }
    }

    /// Tear the session down after a failed recovery
    fn expire_session(&self, cause: ClientError) -> ClientError {
        warn!("Token refresh failed: {cause}");
        if let Err(e) = self.session.clear_tokens() {
            warn!("Failed to clear session storage: {e}");
        }
        self.redirect.redirect_to_login();
        ClientError::SessionExpired(Box::new(cause))
    }

    /// Send one attempt and classify the response
    pub(crate) async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let response = self.build(request, access_token).send().await?;
        let status = response.status();
        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "API response"
        );

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    fn build(&self, request: &ApiRequest, access_token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }

        match &request.body {
            RequestBody::Empty => builder.header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            RequestBody::Json(value) => builder.json(value),
            // reqwest sets the multipart content type with its boundary
            RequestBody::Multipart(fields) => {
                let form = fields
                    .iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                        form.text(name.clone(), value.clone())
                    });
                builder.multipart(form)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_debug_hides_values() {
        let request = ApiRequest::post("/auth/login")
            .multipart([("username", "a@b.co"), ("password", "DemoPass123")]);
        let debug = format!("{request:?}");
        assert!(debug.contains("password"));
        assert!(!debug.contains("DemoPass123"));
    }

    #[test]
    fn test_json_body_is_captured() {
        let request = ApiRequest::put("/bookings/1")
            .json(&serde_json::json!({"status": "accepted"}))
            .unwrap();
        assert!(matches!(request.body, RequestBody::Json(ref v) if v["status"] == "accepted"));
        assert_eq!(request.method, Method::PUT);
    }
}
