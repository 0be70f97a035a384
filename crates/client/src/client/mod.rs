//! MaidEase API client

pub mod auth;
pub mod bookings;
pub mod maids;
pub mod pipeline;
pub mod reviews;
pub mod users;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::redirect::{LogRedirect, LoginRedirect};
use crate::session::SessionStore;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub use pipeline::{ApiRequest, RequestBody};

/// MaidEase API client
///
/// Cheap to clone; clones share the connection pool, the session store and
/// the refresh gate.
#[derive(Clone)]
pub struct MaidEaseClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
    redirect: Arc<dyn LoginRedirect>,
    /// Serializes token refreshes so concurrent 401s share one refresh call
    refresh_gate: Arc<Mutex<()>>,
    timeout: Option<Duration>,
}

impl MaidEaseClient {
    /// Create a new client with default configuration and an in-memory session
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> MaidEaseClientBuilder {
        MaidEaseClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request ceiling, `None` when disabled or unsupported (wasm32)
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The session store shared by every clone of this client
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for MaidEaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaidEaseClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for MaidEaseClient
pub struct MaidEaseClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    session: Option<Arc<SessionStore>>,
    redirect: Option<Arc<dyn LoginRedirect>>,
}

impl Default for MaidEaseClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: ClientConfig::default().timeout(),
            user_agent: None,
            session: None,
            redirect: None,
        }
    }
}

impl MaidEaseClientBuilder {
    /// Take base URL, timeout and user agent from a config
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = config.timeout();
        self.user_agent = Some(config.user_agent.clone());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use an existing session store (defaults to an empty in-memory one)
    pub fn session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Hook called after the session has been torn down
    pub fn on_session_expired(mut self, redirect: impl LoginRedirect + 'static) -> Self {
        self.redirect = Some(Arc::new(redirect));
        self
    }

    /// Build the client
    pub fn build(self) -> Result<MaidEaseClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url}: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        // Timeouts not supported on WASM
        let timeout = self.timeout.filter(|_| cfg!(not(target_arch = "wasm32")));

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| ClientConfig::default().user_agent);
        client_builder = client_builder.user_agent(user_agent);

        let client = client_builder.build()?;

        Ok(MaidEaseClient {
            client,
            base_url,
            session: self.session.unwrap_or_default(),
            redirect: self.redirect.unwrap_or_else(|| Arc::new(LogRedirect)),
            refresh_gate: Arc::new(Mutex::new(())),
            timeout,
        })
    }
}
