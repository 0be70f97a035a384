//! MaidEase API client
//!
//! Keeps the access/refresh token pair in a [`SessionStore`], attaches it to
//! every authenticated call and recovers from an expired access token with a
//! single refresh and retry.

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod redirect;
pub mod session;

pub use bootstrap::AuthState;
pub use client::{ApiRequest, MaidEaseClient, MaidEaseClientBuilder, RequestBody};
pub use config::ClientConfig;
pub use error::ClientError;
pub use guard::{GuardOutcome, require_authenticated, require_role};
pub use redirect::{LogRedirect, LoginRedirect};
pub use session::{
    FileStorage, MemoryStorage, Session, SessionStorage, SessionStore, StorageError, Tokens,
};

#[cfg(target_arch = "wasm32")]
pub use session::BrowserStorage;

pub use maidease_core as core;
pub use maidease_core::{
    Booking, BookingCreate, BookingStatus, BookingUpdate, MaidFilter, RegisterRequest, Review,
    ReviewCreate, UserProfile, UserRole, UserUpdate,
};
