//! Hook invoked when the session cannot be recovered
//!
//! The request pipeline calls [`LoginRedirect::redirect_to_login`] after it has
//! cleared the session because a refresh was impossible or rejected. A browser
//! front end navigates to its login page; a terminal front end tells the user
//! to log in again.

use tracing::warn;

pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// Default hook: only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self) {
        warn!("Session expired; login required");
    }
}

impl<F> LoginRedirect for F
where
    F: Fn() + Send + Sync,
{
    fn redirect_to_login(&self) {
        self();
    }
}
