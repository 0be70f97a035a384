//! Access checks for protected screens and commands

use crate::bootstrap::AuthState;
use maidease_core::UserRole;

/// What to do with a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    RedirectToLogin,
    /// Signed in, but with a role the target does not accept
    RedirectToDashboard,
}

impl GuardOutcome {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Allow any signed-in user
pub fn require_authenticated(state: &AuthState) -> GuardOutcome {
    if state.is_authenticated() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToLogin
    }
}

/// Allow signed-in users whose role is in `allowed`
///
/// Only the server-validated user counts; a cached display user does not.
pub fn require_role(state: &AuthState, allowed: &[UserRole]) -> GuardOutcome {
    match state.role() {
        None => GuardOutcome::RedirectToLogin,
        Some(role) if allowed.contains(&role) => GuardOutcome::Allow,
        Some(_) => GuardOutcome::RedirectToDashboard,
    }
}
