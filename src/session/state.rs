use serde::Serialize;

use crate::models::User;

/// Snapshot of who is signed in.
///
/// Identity fields only change together, so `is_authenticated` implies a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    is_authenticated: bool,
    user: Option<User>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Authenticated and carrying a user.
    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated && self.user.is_some()
    }

    pub fn is_consistent(&self) -> bool {
        !self.is_authenticated || self.user.is_some()
    }

    pub(crate) fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
    }

    pub(crate) fn sign_out(&mut self) {
        self.is_authenticated = false;
        self.user = None;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}
