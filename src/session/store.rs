use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::base::{AuthApi, Navigator};
use super::callback::{CallbackParams, CallbackResult};
use super::state::Session;
use crate::api::ApiError;
use crate::config::SessionConfig;
use crate::models::{LoginUrl, OAuthExchange, User};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const OAUTH_DENIED_PREFIX: &str = "OAuth authorization failed: ";
pub const CALLBACK_APPLY_FAILED_MESSAGE: &str = "Failed to apply login information";

/// Result descriptor returned by the login/logout actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthOutcome {
    LoggedIn { user: User },
    LoggedOut,
    Failed { error: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, AuthOutcome::Failed { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthOutcome::LoggedIn { user } => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthOutcome::Failed { error } => Some(error),
            _ => None,
        }
    }
}

/// Store actions. Each one decides whether its failures reach `Session::error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CheckStatus,
    OAuthLogin,
    StartOAuthLogin,
    OAuthCallback,
    Logout,
}

impl Action {
    /// Status checks fail quietly: an anonymous visitor and a network error
    /// look the same and neither should show an error.
    pub fn suppress_error_display(self) -> bool {
        matches!(self, Action::CheckStatus)
    }

    fn name(self) -> &'static str {
        match self {
            Action::CheckStatus => "check_status",
            Action::OAuthLogin => "oauth_login",
            Action::StartOAuthLogin => "start_oauth_login",
            Action::OAuthCallback => "oauth_callback",
            Action::Logout => "logout",
        }
    }
}

/// Resets `loading` when an action finishes, however it finishes
/// (including when its future is dropped mid-request).
struct LoadingGuard<'a> {
    state: &'a watch::Sender<Session>,
    armed: bool,
}

impl LoadingGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_modify(|s| s.set_loading(false));
        }
    }
}

/// Owns the session and is the only thing that mutates it.
///
/// Views read [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe)
/// to be notified after every change. Actions never return `Err`; failures come
/// back as [`AuthOutcome::Failed`] and, unless suppressed, in `Session::error`.
///
/// Overlapping actions are not serialised: the response that resolves last wins.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    config: SessionConfig,
    state: watch::Sender<Session>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(Session::default());
        SessionStore {
            api,
            navigator,
            config,
            state,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        self.state.send_modify(|session| {
            f(session);
            debug_assert!(session.is_consistent(), "authenticated session without a user");
        });
    }

    /// Sets `loading`, optionally clears the previous error, and returns the guard
    /// that will reset `loading`.
    fn begin(&self, clear_error: bool) -> LoadingGuard<'_> {
        self.update(|s| {
            s.set_loading(true);
            if clear_error {
                s.set_error(None);
            }
        });
        LoadingGuard {
            state: &self.state,
            armed: true,
        }
    }

    fn report(&self, action: Action, message: &str) {
        if action.suppress_error_display() {
            debug!(
                event_name = "session.action.failed",
                event_domain = "session",
                action = action.name(),
                suppressed = true,
                "{}",
                message
            );
            return;
        }
        warn!(
            event_name = "session.action.failed",
            event_domain = "session",
            action = action.name(),
            suppressed = false,
            "{}",
            message
        );
        let message = message.to_string();
        self.update(|s| s.set_error(Some(message)));
    }

    /// Startup check; same as [`check_auth_status`](Self::check_auth_status).
    pub async fn initialize(&self) -> bool {
        self.check_auth_status().await
    }

    /// Asks the backend who the session cookie belongs to.
    ///
    /// Any failure leaves the session anonymous without setting an error.
    pub async fn check_auth_status(&self) -> bool {
        let _loading = self.begin(true);

        match self.api.current_user().await {
            Ok(user) => {
                info!(
                    event_name = "session.check.completed",
                    event_domain = "session",
                    username = user.username.as_str(),
                    "session belongs to an authenticated user"
                );
                self.update(|s| s.sign_in(user));
                true
            }
            Err(e) => {
                self.report(Action::CheckStatus, &e.to_string());
                self.update(Session::sign_out);
                false
            }
        }
    }

    /// Exchanges an authorization code for a session.
    pub async fn handle_oauth_login(&self, code: &str) -> AuthOutcome {
        let _loading = self.begin(true);

        let result = self.api.exchange_code(code).await.and_then(accept_exchange);
        match result {
            Ok(user) => {
                info!(
                    event_name = "session.login.completed",
                    event_domain = "session",
                    username = user.username.as_str(),
                    "OAuth code exchanged"
                );
                let signed_in = user.clone();
                self.update(|s| s.sign_in(signed_in));
                AuthOutcome::LoggedIn { user }
            }
            Err(e) => {
                let error = e.to_string();
                self.report(Action::OAuthLogin, &error);
                AuthOutcome::Failed { error }
            }
        }
    }

    /// Fetches the authorization URL and hands it to the navigator.
    ///
    /// On success `loading` stays set: the redirect ends this page.
    pub async fn start_oauth_login(&self) -> Option<LoginUrl> {
        let mut loading = self.begin(true);

        match self.api.login_url().await {
            Ok(login) => {
                debug!("Redirecting to OAuth authorization page");
                loading.disarm();
                self.navigator.redirect(&login.authorization_url);
                Some(login)
            }
            Err(e) => {
                self.report(Action::StartOAuthLogin, &e.to_string());
                None
            }
        }
    }

    /// Ends the server session, then drops the local identity.
    ///
    /// If the request fails, the local identity is kept unless
    /// `session.clear_on_failed_logout` is set.
    pub async fn logout(&self) -> AuthOutcome {
        let _loading = self.begin(false);

        match self.api.logout().await {
            Ok(_) => {
                info!(
                    event_name = "session.logout.completed",
                    event_domain = "session",
                    "session ended"
                );
                self.update(|s| {
                    s.sign_out();
                    s.set_error(None);
                });
                AuthOutcome::LoggedOut
            }
            Err(e) => {
                let error = e.to_string();
                self.report(Action::Logout, &error);
                if self.config.clear_on_failed_logout {
                    self.update(Session::sign_out);
                }
                AuthOutcome::Failed { error }
            }
        }
    }

    /// Applies the outcome carried by an `/oauth/callback` URL. No network call.
    ///
    /// Returns `None` and leaves the session untouched for any URL that is not
    /// a callback.
    pub fn handle_oauth_callback(&self, url: &Url) -> Option<AuthOutcome> {
        match CallbackParams::from_url(url).interpret() {
            CallbackResult::NotACallback => {
                debug!("No OAuth callback parameters in URL");
                None
            }
            CallbackResult::Denied(code) => {
                let error = format!("{}{}", OAUTH_DENIED_PREFIX, code);
                self.report(Action::OAuthCallback, &error);
                Some(AuthOutcome::Failed { error })
            }
            CallbackResult::Malformed(reason) => {
                warn!("Rejected OAuth callback parameters: {}", reason);
                self.report(Action::OAuthCallback, CALLBACK_APPLY_FAILED_MESSAGE);
                Some(AuthOutcome::Failed {
                    error: CALLBACK_APPLY_FAILED_MESSAGE.to_string(),
                })
            }
            CallbackResult::Authorized(user) => {
                info!(
                    event_name = "session.callback.applied",
                    event_domain = "session",
                    username = user.username.as_str(),
                    "OAuth callback applied"
                );
                let signed_in = user.clone();
                self.update(|s| {
                    s.sign_in(signed_in);
                    s.set_error(None);
                });
                Some(AuthOutcome::LoggedIn { user })
            }
        }
    }

    pub fn clear_error(&self) {
        self.update(|s| s.set_error(None));
    }
}

/// A 2xx exchange can still carry `success: false`.
fn accept_exchange(exchange: OAuthExchange) -> Result<User, ApiError> {
    match exchange {
        OAuthExchange {
            success: true,
            user: Some(user),
            ..
        } => Ok(user),
        OAuthExchange {
            success: true,
            user: None,
            ..
        } => Err(ApiError::Rejected(LOGIN_FAILED_MESSAGE.to_string())),
        OAuthExchange { message, .. } => Err(ApiError::Rejected(
            message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
        )),
    }
}
