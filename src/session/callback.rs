//! Reading the query string of the `/oauth/callback` redirect.
//!
//! The backend finishes the OAuth dance itself, sets the session cookie, and
//! redirects the browser here with the outcome in the query. The identity in
//! those parameters is taken as-is; it is not signed.

use reqwest::Url;

use crate::models::User;

/// Raw callback parameters. The first occurrence of a key wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CallbackParams {
    pub success: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub user_do_id: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub error: Option<String>,
}

/// What a page load's query string means for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackResult {
    /// The provider or backend reported an error code.
    Denied(String),
    /// `success=true` with a usable identity.
    Authorized(User),
    /// `success=true` but the identity could not be built.
    Malformed(String),
    /// Any other page load.
    NotACallback,
}

impl CallbackParams {
    pub fn from_url(url: &Url) -> Self {
        let mut params = CallbackParams::default();
        for (key, value) in url.query_pairs() {
            let slot = match key.as_ref() {
                "success" => &mut params.success,
                "username" => &mut params.username,
                "user_id" => &mut params.user_id,
                "user_do_id" => &mut params.user_do_id,
                "avatar_url" => &mut params.avatar_url,
                "email" => &mut params.email,
                "error" => &mut params.error,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    pub fn interpret(self) -> CallbackResult {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return CallbackResult::Denied(error);
        }
        if self.success.as_deref() != Some("true") {
            return CallbackResult::NotACallback;
        }

        let id = match self.user_id.as_deref().map(|v| v.trim().parse::<i64>()) {
            Some(Ok(id)) => id,
            Some(Err(_)) => return CallbackResult::Malformed("user_id is not a number".to_string()),
            None => return CallbackResult::Malformed("user_id is missing".to_string()),
        };
        let username = match self.username.filter(|u| !u.is_empty()) {
            Some(username) => username,
            None => return CallbackResult::Malformed("username is missing".to_string()),
        };

        CallbackResult::Authorized(User::new(
            id,
            username,
            self.user_do_id,
            self.email,
            self.avatar_url,
        ))
    }
}
