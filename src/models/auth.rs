use serde::{Deserialize, Serialize};

use super::user::User;

/// Response of `GET /auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginUrl {
    pub authorization_url: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Response of `POST /auth/linuxdo/callback`.
///
/// A 2xx response can still report `success: false`; callers must check it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OAuthExchange {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Identity echoed back by `GET /auth/verify-token`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerifiedUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response of `GET /auth/verify-token`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenVerification {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<VerifiedUser>,
}

/// Generic `{success, message}` body, e.g. from `POST /auth/logout` or deletes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub oauth_configured: Option<bool>,
}
