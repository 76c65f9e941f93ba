use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The User struct represents the account currently signed in to the backend.
///
/// A `User` is never patched in place: login replaces it, logout drops it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// External (linux.do) account id. The backend calls it `user_id`.
    #[serde(default, alias = "user_id")]
    pub user_do_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Construct a new User. Empty optional strings are normalised to `None`.
    pub fn new(
        id: i64,
        username: String,
        user_do_id: Option<String>,
        email: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        User {
            id,
            username,
            user_do_id: non_empty(user_do_id),
            email: non_empty(email),
            avatar_url: non_empty(avatar_url),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Profile returned by `GET /users/profile`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub total_results: i64,
    #[serde(default)]
    pub best_result: Option<Value>,
    #[serde(default)]
    pub recent_results: Vec<Value>,
    #[serde(default)]
    pub rank_info: Value,
}
