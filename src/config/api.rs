use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where and how the API client talks to the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ApiConfig {
    /// Explicit backend URL. When unset, requests go to `origin` and a
    /// reverse proxy is expected to forward `/api/v1/*`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Origin the application is served from.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Value of an existing `auth_token` session cookie to reuse.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            origin: default_origin(),
            auth_token: None,
        }
    }
}
