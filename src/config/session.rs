use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Knobs for the session store.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct SessionConfig {
    /// Drop the local identity even when the logout request itself fails.
    /// Off by default: a failed logout leaves the user signed in locally.
    #[serde(default)]
    pub clear_on_failed_logout: bool,
}
