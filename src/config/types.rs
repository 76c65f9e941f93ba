use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::logging::LoggingConfig;
use super::session::SessionConfig;

pub const CONFIG_FILE: &str = "./config.yaml";
pub const ENV_PREFIX: &str = "BENCHBOARD_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults, then `config.yaml` if present, then `BENCHBOARD_*` variables
/// (`__` separates nested keys, e.g. `BENCHBOARD_API__BASE_URL`).
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Extract a `ConfigV1` out of any figment.
pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Load the layered configuration, exiting the process if it is invalid.
pub fn load_config() -> ConfigV1 {
    match extract(figment()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// The JSON schema of the configuration file.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
