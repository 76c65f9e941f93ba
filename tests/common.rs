#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use benchboard::api::ApiClient;
use benchboard::config::{ApiConfig, SessionConfig};
use benchboard::session::{Navigator, SessionStore};
use serde_json::{Value, json};

pub const TOKEN: &str = "session-abc";

pub fn api_config(base_url: &str, auth_token: Option<&str>) -> ApiConfig {
    ApiConfig {
        base_url: Some(base_url.to_string()),
        origin: "http://localhost:3000".to_string(),
        auth_token: auth_token.map(str::to_string),
    }
}

pub fn client(base_url: &str, auth_token: Option<&str>) -> ApiClient {
    ApiClient::new(&api_config(base_url, auth_token)).expect("failed to build API client")
}

/// Collects every redirect instead of following it.
#[derive(Default)]
pub struct RecordingNavigator(pub Mutex<Vec<String>>);

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &str) {
        self.0.lock().expect("navigator lock poisoned").push(url.to_string());
    }
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.0.lock().expect("navigator lock poisoned").clone()
    }
}

pub fn store(client: ApiClient, config: SessionConfig) -> (SessionStore, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let store = SessionStore::new(Arc::new(client), navigator.clone(), config);
    (store, navigator)
}

pub fn user_json() -> Value {
    json!({
        "id": 42,
        "username": "alice",
        "user_do_id": "ldo-42",
        "email": "alice@example.com",
        "avatar_url": null
    })
}

pub fn result_json(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 42,
        "username": "alice",
        "cpu_model": "AMD Ryzen 9 7950X",
        "cpu_cores": 16,
        "memory_gb": 64.0,
        "phase1_wall_time": 12.5,
        "phase2_wall_time": 20.25,
        "overall_wall_time": 32.75,
        "raw_result_text": null,
        "throughput_keys_per_sec": 1250000,
        "performance_score": 98.4,
        "ip_address": null,
        "submission_source": "web",
        "is_verified": false,
        "notes": null,
        "submitted_at": "2025-03-01T10:15:00",
        "updated_at": "2025-03-01T10:15:00"
    })
}
