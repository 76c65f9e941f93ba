use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for `POST /benchmarks/submit`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BenchmarkSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase1_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase2_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_result_text: Option<String>,
}

/// Payload for `PUT /benchmarks/{id}`. Only the fields that are set are sent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BenchmarkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase1_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase2_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_wall_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A stored benchmark result as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub cpu_model: Option<String>,
    #[serde(default)]
    pub cpu_cores: Option<u32>,
    #[serde(default)]
    pub memory_gb: Option<f64>,
    #[serde(default)]
    pub phase1_wall_time: Option<f64>,
    #[serde(default)]
    pub phase2_wall_time: Option<f64>,
    #[serde(default)]
    pub overall_wall_time: Option<f64>,
    #[serde(default)]
    pub raw_result_text: Option<String>,
    #[serde(default)]
    pub throughput_keys_per_sec: Option<i64>,
    #[serde(default)]
    pub performance_score: Option<f64>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub submission_source: String,
    pub is_verified: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub submitted_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One page of `GET /benchmarks/my-results`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BenchmarkPage {
    pub results: Vec<BenchmarkResult>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// Response of `POST /benchmarks/parse`; `data` is whatever the parser extracted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ParsedBenchmark {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub message: Option<String>,
}
