//! Named backend calls expressed as plain request descriptors.
//!
//! Each function only pairs an endpoint with a method (and body); sending and
//! error handling belong to [`ApiClient::request`](super::ApiClient::request).

use http::Method;
use serde::Serialize;
use serde_json::{Value, json};

use super::error::ApiError;

/// An outbound call, built per request and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint, None)
    }

    pub fn post(endpoint: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(Method::POST, endpoint, body)
    }

    pub fn put(endpoint: impl Into<String>, body: Option<Value>) -> Self {
        Self::new(Method::PUT, endpoint, body)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint, None)
    }

    fn new(method: Method, endpoint: impl Into<String>, body: Option<Value>) -> Self {
        ApiRequest {
            endpoint: endpoint.into(),
            method,
            body,
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

fn to_body<T: Serialize>(data: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(data)?)
}

pub fn login_url() -> ApiRequest {
    ApiRequest::get("/auth/login")
}

pub fn exchange_code(code: &str) -> ApiRequest {
    ApiRequest::post("/auth/linuxdo/callback", Some(json!({ "code": code })))
}

pub fn current_user() -> ApiRequest {
    ApiRequest::get("/auth/me")
}

pub fn verify_token() -> ApiRequest {
    ApiRequest::get("/auth/verify-token")
}

pub fn logout() -> ApiRequest {
    ApiRequest::post("/auth/logout", None)
}

pub fn parse_benchmark_text(text: &str) -> ApiRequest {
    ApiRequest::post("/benchmarks/parse", Some(json!({ "text": text })))
}

pub fn submit_benchmark<T: Serialize>(data: &T) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::post("/benchmarks/submit", Some(to_body(data)?)))
}

pub fn my_results(page: u32, limit: u32) -> ApiRequest {
    ApiRequest::get(format!("/benchmarks/my-results?page={}&limit={}", page, limit))
}

pub fn benchmark_result(id: i64) -> ApiRequest {
    ApiRequest::get(format!("/benchmarks/{}", id))
}

pub fn update_benchmark_result<T: Serialize>(id: i64, data: &T) -> Result<ApiRequest, ApiError> {
    Ok(ApiRequest::put(format!("/benchmarks/{}", id), Some(to_body(data)?)))
}

pub fn delete_benchmark_result(id: i64) -> ApiRequest {
    ApiRequest::delete(format!("/benchmarks/{}", id))
}

pub fn user_profile() -> ApiRequest {
    ApiRequest::get("/users/profile")
}

pub fn health() -> ApiRequest {
    ApiRequest::get("/health")
}
