use std::sync::Arc;

use http::header::CONTENT_TYPE;
use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::endpoints::{self, ApiRequest};
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::{
    Acknowledgement, BenchmarkPage, BenchmarkResult, Health, LoginUrl, OAuthExchange,
    ParsedBenchmark, TokenVerification, User, UserProfile,
};

/// Fixed prefix between the base URL and every endpoint.
pub const API_PREFIX: &str = "/api/v1";
/// Name of the session cookie the backend sets after OAuth login.
pub const SESSION_COOKIE: &str = "auth_token";

/// Where requests go, decided once when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseUrl {
    /// An explicitly configured backend URL.
    Explicit(String),
    /// The application's own origin; a reverse proxy forwards `/api/v1/*`.
    SameOrigin(String),
}

impl BaseUrl {
    pub fn resolve(config: &ApiConfig) -> Self {
        match config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            Some(url) => BaseUrl::Explicit(url.trim_end_matches('/').to_string()),
            None => BaseUrl::SameOrigin(config.origin.trim().trim_end_matches('/').to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BaseUrl::Explicit(url) | BaseUrl::SameOrigin(url) => url,
        }
    }
}

/// The single gateway for backend calls.
///
/// Every call is exactly one round trip: no retries, no timeouts, no caching.
/// Authentication rides on the cookie jar; no `Authorization` header is ever set.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: BaseUrl,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = BaseUrl::resolve(config);
        let jar = Arc::new(Jar::default());

        if let Some(token) = config.auth_token.as_deref().filter(|t| !t.is_empty()) {
            let origin = Url::parse(base.as_str())
                .map_err(|_| ApiError::InvalidUrl(base.as_str().to_string()))?;
            jar.add_cookie_str(&format!("{}={}; Path=/", SESSION_COOKIE, token), &origin);
            debug!("Seeded session cookie for {}", origin);
        }

        let http = Client::builder().cookie_provider(jar).build()?;

        info!(
            event_name = "api.client.created",
            event_domain = "api",
            base_url = base.as_str(),
            same_origin = matches!(base, BaseUrl::SameOrigin(_)),
            "API client created"
        );
        Ok(ApiClient { http, base })
    }

    /// `base + /api/v1 + endpoint`, parsed.
    pub fn url_for(&self, endpoint: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}{}", self.base.as_str(), API_PREFIX, endpoint);
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// Builds the outgoing HTTP request without sending it.
    pub fn prepare(&self, request: &ApiRequest) -> Result<reqwest::Request, ApiError> {
        let url = self.url_for(&request.endpoint)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        Ok(builder.build()?)
    }

    /// Sends `request` and decodes a 2xx JSON body into `T`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Transport`] if nothing came back, [`ApiError::Status`] for
    /// non-2xx responses, [`ApiError::Decode`] if a 2xx body is not the expected JSON.
    pub async fn request<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let prepared = self.prepare(request)?;
        debug!(
            event_name = "api.request.sent",
            event_domain = "api",
            method = %prepared.method(),
            url = %prepared.url(),
            "sending API request"
        );

        let response = match self.http.execute(prepared).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    event_name = "api.request.failed",
                    event_domain = "api",
                    endpoint = request.endpoint.as_str(),
                    "API request could not be sent: {}",
                    e
                );
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        let body = response.bytes().await;

        if !status.is_success() {
            let raw: &[u8] = body.as_deref().unwrap_or_default();
            let err = ApiError::from_response(status, raw);
            warn!(
                event_name = "api.response.error",
                event_domain = "api",
                endpoint = request.endpoint.as_str(),
                status = status.as_u16(),
                "API request failed: {}",
                err
            );
            return Err(err);
        }

        let body = body?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(&ApiRequest::get(endpoint)).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        data: Option<Value>,
    ) -> Result<T, ApiError> {
        self.request(&ApiRequest::post(endpoint, data)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        data: Option<Value>,
    ) -> Result<T, ApiError> {
        self.request(&ApiRequest::put(endpoint, data)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(&ApiRequest::delete(endpoint)).await
    }

    // -- OAuth / session

    pub async fn login_url(&self) -> Result<LoginUrl, ApiError> {
        self.request(&endpoints::login_url()).await
    }

    pub async fn exchange_code(&self, code: &str) -> Result<OAuthExchange, ApiError> {
        self.request(&endpoints::exchange_code(code)).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(&endpoints::current_user()).await
    }

    pub async fn verify_token(&self) -> Result<TokenVerification, ApiError> {
        self.request(&endpoints::verify_token()).await
    }

    /// The backend clears the session cookie in its response.
    pub async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        self.request(&endpoints::logout()).await
    }

    // -- Benchmarks

    pub async fn parse_benchmark_text(&self, text: &str) -> Result<ParsedBenchmark, ApiError> {
        self.request(&endpoints::parse_benchmark_text(text)).await
    }

    pub async fn submit_benchmark<T: Serialize>(&self, data: &T) -> Result<BenchmarkResult, ApiError> {
        self.request(&endpoints::submit_benchmark(data)?).await
    }

    pub async fn my_results(&self, page: u32, limit: u32) -> Result<BenchmarkPage, ApiError> {
        self.request(&endpoints::my_results(page, limit)).await
    }

    pub async fn benchmark_result(&self, id: i64) -> Result<BenchmarkResult, ApiError> {
        self.request(&endpoints::benchmark_result(id)).await
    }

    pub async fn update_benchmark_result<T: Serialize>(
        &self,
        id: i64,
        data: &T,
    ) -> Result<BenchmarkResult, ApiError> {
        self.request(&endpoints::update_benchmark_result(id, data)?).await
    }

    pub async fn delete_benchmark_result(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.request(&endpoints::delete_benchmark_result(id)).await
    }

    // -- Users / system

    pub async fn user_profile(&self) -> Result<UserProfile, ApiError> {
        self.request(&endpoints::user_profile()).await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.request(&endpoints::health()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenchmarkSubmission;
    use http::Method;
    use serde_json::json;

    fn config(base_url: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: base_url.map(str::to_string),
            origin: "http://localhost:3000/".to_string(),
            auth_token: None,
        }
    }

    #[test]
    fn test_explicit_base_url_wins_over_origin() {
        let base = BaseUrl::resolve(&config(Some("https://bench.example.com/")));
        assert_eq!(base, BaseUrl::Explicit("https://bench.example.com".to_string()));
    }

    #[test]
    fn test_missing_or_blank_base_url_uses_same_origin() {
        assert_eq!(
            BaseUrl::resolve(&config(None)),
            BaseUrl::SameOrigin("http://localhost:3000".to_string())
        );
        assert_eq!(
            BaseUrl::resolve(&config(Some("  "))),
            BaseUrl::SameOrigin("http://localhost:3000".to_string())
        );
    }

    #[test]
    fn test_prepare_submit_benchmark() {
        let client = ApiClient::new(&config(Some("https://bench.example.com"))).unwrap();
        let data = BenchmarkSubmission {
            cpu_model: Some("Apple M2".to_string()),
            cpu_cores: Some(8),
            overall_wall_time: Some(41.5),
            ..Default::default()
        };

        let request = client
            .prepare(&endpoints::submit_benchmark(&data).unwrap())
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://bench.example.com/api/v1/benchmarks/submit"
        );
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.headers().get(http::header::AUTHORIZATION).is_none());

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(sent, serde_json::to_value(&data).unwrap());
    }

    #[test]
    fn test_prepare_get_has_no_body_but_keeps_content_type() {
        let client = ApiClient::new(&config(None)).unwrap();
        let request = client.prepare(&endpoints::my_results(2, 10)).unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/api/v1/benchmarks/my-results?page=2&limit=10"
        );
        assert_eq!(request.method(), Method::GET);
        assert!(request.body().is_none());
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let client = ApiClient::new(&config(Some("not a url"))).unwrap();
        let err = client.prepare(&endpoints::health()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_update_body_is_serialized_verbatim() {
        let client = ApiClient::new(&config(Some("https://bench.example.com"))).unwrap();
        let request = client
            .prepare(&endpoints::update_benchmark_result(5, &json!({"notes": "x"})).unwrap())
            .unwrap();
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.url().path(), "/api/v1/benchmarks/5");
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(br#"{"notes":"x"}"#.as_slice())
        );
    }
}
