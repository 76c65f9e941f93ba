use async_trait::async_trait;

use crate::api::{ApiClient, ApiError};
use crate::models::{Acknowledgement, LoginUrl, OAuthExchange, User};

/// The backend calls the session store depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn current_user(&self) -> Result<User, ApiError>;
    async fn exchange_code(&self, code: &str) -> Result<OAuthExchange, ApiError>;
    async fn login_url(&self) -> Result<LoginUrl, ApiError>;
    async fn logout(&self) -> Result<Acknowledgement, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        ApiClient::current_user(self).await
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthExchange, ApiError> {
        ApiClient::exchange_code(self, code).await
    }

    async fn login_url(&self) -> Result<LoginUrl, ApiError> {
        ApiClient::login_url(self).await
    }

    async fn logout(&self) -> Result<Acknowledgement, ApiError> {
        ApiClient::logout(self).await
    }
}

/// Sends the user agent to another location (the OAuth authorization page).
///
/// A redirect ends the current flow; nothing runs after it on this page.
pub trait Navigator: Send + Sync {
    fn redirect(&self, url: &str);
}
