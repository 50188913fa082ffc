use crate::{
    abstract_trait::IdentityProviderTrait, config::IdentityConfig,
    domain::responses::ProviderUser, errors::ServiceError,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::error;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the external auth service. Only the account id and email
/// are consumed from its responses.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build identity provider HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn call(&self, path: &str, email: &str, password: &str) -> Result<ProviderUser, ServiceError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                error!("❌ Identity provider request failed: {}", e);
                ServiceError::IdentityProvider(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            return Err(ServiceError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Identity provider rejected request: {} {}", status, body);
            return Err(ServiceError::IdentityProvider(format!(
                "request rejected with status {status}"
            )));
        }

        let payload: AccountPayload = response.json().await.map_err(|e| {
            error!("❌ Failed to parse identity provider response: {}", e);
            ServiceError::IdentityProvider(format!("invalid response: {e}"))
        })?;

        payload.into_provider_user().ok_or_else(|| {
            ServiceError::IdentityProvider("response carried no account".to_string())
        })
    }
}

/// The account may come back at the top level or under `user` depending on the
/// endpoint; the top-level fields win.
#[derive(Debug, Deserialize)]
struct AccountPayload {
    id: Option<String>,
    email: Option<String>,
    user: Option<ProviderUser>,
}

impl AccountPayload {
    fn into_provider_user(self) -> Option<ProviderUser> {
        match (self.id, self.email) {
            (Some(id), Some(email)) => Some(ProviderUser { id, email }),
            _ => self.user,
        }
    }
}

#[async_trait]
impl IdentityProviderTrait for HttpIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, ServiceError> {
        self.call("/auth/v1/signup", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ServiceError> {
        self.call("/auth/v1/token?grant_type=password", email, password)
            .await
    }
}
