use serde::{Deserialize, Serialize};

use crate::config::WhoApiConfig;

/// OAuth2 scope the WHO access-management server expects.
const TOKEN_SCOPE: &str = "icdapi_access";

#[derive(Debug, thiserror::Error)]
pub enum WhoError {
    /// The WHO service answered with a non-success status.
    #[error("WHO API returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// Transport or response-decoding failure (DNS, connect, TLS, or an
    /// upstream body that does not parse as the expected JSON).
    #[error("WHO API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

/// Outbound client for the WHO ICD-11 API.
///
/// Holds the resolved config and a pooled `reqwest::Client`; cloning is cheap
/// and every call is request-scoped. No token is cached between calls.
#[derive(Debug, Clone)]
pub struct WhoClient {
    http: reqwest::Client,
    config: WhoApiConfig,
    language: String,
}

impl WhoClient {
    pub fn new(config: WhoApiConfig, language: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            language: language.into(),
        }
    }

    /// Exchange the client credentials for a bearer token.
    pub async fn request_token(&self) -> Result<TokenResponse, WhoError> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", TOKEN_SCOPE),
            ("grant_type", "client_credentials"),
        ];

        let resp = self
            .http
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WhoError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json::<TokenResponse>().await?)
    }

    /// Fetch one ICD-11 entity, returning the upstream JSON body unchanged.
    ///
    /// Performs the token exchange first; the two calls are sequential and
    /// neither is retried.
    pub async fn lookup(&self, code: &str) -> Result<String, WhoError> {
        let token = self.request_token().await?;

        let url = format!("{}/{}", self.config.api_url, code);
        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", token.access_token))
            .header("Accept", "application/json")
            .header("API-Version", "v2")
            .header("Accept-Language", &self.language)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(WhoError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
