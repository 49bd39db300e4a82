use std::env;

/// Default public API host for the WHO ICD-11 service.
const DEFAULT_API_BASE: &str = "https://id.who.int";
/// WHO access-management token endpoint (client-credentials grant).
const DEFAULT_TOKEN_URL: &str = "https://icdaccessmanagement.who.int/connect/token";
/// Release path appended to the API base when WHO_API_URL is not set.
const DEFAULT_RELEASE_PATH: &str = "/icd/release/11/2025-01";

/// How many characters of the client id may appear in logs.
const CLIENT_ID_PREVIEW_LEN: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "{0} environment variable is not set. \
         Add it to your .env file or set it as a system environment variable."
    )]
    Missing(&'static str),
}

/// WHO ICD-11 API settings, resolved once at startup and immutable after.
#[derive(Debug, Clone)]
pub struct WhoApiConfig {
    pub api_base: String,
    pub token_url: String,
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl WhoApiConfig {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values are treated as unset, so an
    /// `export WHO_CLIENT_ID=` left in a shell profile still fails fast.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base = get("WHO_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let token_url = get("WHO_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let api_url =
            get("WHO_API_URL").unwrap_or_else(|| format!("{api_base}{DEFAULT_RELEASE_PATH}"));

        let client_id = get("WHO_CLIENT_ID").ok_or(ConfigError::Missing("WHO_CLIENT_ID"))?;
        let client_secret =
            get("WHO_CLIENT_SECRET").ok_or(ConfigError::Missing("WHO_CLIENT_SECRET"))?;

        Ok(Self {
            api_base,
            token_url,
            api_url,
            client_id,
            client_secret,
        })
    }

    /// Truncated client id safe to include in log output.
    pub fn client_id_preview(&self) -> &str {
        let end = self
            .client_id
            .char_indices()
            .map(|(i, _)| i)
            .nth(CLIENT_ID_PREVIEW_LEN)
            .unwrap_or(self.client_id.len());
        &self.client_id[..end]
    }

    /// Log the resolved configuration. The secret never appears here.
    pub fn log_summary(&self) {
        let preview = self.client_id_preview();
        let truncated = if preview.len() < self.client_id.len() {
            "..."
        } else {
            ""
        };
        tracing::info!("WHO API base: {}", self.api_base);
        tracing::info!("WHO token URL: {}", self.token_url);
        tracing::info!("WHO API URL: {}", self.api_url);
        tracing::info!("WHO client id: {preview}{truncated}");
        tracing::info!("WHO client secret: [REDACTED]");
    }
}
