/// Bearer token sources for registry calls
use crate::error::TokenError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Supplies a bearer token on demand
///
/// The resolver asks for a token on every call, so implementations decide
/// for themselves whether to reuse one.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn get_token(&self) -> Result<String, TokenError>;
}

/// Returns a fixed, pre-issued token
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<String, TokenError> {
        if self.token.is_empty() {
            return Err(TokenError::Missing);
        }
        Ok(self.token.clone())
    }
}

/// OAuth2 client credentials settings
#[derive(Clone)]
pub struct ClientCredentialsConfig {
    pub token_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: Option<String>,
}

impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Fetches a token from an OAuth2 token endpoint using the client credentials grant.
/// Every call performs a new token request.
#[derive(Clone)]
pub struct ClientCredentialsTokenProvider {
    config: ClientCredentialsConfig,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ClientCredentialsTokenProvider {
    /// Create a new provider with its own HTTP client
    pub fn new(config: ClientCredentialsConfig, timeout: Duration) -> Result<Self, TokenError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    async fn get_token(&self) -> Result<String, TokenError> {
        debug!("Requesting access token from {}", self.config.token_endpoint);

        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        if let Some(scope) = &self.config.scope {
            form.push(("scope", scope.as_str()));
        }

        let response = self
            .http_client
            .post(&self.config.token_endpoint)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Token endpoint returned non-success status: {}",
                response.status()
            );
            return Err(TokenError::Rejected {
                status: response.status().as_u16(),
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        if body.access_token.is_empty() {
            return Err(TokenError::Missing);
        }

        Ok(body.access_token)
    }
}
