/// Configuration management for the aktør client
use crate::{
    aktor::AktorClientConfig,
    error::ConfigError,
    token::{ClientCredentialsConfig, ClientCredentialsTokenProvider, StaticTokenProvider, TokenProvider},
    transport::ReqwestTransportConfig,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AktorConfig {
    pub registry: RegistryConfig,
    pub token: TokenSource,
    pub logging: LoggingConfig,
}

/// Registry endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub endpoint_url: String,
    pub consumer_id: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Where bearer tokens come from
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TokenSource {
    Static {
        #[serde(skip_serializing)]
        token: String,
    },
    ClientCredentials {
        token_endpoint: String,
        client_id: String,
        #[serde(skip_serializing)]
        client_secret: String,
        scope: Option<String>,
    },
    /// No source configured; rejected by [`AktorConfig::validate`]
    None,
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Static { .. } => f
                .debug_struct("Static")
                .field("token", &"<redacted>")
                .finish(),
            TokenSource::ClientCredentials {
                token_endpoint,
                client_id,
                scope,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("token_endpoint", token_endpoint)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .field("scope", scope)
                .finish(),
            TokenSource::None => f.write_str("None"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing(var))
}

impl AktorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let endpoint_url = required("AKTOR_ENDPOINT_URL")?;
        let consumer_id = required("AKTOR_CONSUMER_ID")?;

        let timeout_raw = env::var("AKTOR_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string());
        let timeout_secs = timeout_raw.parse().map_err(|_| ConfigError::Invalid {
            var: "AKTOR_TIMEOUT_SECS",
            value: timeout_raw.clone(),
        })?;

        let user_agent = env::var("AKTOR_USER_AGENT")
            .unwrap_or_else(|_| format!("aktor-client/{}", env!("CARGO_PKG_VERSION")));

        let token = if let Ok(token) = env::var("AKTOR_STATIC_TOKEN") {
            TokenSource::Static { token }
        } else if let Ok(token_endpoint) = env::var("AKTOR_TOKEN_ENDPOINT") {
            TokenSource::ClientCredentials {
                token_endpoint,
                client_id: required("AKTOR_CLIENT_ID")?,
                client_secret: required("AKTOR_CLIENT_SECRET")?,
                scope: env::var("AKTOR_TOKEN_SCOPE").ok(),
            }
        } else {
            TokenSource::None
        };

        let level = env::var("RUST_LOG").unwrap_or_else(|_| "aktor_client=info".to_string());
        let json = env::var("AKTOR_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(AktorConfig {
            registry: RegistryConfig {
                endpoint_url,
                consumer_id,
                timeout_secs,
                user_agent,
            },
            token,
            logging: LoggingConfig { level, json },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.registry.endpoint_url;
        if endpoint.is_empty() {
            return Err(ConfigError::Validation("Endpoint URL cannot be empty".to_string()));
        }
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "Endpoint URL must be http(s): {}",
                endpoint
            )));
        }

        if self.registry.consumer_id.trim().is_empty() {
            return Err(ConfigError::Validation("Consumer id cannot be empty".to_string()));
        }

        if self.registry.timeout_secs == 0 {
            return Err(ConfigError::Validation("Timeout must be at least 1 second".to_string()));
        }

        if matches!(self.token, TokenSource::None) {
            return Err(ConfigError::Validation(
                "Set AKTOR_STATIC_TOKEN or AKTOR_TOKEN_ENDPOINT".to_string(),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }

    pub fn client_config(&self) -> AktorClientConfig {
        AktorClientConfig {
            consumer_id: self.registry.consumer_id.clone(),
            endpoint_url: self.registry.endpoint_url.clone(),
            timeout: Some(self.timeout()),
        }
    }

    pub fn transport_config(&self) -> ReqwestTransportConfig {
        ReqwestTransportConfig {
            user_agent: self.registry.user_agent.clone(),
            timeout: self.timeout(),
        }
    }

    /// Build the configured token provider
    pub fn token_provider(&self) -> Result<Arc<dyn TokenProvider>, ConfigError> {
        match &self.token {
            TokenSource::Static { token } => Ok(Arc::new(StaticTokenProvider::new(token.clone()))),
            TokenSource::ClientCredentials {
                token_endpoint,
                client_id,
                client_secret,
                scope,
            } => {
                let provider = ClientCredentialsTokenProvider::new(
                    ClientCredentialsConfig {
                        token_endpoint: token_endpoint.clone(),
                        client_id: client_id.clone(),
                        client_secret: client_secret.clone(),
                        scope: scope.clone(),
                    },
                    self.timeout(),
                )
                .map_err(|e| ConfigError::Validation(format!("Failed to create token client: {}", e)))?;
                Ok(Arc::new(provider))
            }
            TokenSource::None => Err(ConfigError::Validation("No token source configured".to_string())),
        }
    }
}
