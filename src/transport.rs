/// HTTP transport for actor registry calls
use crate::{aktor::ResolutionResponse, error::TransportError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// An outbound GET to the registry
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl RegistryRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs the registry call and decodes the body
///
/// Implementations must report non-2xx responses as [`TransportError::Status`]
/// and failures to reach the registry as [`TransportError::Connect`].
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn get(&self, request: RegistryRequest) -> Result<ResolutionResponse, TransportError>;
}

/// Transport settings
#[derive(Debug, Clone)]
pub struct ReqwestTransportConfig {
    /// User-Agent header for HTTP requests
    pub user_agent: String,
    /// Timeout for a single request
    pub timeout: Duration,
}

impl Default for ReqwestTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("aktor-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
        }
    }
}

/// [`RegistryTransport`] backed by reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    /// Create a new transport
    pub fn new(config: &ReqwestTransportConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http_client })
    }

    /// Use an existing client
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Build(Box::new(err))
    } else if err.is_connect() || err.is_timeout() {
        TransportError::Connect(Box::new(err))
    } else if err.is_decode() {
        TransportError::Decode(Box::new(err))
    } else {
        TransportError::Status(err.status().map(|s| s.as_u16()))
    }
}

#[async_trait]
impl RegistryTransport for ReqwestTransport {
    async fn get(&self, request: RegistryRequest) -> Result<ResolutionResponse, TransportError> {
        debug!("GET {}", request.url);

        let mut builder = self.http_client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(classify)?;

        if !response.status().is_success() {
            return Err(TransportError::Status(Some(response.status().as_u16())));
        }

        let body = response.bytes().await.map_err(classify)?;

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(Box::new(e)))
    }
}
