/// Actor registry client - resolves fnr to aktørId
use crate::{
    aktor::{IdentGroup, ResolutionResponse},
    error::{AktorError, AktorResult, TransportError},
    token::TokenProvider,
    transport::{RegistryRequest, RegistryTransport},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONSUMER_ID_HEADER: &str = "Nav-Consumer-Id";
pub const PERSON_IDENTS_HEADER: &str = "Nav-Personidenter";

/// Client configuration
#[derive(Debug, Clone)]
pub struct AktorClientConfig {
    /// Sent as `Nav-Consumer-Id` on every call
    pub consumer_id: String,
    /// Base URL of the registry; `/identer` is appended
    pub endpoint_url: String,
    /// Upper bound for token fetch plus registry call
    pub timeout: Option<Duration>,
}

/// Actor registry client
///
/// Holds only immutable configuration, so one instance can serve
/// concurrent lookups.
#[derive(Clone)]
pub struct AktorClient {
    config: AktorClientConfig,
    token_provider: Arc<dyn TokenProvider>,
    transport: Arc<dyn RegistryTransport>,
}

impl AktorClient {
    /// Create a new client
    pub fn new(
        mut config: AktorClientConfig,
        token_provider: Arc<dyn TokenProvider>,
        transport: Arc<dyn RegistryTransport>,
    ) -> Self {
        if config.endpoint_url.ends_with('/') {
            config.endpoint_url.pop();
        }

        Self {
            config,
            token_provider,
            transport,
        }
    }

    pub fn config(&self) -> &AktorClientConfig {
        &self.config
    }

    /// Resolve a national identity number to its current aktørId
    pub async fn get_aktor_id(&self, fnr: &str) -> AktorResult<String> {
        self.resolve_identifier(fnr, IdentGroup::AktoerId).await
    }

    /// Resolve a search identifier to the current identifier in `group`
    ///
    /// The first record the registry returns for the search identifier wins.
    /// A fresh token is requested on every call.
    pub async fn resolve_identifier(
        &self,
        search_ident: &str,
        group: IdentGroup,
    ) -> AktorResult<String> {
        let url = self.identer_url(group);

        let Some(timeout) = self.config.timeout else {
            return self.lookup(&url, search_ident).await;
        };

        match tokio::time::timeout(timeout, self.lookup(&url, search_ident)).await {
            Ok(result) => result,
            Err(elapsed) => Err(AktorError::connectivity(&url, Box::new(elapsed))),
        }
    }

    fn identer_url(&self, group: IdentGroup) -> String {
        format!(
            "{}/identer?gjeldende=true&identgruppe={}",
            self.config.endpoint_url, group
        )
    }

    async fn lookup(&self, url: &str, search_ident: &str) -> AktorResult<String> {
        let token = self.token_provider.get_token().await?;

        let request = RegistryRequest {
            url: url.to_string(),
            headers: vec![
                (AUTHORIZATION_HEADER, format!("Bearer {}", token)),
                (CONSUMER_ID_HEADER, self.config.consumer_id.clone()),
                (PERSON_IDENTS_HEADER, search_ident.to_string()),
            ],
        };

        let response = self
            .transport
            .get(request)
            .await
            .map_err(|e| self.classify(url, e))?;

        self.first_identifier(&response, search_ident)
    }

    fn classify(&self, url: &str, err: TransportError) -> AktorError {
        match err {
            TransportError::Connect(source) => AktorError::connectivity(url, source),
            TransportError::Status(status) => {
                AktorError::http_status(&self.config.endpoint_url, status.unwrap_or(0))
            }
            TransportError::Decode(source) => {
                AktorError::invalid_response(&self.config.endpoint_url, source)
            }
            TransportError::Build(source) => AktorError::invalid_request(url, source),
        }
    }

    fn first_identifier(
        &self,
        response: &ResolutionResponse,
        search_ident: &str,
    ) -> AktorResult<String> {
        if response.is_unrecognized(search_ident) {
            return Err(AktorError::invalid_response(
                &self.config.endpoint_url,
                "unexpected value under the search identifier".into(),
            ));
        }

        let records = response.records_for(search_ident);
        let Some(first) = records.first() else {
            return Err(AktorError::not_found(
                response.failure_reason_for(search_ident).map(String::from),
            ));
        };

        debug!("Registry returned {} record(s) for search identifier", records.len());

        first
            .identifier
            .clone()
            .ok_or_else(|| AktorError::malformed_record(search_ident))
    }
}

impl std::fmt::Debug for AktorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AktorClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
