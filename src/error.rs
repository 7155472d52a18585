/// Error types for actor resolution
use thiserror::Error;
use tracing::error;

/// Boxed cause carried by connectivity and decoding failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Status reported for failures where no HTTP response was received.
/// Kept outside the range of real HTTP status codes.
pub const CONNECTIVITY_FAILURE_STATUS: u16 = 999;

/// Actor resolution failed
///
/// Every registry-related failure is a variant of this enum, so callers can
/// match on a single kind or treat them all alike.
#[derive(Error, Debug)]
pub enum AktorError {
    /// The registry could not be reached at all
    #[error("Call to {url} failed before any response was received")]
    Connectivity {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The registry answered with a non-2xx status
    #[error("Call to the actor registry failed with HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The registry answered, but has no record for the search identifier
    #[error("Could not find aktørId")]
    NotFound { reason: Option<String> },

    /// A record was returned without an identifier value
    #[error("Registry returned a record without an identifier for the search identifier")]
    MalformedRecord { search_ident: String },

    /// The response body could not be decoded
    #[error("Invalid response from the actor registry: {0}")]
    InvalidResponse(#[source] BoxError),

    /// The request could not be built, so nothing was sent
    #[error("Could not build request to the actor registry: {0}")]
    InvalidRequest(#[source] BoxError),

    /// Token acquisition failed before the registry was called
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AktorError {
    /// Connectivity failure, logged with the URL that could not be reached
    pub fn connectivity(url: &str, source: BoxError) -> Self {
        error!("Call to {} gave {}", url, source);
        AktorError::Connectivity {
            url: url.to_string(),
            source,
        }
    }

    /// HTTP status failure, logged with the endpoint and status
    pub fn http_status(endpoint_url: &str, status: u16) -> Self {
        error!(
            "Call to actor registry at {} failed with HTTP-{}",
            endpoint_url, status
        );
        AktorError::HttpStatus { status }
    }

    /// Semantic not-found, logged with any reason the registry supplied
    pub fn not_found(reason: Option<String>) -> Self {
        error!(
            "Could not find actor: {}",
            reason.as_deref().unwrap_or("no reason given")
        );
        AktorError::NotFound { reason }
    }

    pub fn malformed_record(search_ident: &str) -> Self {
        error!("First record for search identifier has no ident value");
        AktorError::MalformedRecord {
            search_ident: search_ident.to_string(),
        }
    }

    pub fn invalid_response(endpoint_url: &str, source: BoxError) -> Self {
        error!(
            "Could not decode response from actor registry at {}: {}",
            endpoint_url, source
        );
        AktorError::InvalidResponse(source)
    }

    pub fn invalid_request(url: &str, source: BoxError) -> Self {
        error!("Could not build request to {}: {}", url, source);
        AktorError::InvalidRequest(source)
    }

    /// Status code associated with the failure.
    ///
    /// Connectivity failures report [`CONNECTIVITY_FAILURE_STATUS`].
    pub fn status(&self) -> Option<u16> {
        match self {
            AktorError::Connectivity { .. } => Some(CONNECTIVITY_FAILURE_STATUS),
            AktorError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AktorError::NotFound { .. })
    }
}

/// Failures reported by a [`crate::transport::RegistryTransport`]
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection refused, DNS failure, or timeout before any response
    #[error("Connection failed: {0}")]
    Connect(#[source] BoxError),

    /// Non-2xx response. `None` when the status could not be determined.
    #[error("Unexpected HTTP status: {0:?}")]
    Status(Option<u16>),

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[source] BoxError),

    /// The request was rejected before sending, e.g. an invalid header value
    #[error("Failed to build request: {0}")]
    Build(#[source] BoxError),
}

/// Failures from a [`crate::token::TokenProvider`]
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("No access token available")]
    Missing,

    #[error("Token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Token endpoint rejected the request with HTTP status {status}")]
    Rejected { status: u16 },

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

/// Configuration errors raised while reading the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for actor resolution
pub type AktorResult<T> = Result<T, AktorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_status_for_each_kind() {
        let refused: BoxError = "connection refused".into();
        let err = AktorError::Connectivity {
            url: "http://localhost/identer".to_string(),
            source: refused,
        };
        assert_eq!(err.status(), Some(CONNECTIVITY_FAILURE_STATUS));

        assert_eq!(AktorError::HttpStatus { status: 404 }.status(), Some(404));
        assert_eq!(AktorError::NotFound { reason: None }.status(), None);
        assert_eq!(AktorError::Token(TokenError::Missing).status(), None);
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(AktorError::NotFound { reason: None }.is_not_found());
        assert!(!AktorError::HttpStatus { status: 404 }.is_not_found());
    }

    #[test]
    fn test_connectivity_keeps_cause() {
        use std::error::Error;

        let err = AktorError::Connectivity {
            url: "http://localhost".to_string(),
            source: "dns failure".into(),
        };
        let cause = err.source().map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some("dns failure"));
    }

    #[test]
    fn test_token_error_is_transparent() {
        let err = AktorError::from(TokenError::Rejected { status: 401 });
        assert_eq!(
            err.to_string(),
            "Token endpoint rejected the request with HTTP status 401"
        );
    }

    #[test]
    #[traced_test]
    fn test_constructors_log_once() {
        let _ = AktorError::http_status("http://registry", 503);
        assert!(logs_contain("HTTP-503"));

        let _ = AktorError::not_found(Some("Den angitte personidenten finnes ikke".to_string()));
        assert!(logs_contain("Den angitte personidenten finnes ikke"));

        let _ = AktorError::connectivity("http://registry/identer", "refused".into());
        assert!(logs_contain("http://registry/identer"));

        logs_assert(|lines: &[&str]| {
            let errors = lines.iter().filter(|l| l.contains("ERROR")).count();
            if errors == 3 {
                Ok(())
            } else {
                Err(format!("expected 3 error lines, got {}", errors))
            }
        });
    }
}
