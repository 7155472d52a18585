/// Aktør client
///
/// Resolves national identity numbers (fnr) to aktørId through the actor
/// registry's `/identer` endpoint.

pub mod aktor;
pub mod config;
pub mod error;
pub mod token;
pub mod transport;

pub use aktor::{AktorClient, AktorClientConfig, BlockingAktorClient, IdentGroup};
pub use error::{AktorError, AktorResult, CONNECTIVITY_FAILURE_STATUS};
