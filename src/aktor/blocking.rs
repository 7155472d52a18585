/// Blocking front for [`AktorClient`]
use crate::{
    aktor::{AktorClient, IdentGroup},
    error::AktorResult,
};
use tokio::runtime::{Builder, Runtime};

/// Runs lookups to completion on a private current-thread runtime.
///
/// Must not be used from within an async context; use [`AktorClient`] there.
pub struct BlockingAktorClient {
    inner: AktorClient,
    runtime: Runtime,
}

impl BlockingAktorClient {
    pub fn new(inner: AktorClient) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Resolve a national identity number to its current aktørId, blocking
    /// until the registry call completes or fails
    pub fn get_aktor_id(&self, fnr: &str) -> AktorResult<String> {
        self.runtime.block_on(self.inner.get_aktor_id(fnr))
    }

    pub fn resolve_identifier(&self, search_ident: &str, group: IdentGroup) -> AktorResult<String> {
        self.runtime
            .block_on(self.inner.resolve_identifier(search_ident, group))
    }

    pub fn inner(&self) -> &AktorClient {
        &self.inner
    }
}
