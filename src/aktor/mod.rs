/// Actor registry lookups
///
/// Resolves a national identity number (fnr) to the actor identifier
/// (aktørId) held by the actor registry.

pub mod blocking;
pub mod client;

pub use blocking::BlockingAktorClient;
pub use client::{AktorClient, AktorClientConfig};

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Identifier namespace requested from the registry (`identgruppe`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentGroup {
    AktoerId,
    NorskIdent,
    Folkeregisterident,
}

impl IdentGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentGroup::AktoerId => "AktoerId",
            IdentGroup::NorskIdent => "NorskIdent",
            IdentGroup::Folkeregisterident => "Folkeregisterident",
        }
    }
}

impl fmt::Display for IdentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single identifier returned by the registry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentityRecord {
    #[serde(rename = "ident", default)]
    pub identifier: Option<String>,
    #[serde(rename = "identgruppe", default)]
    pub group: Option<String>,
    #[serde(rename = "gjeldende", default)]
    pub current: Option<bool>,
}

/// Records held under one search identifier.
///
/// The registry returns either a bare list of records or an object with
/// `identer` and `feilmelding`; both normalize to this type. `null` means no
/// records. Any other value is kept as an unrecognized entry so that one odd
/// key does not spoil the rest of the response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawEntry")]
pub struct RegistryEntry {
    pub records: Vec<IdentityRecord>,
    pub failure_reason: Option<String>,
    pub unrecognized: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Null,
    Records(Vec<IdentityRecord>),
    Wrapped {
        #[serde(default)]
        identer: Option<Vec<IdentityRecord>>,
        #[serde(default)]
        feilmelding: Option<String>,
    },
    Unrecognized(serde::de::IgnoredAny),
}

impl From<RawEntry> for RegistryEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Null => Self::default(),
            RawEntry::Records(records) => Self {
                records,
                ..Self::default()
            },
            RawEntry::Wrapped {
                identer,
                feilmelding,
            } => Self {
                records: identer.unwrap_or_default(),
                failure_reason: feilmelding,
                unrecognized: false,
            },
            RawEntry::Unrecognized(_) => Self {
                unrecognized: true,
                ..Self::default()
            },
        }
    }
}

/// Decoded body of `GET /identer`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResolutionResponse {
    /// Top-level failure message, when the registry sends one
    #[serde(rename = "feilmelding", default)]
    pub failure_reason: Option<String>,
    #[serde(flatten)]
    pub records_by_search_key: HashMap<String, RegistryEntry>,
}

impl ResolutionResponse {
    /// Records for a search identifier, in the order the registry returned them
    pub fn records_for(&self, search_ident: &str) -> &[IdentityRecord] {
        self.records_by_search_key
            .get(search_ident)
            .map(|entry| entry.records.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the value under a search identifier had an unexpected shape
    pub fn is_unrecognized(&self, search_ident: &str) -> bool {
        self.records_by_search_key
            .get(search_ident)
            .is_some_and(|entry| entry.unrecognized)
    }

    /// Failure reason for a search identifier, falling back to the top-level one
    pub fn failure_reason_for(&self, search_ident: &str) -> Option<&str> {
        self.records_by_search_key
            .get(search_ident)
            .and_then(|entry| entry.failure_reason.as_deref())
            .or(self.failure_reason.as_deref())
    }
}
