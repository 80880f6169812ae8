//! # Platform Registry
//!
//! Fixed mapping from platform identifier to [`Connector`] record.
//!
//! The registry is an ordinary value owned by whoever coordinates a run
//! (usually `ConnectorIntegrator`), so every test can build its own isolated
//! instance. Iteration order is insertion order and is preserved all the way
//! into the JSON report.

use indexmap::IndexMap;

use crate::types::{Connector, KnownPlatform, PlatformId};

/// Ordered set of connectors keyed by platform id.
#[derive(Debug, Clone, Default)]
pub struct PlatformRegistry {
    connectors: IndexMap<PlatformId, Connector>,
}

impl PlatformRegistry {
    /// The built-in registry: github, linear, notion, email, slack, files.
    pub fn standard() -> Self {
        Self::from_connectors(KnownPlatform::ALL.into_iter().map(Connector::known))
    }

    /// Builds a registry from arbitrary connectors.
    ///
    /// A later connector with the same id replaces the earlier one but keeps
    /// the earlier position. Every connector starts unauthenticated; only a
    /// probe result recorded through [`record_probe`](Self::record_probe)
    /// can mark it authenticated.
    pub fn from_connectors(connectors: impl IntoIterator<Item = Connector>) -> Self {
        let connectors = connectors
            .into_iter()
            .map(|mut c| {
                c.authenticated = false;
                (c.platform_id.clone(), c)
            })
            .collect();
        PlatformRegistry { connectors }
    }

    pub fn get(&self, id: &PlatformId) -> Option<&Connector> {
        self.connectors.get(id)
    }

    pub fn contains(&self, id: &PlatformId) -> bool {
        self.connectors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Platform ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &PlatformId> {
        self.connectors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// Stores a credential placeholder. Returns false for unknown ids.
    pub fn set_credential(&mut self, id: &PlatformId, credential: impl Into<String>) -> bool {
        match self.connectors.get_mut(id) {
            Some(c) => {
                c.credential = Some(credential.into());
                true
            }
            None => false,
        }
    }

    /// Records a probe outcome on the connector's `authenticated` flag.
    ///
    /// This is the only mutation of `authenticated`; the prober is its only
    /// caller. Returns false (and changes nothing) for unknown ids.
    pub fn record_probe(&mut self, id: &PlatformId, authenticated: bool) -> bool {
        match self.connectors.get_mut(id) {
            Some(c) => {
                c.authenticated = authenticated;
                true
            }
            None => false,
        }
    }
}
