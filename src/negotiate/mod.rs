//! # Negotiation
//!
//! Request-time format selection, built from independent steps:
//!
//! ```text
//! User-Agent ──detect──▶ ClientMatch ──select──▶ FormatSelection
//!                                                      │
//! accepted formats + Offers ──respond──▶ Renderer ◀────┘
//!                                           │
//!                      resolve_resource ◀───┘ (template/layout fallback)
//! ```
//!
//! [`Negotiator`] bundles the steps over a [`SharedRegistry`] and a
//! [`RecordStore`]. No registry lock is held while the store or the host's
//! renderer runs.

mod cascade;
mod config;
mod detect;
mod error;
mod offers;
mod resource;
mod selection;

use std::sync::Arc;

pub use cascade::{RenderOutcome, Renderer, respond};
pub use config::{GENERIC_BROWSER, GENERIC_PLATFORM, NegotiatorConfig};
pub use detect::{ClientMatch, detect};
pub use error::NegotiateError;
pub use offers::Offers;
pub use resource::{Resolved, fallback_chain, resolve_along, resolve_resource};
pub use selection::FormatSelection;

use crate::base::FormatSymbol;
use crate::registry::{FormatNode, FormatRegistry, SharedRegistry};
use crate::store::{RecordStore, StoreError};

/// Device-aware negotiation over a shared registry and a record store.
#[derive(Clone)]
pub struct Negotiator {
    registry: SharedRegistry,
    store: Arc<dyn RecordStore>,
    config: NegotiatorConfig,
}

impl std::fmt::Debug for Negotiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Negotiator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Negotiator {
    pub fn new(registry: SharedRegistry, store: Arc<dyn RecordStore>) -> Self {
        Self::with_config(registry, store, NegotiatorConfig::default())
    }

    pub fn with_config(
        registry: SharedRegistry,
        store: Arc<dyn RecordStore>,
        config: NegotiatorConfig,
    ) -> Self {
        Self {
            registry,
            store,
            config,
        }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &NegotiatorConfig {
        &self.config
    }

    // ============================================================
    // Detection
    // ============================================================

    /// Match a User-Agent against the store.
    pub fn detect(&self, user_agent: &str) -> Result<ClientMatch, StoreError> {
        // Query the store before taking the registry lock.
        let record = self.store.find_longest_matching_detection(user_agent)?;
        let client = ClientMatch::resolve(&self.registry.read(), &self.config, record);
        tracing::debug!("detected '{}' for UA '{}'", client.format(), user_agent);
        Ok(client)
    }

    /// `"{browser} on {platform}"` for a detected client.
    pub fn full_name(&self, client: &ClientMatch) -> Result<String, StoreError> {
        client.full_name(self.store.as_ref(), &self.config)
    }

    /// True when the client's format is `symbol` or descends from it.
    pub fn is_variant_of(&self, client: &ClientMatch, symbol: &str) -> bool {
        self.registry
            .read()
            .is_or_descends_from(client.format(), symbol)
    }

    // ============================================================
    // Format selection
    // ============================================================

    /// Choose the format to serve. An explicit format is resolved as an
    /// extension first, so `htm` selects `html`.
    pub fn select_format(
        &self,
        requested: Option<&str>,
        explicit: Option<&str>,
        client: &ClientMatch,
    ) -> FormatSelection {
        let explicit = explicit.filter(|e| !e.is_empty()).map(|e| {
            self.registry
                .read()
                .lookup_by_extension(e)
                .map(|node| node.symbol.clone())
                .unwrap_or_else(|| FormatSymbol::new(e))
        });
        let selection = FormatSelection::new(&self.config, requested, explicit.as_deref(), client);
        tracing::debug!("using '{}' for rendering", selection.chosen());
        selection
    }

    /// Map accepted content types to format symbols, dropping unknown ones.
    ///
    /// Built-in formats answer for their own content types. Otherwise the
    /// format that introduced the type wins over descendants inheriting it.
    pub fn accepted_formats<'a>(&self, mimes: impl IntoIterator<Item = &'a str>) -> Vec<FormatSymbol> {
        let registry = self.registry.read();
        mimes
            .into_iter()
            .filter_map(|mime| match accepted_format(&registry, mime.trim()) {
                Some(node) => Some(node.symbol.clone()),
                None => {
                    tracing::trace!("[ACCEPT] unknown content type '{}'", mime);
                    None
                }
            })
            .collect()
    }

    // ============================================================
    // Responding
    // ============================================================

    /// Build offers for `symbols`, each expanded to its descendants.
    pub fn offers<'a>(&self, symbols: impl IntoIterator<Item = &'a str>) -> Offers {
        let registry = self.registry.read();
        let mut offers = Offers::new();
        for symbol in symbols {
            offers.offer(&registry, symbol);
        }
        offers
    }

    /// Run the fallback cascade. See [`respond`].
    pub fn respond<R>(
        &self,
        accepted: &[FormatSymbol],
        offers: &Offers,
        renderer: &mut R,
    ) -> Result<FormatNode, NegotiateError<R::Error>>
    where
        R: Renderer + ?Sized,
    {
        respond(&self.config, accepted, offers, renderer)
    }

    /// Find a resource for `format` or its nearest ancestor that has one.
    pub fn resolve_resource<R>(
        &self,
        format: &str,
        lookup: impl FnMut(&str) -> Option<R>,
    ) -> Option<Resolved<R>> {
        let chain = fallback_chain(&self.registry.read(), format, self.config.max_fallback_depth);
        resolve_along(&chain, lookup)
    }

    /// Like [`resolve_resource`](Self::resolve_resource), failing with
    /// [`NegotiateError::ResourceNotFound`] when the chain is exhausted.
    pub fn require_resource<R, E>(
        &self,
        format: &str,
        lookup: impl FnMut(&str) -> Option<R>,
    ) -> Result<Resolved<R>, NegotiateError<E>> {
        self.resolve_resource(format, lookup)
            .ok_or_else(|| NegotiateError::ResourceNotFound {
                format: FormatSymbol::new(format),
            })
    }
}

fn accepted_format<'r>(registry: &'r FormatRegistry, mime: &str) -> Option<&'r FormatNode> {
    if let Some(builtin) = registry
        .iter()
        .filter(|node| node.builtin)
        .find(|node| node.claims_mime(mime))
    {
        return Some(builtin);
    }

    let mut node = registry.lookup(mime)?;
    for _ in 0..registry.len() {
        match registry.parent(&node.symbol) {
            Some(parent) if parent.claims_mime(mime) => node = parent,
            _ => break,
        }
    }
    Some(node)
}

#[cfg(test)]
mod tests;
