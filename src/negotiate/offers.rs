use rustc_hash::FxHashSet;

use crate::base::FormatSymbol;
use crate::registry::{FormatNode, FormatRegistry};

/// The formats a response can be rendered in, most specific first.
///
/// Offering a format also offers everything registered below it, deepest
/// first, so a response offering `mobile` answers `s60` clients at `s60`
/// before anything more general. Nodes are cloned out of the registry, so
/// an `Offers` stays valid while the registry changes.
#[derive(Debug, Clone, Default)]
pub struct Offers {
    order: Vec<FormatNode>,
    seen: FxHashSet<FormatSymbol>,
}

impl Offers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `symbol` and, before it, all of its descendants.
    ///
    /// Formats already offered keep their first position. Unknown symbols
    /// are ignored.
    pub fn offer(&mut self, registry: &FormatRegistry, symbol: &str) -> &mut Self {
        if !registry.exists(symbol) {
            tracing::debug!("[OFFER] unknown format '{}'", symbol);
            return self;
        }
        for child in registry.descendants(symbol) {
            self.offer(registry, &child);
        }
        self.offer_exact(registry, symbol)
    }

    /// Offer only `symbol` itself.
    pub fn offer_exact(&mut self, registry: &FormatRegistry, symbol: &str) -> &mut Self {
        let Some(node) = registry.get(symbol) else {
            tracing::debug!("[OFFER] unknown format '{}'", symbol);
            return self;
        };
        if self.seen.insert(node.symbol.clone()) {
            tracing::trace!("[OFFER] {} ({})", node.symbol, node.mime);
            self.order.push(node.clone());
        }
        self
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.seen.contains(symbol)
    }

    pub fn get(&self, symbol: &str) -> Option<&FormatNode> {
        if !self.contains(symbol) {
            return None;
        }
        self.order.iter().find(|node| node.symbol == symbol)
    }

    pub fn first(&self) -> Option<&FormatNode> {
        self.order.first()
    }

    /// Offered formats in attempt order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatNode> {
        self.order.iter()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.order.iter().map(|node| node.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
