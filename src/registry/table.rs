use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{BUILTIN_FORMATS, DEFAULT_MIME, FormatSymbol};

use super::format::{FormatNode, Registration};

/// The table of known formats.
///
/// Built-in formats are seeded on construction and never removed. Dynamic
/// formats keep a stable slot: replacing a format re-uses its position, so
/// consumers that depend on iteration order see the same layout.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    /// Built-in formats, fixed at construction.
    builtins: IndexMap<FormatSymbol, FormatNode>,
    /// Dynamically registered formats, in slot order.
    formats: IndexMap<FormatSymbol, FormatNode>,
    /// Content type -> owning format (the most recent registration wins).
    by_mime: FxHashMap<SmolStr, FormatSymbol>,
    /// Extension synonym -> format (the most recent registration wins).
    by_extension: FxHashMap<FormatSymbol, FormatSymbol>,
}

impl FormatRegistry {
    /// Create a registry holding only the built-in formats.
    pub fn new() -> Self {
        let mut registry = Self {
            builtins: IndexMap::new(),
            formats: IndexMap::new(),
            by_mime: FxHashMap::default(),
            by_extension: FxHashMap::default(),
        };
        for builtin in BUILTIN_FORMATS {
            let node = FormatNode {
                symbol: FormatSymbol::new_static(builtin.symbol),
                mime: SmolStr::new_static(builtin.mime),
                parent: None,
                aliases: builtin
                    .aliases
                    .iter()
                    .map(|a| FormatSymbol::new_static(*a))
                    .collect(),
                mime_synonyms: builtin
                    .mime_synonyms
                    .iter()
                    .map(|m| SmolStr::new_static(*m))
                    .collect(),
                builtin: true,
            };
            registry.builtins.insert(node.symbol.clone(), node.clone());
            registry.index(&node);
        }
        registry
    }

    // ============================================================
    // Mutation
    // ============================================================

    /// Register a format, replacing any dynamic format with the same symbol.
    ///
    /// Returns `false` (and changes nothing) when the request is structurally
    /// invalid: an empty symbol, a built-in symbol, or a parent link that would
    /// close a cycle.
    pub fn register(&mut self, registration: Registration) -> bool {
        let Registration {
            symbol,
            parent,
            mime,
            aliases,
        } = registration;

        if symbol.is_empty() {
            tracing::warn!("ignoring format registration with an empty symbol");
            return false;
        }
        if self.builtins.contains_key(&symbol) {
            tracing::warn!("refusing to replace built-in format '{}'", symbol);
            return false;
        }
        if let Some(parent) = &parent {
            if self.would_loop(&symbol, parent) {
                tracing::warn!(
                    "refusing to register '{}' under '{}': the parent chain would loop",
                    symbol,
                    parent
                );
                return false;
            }
        }

        let mime = mime.unwrap_or_else(|| {
            parent
                .as_deref()
                .and_then(|p| self.get(p))
                .map(|p| p.mime.clone())
                .unwrap_or_else(|| SmolStr::new_static(DEFAULT_MIME))
        });

        let node = FormatNode {
            symbol: symbol.clone(),
            mime,
            parent,
            aliases,
            mime_synonyms: Vec::new(),
            builtin: false,
        };

        if let Some(previous) = self.formats.get(&symbol).cloned() {
            self.unindex(&previous);
        }
        tracing::debug!(
            "registering format '{}' ({}) under {:?}",
            node.symbol,
            node.mime,
            node.parent
        );
        // IndexMap::insert keeps the slot of an existing key.
        self.formats.insert(symbol, node.clone());
        self.index(&node);
        true
    }

    /// Remove a dynamic format and every index entry pointing at it.
    ///
    /// Descendants are left in place; their ancestor chains end where the
    /// removed format used to be. Built-in formats cannot be removed.
    pub fn unregister(&mut self, symbol: &str) -> bool {
        let Some(node) = self.formats.shift_remove(symbol) else {
            if self.builtins.contains_key(symbol) {
                tracing::debug!("built-in format '{}' cannot be unregistered", symbol);
            }
            return false;
        };
        self.unindex(&node);
        tracing::debug!("unregistered format '{}'", symbol);
        true
    }

    /// Remove every dynamically registered format. Returns how many were removed.
    pub fn unregister_all(&mut self) -> usize {
        let removed = self.formats.len();
        self.formats.clear();
        self.by_mime.clear();
        self.by_extension.clear();
        let builtins: Vec<FormatNode> = self.builtins.values().cloned().collect();
        for node in &builtins {
            self.index(node);
        }
        tracing::debug!("unregistered all {} dynamic formats", removed);
        removed
    }

    /// Return the registry to its freshly constructed state.
    pub fn reset(&mut self) {
        self.unregister_all();
    }

    fn index(&mut self, node: &FormatNode) {
        for mime in node.mimes() {
            self.by_mime.insert(mime.clone(), node.symbol.clone());
        }
        for alias in &node.aliases {
            self.by_extension.insert(alias.clone(), node.symbol.clone());
        }
    }

    /// Drop index entries owned by `node`, handing each one to the latest
    /// remaining claimant in SET order.
    fn unindex(&mut self, node: &FormatNode) {
        for mime in node.mimes() {
            if self.by_mime.get(mime) != Some(&node.symbol) {
                continue;
            }
            self.by_mime.remove(mime);
            let next_claimant = self
                .iter()
                .filter(|other| other.symbol != node.symbol && other.claims_mime(mime))
                .last()
                .map(|other| other.symbol.clone());
            if let Some(next) = next_claimant {
                tracing::trace!("content type '{}' handed to '{}'", mime, next);
                self.by_mime.insert(mime.clone(), next);
            }
        }
        for alias in &node.aliases {
            if self.by_extension.get(alias) != Some(&node.symbol) {
                continue;
            }
            self.by_extension.remove(alias);
            let next_claimant = self
                .iter()
                .filter(|other| other.symbol != node.symbol && other.aliases.contains(alias))
                .last()
                .map(|other| other.symbol.clone());
            if let Some(next) = next_claimant {
                tracing::trace!("extension '{}' handed to '{}'", alias, next);
                self.by_extension.insert(alias.clone(), next);
            }
        }
    }

    /// Walk raw parent links upward from `parent`, including links to formats
    /// that are not registered yet, and report whether `symbol` is reached.
    fn would_loop(&self, symbol: &str, parent: &str) -> bool {
        let mut current = parent;
        for _ in 0..=self.len() {
            if current == symbol {
                return true;
            }
            match self.get(current).and_then(|node| node.parent.as_deref()) {
                Some(next) => current = next,
                None => return false,
            }
        }
        true
    }

    // ============================================================
    // Lookup
    // ============================================================

    /// Get a format by symbol.
    pub fn get(&self, symbol: &str) -> Option<&FormatNode> {
        self.formats
            .get(symbol)
            .or_else(|| self.builtins.get(symbol))
    }

    /// Check whether a format is known. Built-ins always exist.
    pub fn exists(&self, symbol: &str) -> bool {
        !symbol.is_empty() && self.get(symbol).is_some()
    }

    /// Check whether `symbol` is a built-in format.
    pub fn is_builtin(&self, symbol: &str) -> bool {
        self.builtins.contains_key(symbol)
    }

    /// Find the format owning a content type: the latest registration
    /// claiming it.
    pub fn lookup(&self, mime: &str) -> Option<&FormatNode> {
        self.by_mime.get(mime).and_then(|symbol| self.get(symbol))
    }

    /// Find a format by its symbol or one of its extension synonyms.
    pub fn lookup_by_extension(&self, extension: &str) -> Option<&FormatNode> {
        self.get(extension).or_else(|| {
            self.by_extension
                .get(extension)
                .and_then(|symbol| self.get(symbol))
        })
    }

    /// The resolved fallback format of `symbol`, if its parent still exists.
    pub fn parent(&self, symbol: &str) -> Option<&FormatNode> {
        self.get(symbol)?
            .parent
            .as_deref()
            .and_then(|parent| self.get(parent))
    }

    /// All fallback formats of `symbol`, nearest first.
    ///
    /// The chain stops at the first parent that does not resolve. It is capped
    /// at the number of known formats, so it terminates even on a corrupted
    /// parent graph.
    pub fn ancestors(&self, symbol: &str) -> Vec<FormatSymbol> {
        let mut chain: Vec<FormatSymbol> = Vec::new();
        let Some(mut current) = self.get(symbol) else {
            return chain;
        };
        let limit = self.len();

        while let Some(parent) = current.parent.as_deref() {
            let Some(node) = self.get(parent) else {
                break;
            };
            if node.symbol == symbol || chain.contains(&node.symbol) || chain.len() >= limit {
                tracing::warn!("ancestor chain of '{}' loops at '{}'", symbol, node.symbol);
                break;
            }
            chain.push(node.symbol.clone());
            current = node;
        }
        chain
    }

    /// Direct children of `symbol`, in slot order.
    pub fn descendants(&self, symbol: &str) -> Vec<FormatSymbol> {
        self.iter()
            .filter(|node| node.parent.as_deref() == Some(symbol))
            .map(|node| node.symbol.clone())
            .collect()
    }

    /// True iff `symbol` is a (strict) ancestor of `candidate`.
    pub fn subtype_of(&self, candidate: &str, symbol: &str) -> bool {
        self.ancestors(candidate).iter().any(|a| a == symbol)
    }

    /// True iff `candidate` is `ancestor` or one of its descendants.
    pub fn is_or_descends_from(&self, candidate: &str, ancestor: &str) -> bool {
        (candidate == ancestor && self.exists(candidate)) || self.subtype_of(candidate, ancestor)
    }

    /// The last element of the ancestor chain, or the symbol itself when it
    /// has no resolvable parent. `None` for unknown symbols.
    pub fn top_level_ancestor(&self, symbol: &str) -> Option<FormatSymbol> {
        let node = self.get(symbol)?;
        Some(
            self.ancestors(symbol)
                .pop()
                .unwrap_or_else(|| node.symbol.clone()),
        )
    }

    /// Iterate every format in SET order: built-ins, then dynamic formats.
    pub fn iter(&self) -> impl Iterator<Item = &FormatNode> {
        self.builtins.values().chain(self.formats.values())
    }

    /// Iterate dynamically registered formats only.
    pub fn registered(&self) -> impl Iterator<Item = &FormatNode> {
        self.formats.values()
    }

    /// Number of known formats, built-ins included.
    pub fn len(&self) -> usize {
        self.builtins.len() + self.formats.len()
    }

    /// Number of dynamically registered formats.
    pub fn dynamic_len(&self) -> usize {
        self.formats.len()
    }

    /// True when no dynamic formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
