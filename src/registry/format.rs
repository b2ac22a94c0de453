//! Format nodes and registration requests.

use smol_str::SmolStr;

use crate::base::{FormatSymbol, ROOT_FORMAT};

/// A named output representation with its content type and fallback parent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatNode {
    pub symbol: FormatSymbol,
    /// Canonical content type, e.g. `application/vnd.wap.xhtml+xml`.
    pub mime: SmolStr,
    /// The fallback format. `None` only for hierarchy roots.
    pub parent: Option<FormatSymbol>,
    /// Extra extensions that resolve to this format.
    pub aliases: Vec<FormatSymbol>,
    /// Extra content types that resolve to this format.
    pub mime_synonyms: Vec<SmolStr>,
    /// Built-in formats live outside the dynamic namespace.
    pub builtin: bool,
}

impl FormatNode {
    /// Check whether this node answers to the given content type.
    pub fn claims_mime(&self, mime: &str) -> bool {
        self.mime == mime || self.mime_synonyms.iter().any(|m| m == mime)
    }

    /// All content types this node answers to, canonical first.
    pub fn mimes(&self) -> impl Iterator<Item = &SmolStr> {
        std::iter::once(&self.mime).chain(self.mime_synonyms.iter())
    }
}

/// A request to register (or replace) a dynamic format.
///
/// ```
/// use mime_cascade::registry::{FormatRegistry, Registration};
///
/// let mut registry = FormatRegistry::new();
/// registry.register(Registration::new("mobile").with_mime("application/vnd.wap.xhtml+xml"));
/// registry.register(Registration::new("s60").with_parent("mobile"));
///
/// assert_eq!(registry.ancestors("s60"), ["mobile", "html"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub(super) symbol: FormatSymbol,
    pub(super) parent: Option<FormatSymbol>,
    pub(super) mime: Option<SmolStr>,
    pub(super) aliases: Vec<FormatSymbol>,
}

impl Registration {
    /// Register `symbol` as a child of the root format, inheriting its mime.
    pub fn new(symbol: impl Into<FormatSymbol>) -> Self {
        Self {
            symbol: symbol.into(),
            parent: Some(FormatSymbol::new_static(ROOT_FORMAT)),
            mime: None,
            aliases: Vec::new(),
        }
    }

    /// Set the fallback format. An empty parent means "no parent".
    pub fn with_parent(mut self, parent: impl Into<FormatSymbol>) -> Self {
        let parent = parent.into();
        self.parent = (!parent.is_empty()).then_some(parent);
        self
    }

    /// Register a new hierarchy root.
    pub fn without_parent(mut self) -> Self {
        self.parent = None;
        self
    }

    /// Set an explicit content type instead of inheriting the parent's.
    pub fn with_mime(mut self, mime: impl Into<SmolStr>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Add an extension synonym.
    pub fn with_alias(mut self, alias: impl Into<FormatSymbol>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}
