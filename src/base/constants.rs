//! Domain constants: built-in formats and default content types.

/// The root of every dynamic format hierarchy.
pub const ROOT_FORMAT: &str = "html";

/// The "accept anything" format sent by clients as `*/*`.
pub const WILDCARD_FORMAT: &str = "all";

/// Content type assumed when a format has neither an explicit mime string
/// nor a parent to inherit one from.
pub const DEFAULT_MIME: &str = "application/xhtml+xml";

/// A format that is always present and can never be unregistered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFormat {
    pub symbol: &'static str,
    /// Canonical content type.
    pub mime: &'static str,
    /// Additional content types that resolve to this format.
    pub mime_synonyms: &'static [&'static str],
    /// Additional extensions that resolve to this format.
    pub aliases: &'static [&'static str],
}

pub const BUILTIN_FORMATS: &[BuiltinFormat] = &[
    BuiltinFormat {
        symbol: ROOT_FORMAT,
        mime: DEFAULT_MIME,
        mime_synonyms: &["text/html"],
        aliases: &["htm", "xhtml"],
    },
    BuiltinFormat {
        symbol: WILDCARD_FORMAT,
        mime: "*/*",
        mime_synonyms: &[],
        aliases: &[],
    },
    BuiltinFormat {
        symbol: "text",
        mime: "text/plain",
        mime_synonyms: &[],
        aliases: &["txt"],
    },
    BuiltinFormat {
        symbol: "xml",
        mime: "application/xml",
        mime_synonyms: &["text/xml"],
        aliases: &[],
    },
    BuiltinFormat {
        symbol: "json",
        mime: "application/json",
        mime_synonyms: &["text/x-json"],
        aliases: &[],
    },
    BuiltinFormat {
        symbol: "js",
        mime: "text/javascript",
        mime_synonyms: &["application/javascript"],
        aliases: &[],
    },
];
