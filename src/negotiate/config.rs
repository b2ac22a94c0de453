use crate::base::{FormatSymbol, ROOT_FORMAT, WILDCARD_FORMAT};

/// Name reported for clients no detection record matches.
pub const GENERIC_BROWSER: &str = "Generic Browser";
/// Platform reported for clients no detection record matches.
pub const GENERIC_PLATFORM: &str = "Generic Hardware";

/// Settings for a [`Negotiator`](super::Negotiator).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NegotiatorConfig {
    /// Format for unknown clients and the preferred wildcard answer.
    pub root_format: FormatSymbol,
    /// Format a client sends to accept anything.
    pub wildcard_format: FormatSymbol,
    /// Maximum number of formats tried when resolving a resource.
    pub max_fallback_depth: usize,
    pub generic_browser: String,
    pub generic_platform: String,
}

impl Default for NegotiatorConfig {
    fn default() -> Self {
        Self {
            root_format: FormatSymbol::new_static(ROOT_FORMAT),
            wildcard_format: FormatSymbol::new_static(WILDCARD_FORMAT),
            max_fallback_depth: 10,
            generic_browser: GENERIC_BROWSER.to_string(),
            generic_platform: GENERIC_PLATFORM.to_string(),
        }
    }
}
