use crate::base::FormatSymbol;

use super::config::NegotiatorConfig;
use super::detect::ClientMatch;

/// The format a request is served in.
///
/// An explicit format (e.g. a URL extension) always wins. Otherwise a
/// request for nothing in particular, for anything, or for the root format
/// is served in the client's detected format, and any other request keeps
/// what it asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSelection {
    chosen: FormatSymbol,
    explicit: Option<FormatSymbol>,
}

impl FormatSelection {
    pub fn new(
        config: &NegotiatorConfig,
        requested: Option<&str>,
        explicit: Option<&str>,
        client: &ClientMatch,
    ) -> Self {
        let explicit = explicit.filter(|s| !s.is_empty()).map(FormatSymbol::new);
        let chosen = match (&explicit, requested.filter(|s| !s.is_empty())) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(requested))
                if requested != config.wildcard_format && requested != config.root_format =>
            {
                FormatSymbol::new(requested)
            }
            (None, _) => client.format().clone(),
        };
        Self { chosen, explicit }
    }

    pub fn chosen(&self) -> &FormatSymbol {
        &self.chosen
    }

    pub fn explicit(&self) -> Option<&FormatSymbol> {
        self.explicit.as_ref()
    }

    /// True when the request is being served in `symbol`, either as the
    /// chosen format or as the explicitly requested one.
    pub fn is_in_view(&self, symbol: &str) -> bool {
        self.chosen == symbol || self.explicit.as_ref().is_some_and(|e| e == symbol)
    }
}
