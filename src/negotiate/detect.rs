use crate::base::FormatSymbol;
use crate::registry::FormatRegistry;
use crate::store::{DetectionRecord, RecordStore, StoreError};

use super::config::NegotiatorConfig;

/// The result of matching a client's detection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMatch {
    /// A stored record matched. `format` is the record's format, or the
    /// root format when the record names one that is not registered.
    Device {
        record: DetectionRecord,
        format: FormatSymbol,
    },
    /// Nothing matched; the client gets the root format.
    Generic { format: FormatSymbol },
}

impl ClientMatch {
    /// Bind a store lookup result to the registry.
    pub fn resolve(
        registry: &FormatRegistry,
        config: &NegotiatorConfig,
        record: Option<DetectionRecord>,
    ) -> Self {
        match record {
            Some(record) => {
                let format = if registry.exists(&record.format) {
                    record.format.clone()
                } else {
                    tracing::warn!(
                        "detection '{}' names unknown format '{}', using '{}'",
                        record.substring,
                        record.format,
                        config.root_format
                    );
                    config.root_format.clone()
                };
                ClientMatch::Device { record, format }
            }
            None => ClientMatch::Generic {
                format: config.root_format.clone(),
            },
        }
    }

    pub fn format(&self) -> &FormatSymbol {
        match self {
            ClientMatch::Device { format, .. } | ClientMatch::Generic { format } => format,
        }
    }

    pub fn record(&self) -> Option<&DetectionRecord> {
        match self {
            ClientMatch::Device { record, .. } => Some(record),
            ClientMatch::Generic { .. } => None,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, ClientMatch::Generic { .. })
    }

    pub fn browser_name<S>(&self, store: &S, config: &NegotiatorConfig) -> Result<String, StoreError>
    where
        S: RecordStore + ?Sized,
    {
        Ok(match self.record() {
            Some(record) => store.browser_name(record.browser)?,
            None => None,
        }
        .unwrap_or_else(|| config.generic_browser.clone()))
    }

    pub fn platform_name<S>(&self, store: &S, config: &NegotiatorConfig) -> Result<String, StoreError>
    where
        S: RecordStore + ?Sized,
    {
        Ok(match self.record() {
            Some(record) => store.platform_name(record.platform)?,
            None => None,
        }
        .unwrap_or_else(|| config.generic_platform.clone()))
    }

    /// `"{browser} on {platform}"`.
    pub fn full_name<S>(&self, store: &S, config: &NegotiatorConfig) -> Result<String, StoreError>
    where
        S: RecordStore + ?Sized,
    {
        Ok(format!(
            "{} on {}",
            self.browser_name(store, config)?,
            self.platform_name(store, config)?
        ))
    }
}

/// Find the client match for `user_agent`.
pub fn detect<S>(
    store: &S,
    registry: &FormatRegistry,
    config: &NegotiatorConfig,
    user_agent: &str,
) -> Result<ClientMatch, StoreError>
where
    S: RecordStore + ?Sized,
{
    let record = store.find_longest_matching_detection(user_agent)?;
    let client = ClientMatch::resolve(registry, config, record);
    tracing::debug!("detected '{}' for UA '{}'", client.format(), user_agent);
    Ok(client)
}
