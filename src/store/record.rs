//! Persisted record types.

use std::fmt;

use crate::base::FormatSymbol;

/// Identifier of a stored [`Browser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrowserId(pub u32);

/// Identifier of a stored [`HardwarePlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlatformId(pub u32);

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "browser#{}", self.0)
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "platform#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Browser {
    pub id: BrowserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardwarePlatform {
    pub id: PlatformId,
    pub name: String,
}

/// Maps a User-Agent substring to the format its clients should receive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionRecord {
    /// Unique across the store.
    pub substring: String,
    pub format: FormatSymbol,
    pub browser: BrowserId,
    pub platform: PlatformId,
}

impl DetectionRecord {
    pub fn new(
        substring: impl Into<String>,
        format: impl Into<FormatSymbol>,
        browser: BrowserId,
        platform: PlatformId,
    ) -> Self {
        Self {
            substring: substring.into(),
            format: format.into(),
            browser,
            platform,
        }
    }

    /// True when this record's substring occurs verbatim in `user_agent`.
    pub fn matches(&self, user_agent: &str) -> bool {
        user_agent.contains(self.substring.as_str())
    }
}
