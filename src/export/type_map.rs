use regex::Regex;

use crate::base::FormatSymbol;

use super::error::TypeMapError;

/// Ordered `(format, pattern)` rules overriding a device's format symbol.
///
/// Large capability databases have thousands of devices but only a handful
/// of distinct views. The first rule whose pattern matches the device id
/// decides the format; without a match the device id is used as-is.
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    rules: Vec<(FormatSymbol, Regex)>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `(format, pattern)` pairs, keeping their order.
    pub fn from_patterns<I, S, P>(pairs: I) -> Result<Self, TypeMapError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<FormatSymbol>,
        P: AsRef<str>,
    {
        let mut map = Self::new();
        for (symbol, pattern) in pairs {
            map.push(symbol, pattern.as_ref())?;
        }
        Ok(map)
    }

    /// Parse a JSON array of `[format, pattern]` pairs.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, TypeMapError> {
        let pairs: Vec<(String, String)> = serde_json::from_str(json)?;
        Self::from_patterns(pairs)
    }

    /// Append a rule.
    pub fn push(&mut self, symbol: impl Into<FormatSymbol>, pattern: &str) -> Result<(), TypeMapError> {
        let symbol = symbol.into();
        let regex = Regex::new(pattern).map_err(|source| TypeMapError::Pattern {
            symbol: symbol.clone(),
            source,
        })?;
        self.rules.push((symbol, regex));
        Ok(())
    }

    /// The format of the first rule matching `device_id`.
    pub fn format_for(&self, device_id: &str) -> Option<&FormatSymbol> {
        self.rules
            .iter()
            .find(|(_, regex)| regex.is_match(device_id))
            .map(|(symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
