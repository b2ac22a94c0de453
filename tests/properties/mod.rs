//! Behavioral properties that must hold for any input.

mod tests_capability_properties;
