//! # Export
//!
//! Projects a [`CapabilityTree`](crate::capability::CapabilityTree) into the
//! record store:
//!
//! ```text
//! CapabilityTree ──filter──▶ browsers / hardware platforms ──▶ RecordStore
//!                        └─▶ detection records (batched)   ──▶ RecordStore
//! ```
//!
//! Failures are collected in [`ExportReport::exceptions`] so a long import
//! always runs to completion.

mod error;
mod exporter;
mod formats;
mod type_map;

pub use error::{ExportError, TypeMapError};
pub use exporter::{
    BRAND_CAPABILITY, BROWSER_CAPABILITY, ExportOptions, ExportReport, Exporter, MODEL_CAPABILITY,
};
pub use formats::register_device_formats;
pub use type_map::TypeMap;

#[cfg(test)]
mod tests;
