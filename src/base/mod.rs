//! Foundation types for the negotiation toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FormatSymbol`] - Short, cheap-to-clone format names (`html`, `mobile`, ...)
//! - [`BuiltinFormat`] - The fixed formats that live outside the dynamic registry
//! - Identifier normalization for device ids and detection strings
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod ident;

pub use constants::{BUILTIN_FORMATS, BuiltinFormat, DEFAULT_MIME, ROOT_FORMAT, WILDCARD_FORMAT};
pub use ident::{normalize_detection, normalize_device_id};

/// A format name such as `html`, `mobile` or `nokia_n96_ver1`.
///
/// Symbols are short and cloned on every lookup, so they use an inline
/// small-string representation.
pub type FormatSymbol = smol_str::SmolStr;
