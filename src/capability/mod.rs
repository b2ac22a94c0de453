//! # Device Capabilities
//!
//! Device descriptors imported from a capability database file. Each device
//! names a fallback device and inherits every capability it does not set
//! itself:
//!
//! ```text
//! generic                      brand_name=""   mobile_browser=""
//!  └── nokia_generic_series60  brand_name="Nokia"
//!       └── nokia_n96_ver1     model_name="N96"
//! ```
//!
//! The importer streams the file line by line:
//!
//! ```text
//! file ──▶ Lexer (logos) ──▶ LineRecord::{Device, Capability} ──▶ CapabilityTree
//! ```

mod error;
mod importer;
mod lexer;
mod tree;

pub use error::ImportError;
pub use importer::{CapabilityFileImporter, ImportState};
pub use lexer::{Lexer, LineRecord, Token, TokenKind, parse_line, tokenize};
pub use tree::{CapabilityTree, DeviceEntry, DeviceNode};

#[cfg(test)]
mod tests;
