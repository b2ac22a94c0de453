//! # mime-cascade
//!
//! Device-aware content negotiation: pick the output format for a request
//! from the client's User-Agent, then fall back through a hierarchy of
//! formats until something can be rendered.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! negotiate  → Detection, offers, fallback cascade, resource fallback
//!   ↓
//! export     → Capability tree → browser/platform/detection records
//!   ↓
//! store      → RecordStore trait, in-memory store
//!   ↓
//! capability → Logos line lexer, streaming importer, capability tree
//!   ↓
//! registry   → Hierarchical format registry (+ shared handle)
//!   ↓
//! base       → Primitives (FormatSymbol, built-in formats, id normalization)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::convert::Infallible;
//! use std::sync::Arc;
//!
//! use mime_cascade::negotiate::{Negotiator, RenderOutcome};
//! use mime_cascade::registry::{FormatNode, Registration, SharedRegistry};
//! use mime_cascade::store::{DetectionRecord, InMemoryRecordStore, RecordStore};
//!
//! let registry = SharedRegistry::new();
//! registry.register(Registration::new("mobile").with_mime("application/vnd.wap.xhtml+xml"));
//! registry.register(Registration::new("s60").with_parent("mobile"));
//!
//! let store = InMemoryRecordStore::new();
//! let browser = store.create_browser("Nokia").unwrap();
//! let platform = store.create_platform("Nokia N96").unwrap();
//! store
//!     .bulk_insert(&[DetectionRecord::new("Series60", "s60", browser, platform)], true)
//!     .unwrap();
//!
//! let negotiator = Negotiator::new(registry, Arc::new(store));
//! let client = negotiator.detect("Mozilla/5.0 (SymbianOS/9.3; Series60/3.2)").unwrap();
//! let selection = negotiator.select_format(None, None, &client);
//! assert_eq!(selection.chosen(), "s60");
//!
//! // Only a mobile template exists: s60 misses, the cascade moves on.
//! let offers = negotiator.offers(["mobile", "html"]);
//! let accepted = [selection.chosen().clone(), "mobile".into()];
//! let mut render = |format: &FormatNode| -> Result<RenderOutcome, Infallible> {
//!     Ok(if format.symbol == "mobile" {
//!         RenderOutcome::Rendered
//!     } else {
//!         RenderOutcome::ResourceNotFound
//!     })
//! };
//! let rendered = negotiator.respond(&accepted, &offers, &mut render).unwrap();
//! assert_eq!(rendered.mime, "application/vnd.wap.xhtml+xml");
//! ```

// ============================================================================
// MODULES (dependency order: base → registry → capability → store → export → negotiate)
// ============================================================================

/// Foundation types: FormatSymbol, built-in formats, identifier normalization
pub mod base;

/// Hierarchical format registry
pub mod registry;

/// Capability file lexer, importer and device tree
pub mod capability;

/// Record store interface and in-memory implementation
pub mod store;

/// Filter-and-flatten export from capability tree to record store
pub mod export;

/// Device detection, format selection and fallback cascades
pub mod negotiate;

// Re-export the types most callers need
pub use base::FormatSymbol;
pub use capability::{CapabilityFileImporter, CapabilityTree};
pub use export::{ExportOptions, ExportReport, Exporter};
pub use negotiate::{ClientMatch, NegotiateError, Negotiator, Offers, RenderOutcome, Renderer};
pub use registry::{FormatNode, FormatRegistry, Registration, SharedRegistry};
pub use store::{DetectionRecord, InMemoryRecordStore, RecordStore};
