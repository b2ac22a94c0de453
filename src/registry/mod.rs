//! # Format Registry
//!
//! A runtime-mutable hierarchy of output formats. Every dynamically
//! registered format names a parent ("fallback") format; when nothing can be
//! rendered for a specific format, its ancestors are tried in ascending order.
//!
//! ```text
//! html            (built-in root)
//!  ├── mobile     application/vnd.wap.xhtml+xml
//!  │    └── s60   (inherits mobile's content type)
//!  └── msie       text/html
//! ```
//!
//! [`FormatRegistry`] is a plain owned value. Request-serving code shares it
//! through [`SharedRegistry`], which guards it with a read/write lock.

mod format;
mod shared;
mod table;

pub use format::{FormatNode, Registration};
pub use shared::SharedRegistry;
pub use table::FormatRegistry;
