#![warn(missing_docs)]

//! Strip elements from HTML documents without damaging embedded
//! template syntax.
//!
//! Template engines put constructs like `{% if user %}` straight into
//! markup. An HTML parser is free to move, split or escape that text, so a
//! plain parse and reserialize can corrupt the template. This crate hides
//! every configured template span inside an opaque comment before the
//! document is parsed, removes the unwanted elements from the tree, and puts
//! the original bytes back once the tree has been serialized.
//!
//! # Basic usage
//!
//! ```rust
//! use html_strip::{strip_html, Configuration};
//!
//! let html = br#"<p>{% if x %}hi{% endif %}</p><script>alert(1)</script>"#;
//! let out = strip_html(html, &Configuration::default()).unwrap();
//! let out = String::from_utf8(out).unwrap();
//!
//! assert!(out.contains("<p>{% if x %}hi{% endif %}</p>"));
//! assert!(!out.contains("<script>"));
//! ```

/// Placeholder comment encoding.
pub mod codec;
/// Configuration for a strip run.
pub mod configuration;
/// Error types.
pub mod error;
/// The protect, strip and restore pipeline.
pub mod pipeline;
/// Hide template spans behind placeholders.
pub mod protect;
/// Bring template spans back from placeholders.
pub mod restore;
/// Element removal on the parsed tree.
pub mod strip;

pub use configuration::{Configuration, TagPair};
pub use error::{ConfigError, Error, Result};
pub use pipeline::{strip_html, Pipeline};
