//! Core abstractions for docview.
//!
//! This crate provides the pieces of the documentation viewer that do not
//! depend on any UI or routing layer.
//!
//! # Architecture
//!
//! docview-core defines:
//! - **Model**: `Document` and `Section`, the two-level documentation tree
//! - **Registry**: `DocumentRegistry`, the read-only list of versions
//! - **Resolver**: `resolve_page`, which maps a page id to its tree node
//! - **Content Cache**: memoized, bounded HTTP fetching of markdown pages
//! - **Error Types**: `DocsError` for setup failures, `LoadError` for the
//!   messages shown when a page cannot be loaded
//!
//! # Examples
//!
//! ```
//! use docview_core::{DocumentRegistry, StaticRegistry, resolve_page};
//!
//! let registry = StaticRegistry::from_json(r#"[
//!     { "version": "1.x", "sections": [
//!         { "url": "home" },
//!         { "url": "guide", "subSections": [{ "url": "install" }] }
//!     ] }
//! ]"#).unwrap();
//!
//! let doc = registry.find("1.x").unwrap();
//! let page = resolve_page(doc, Some("install")).unwrap();
//! assert_eq!(page.url, "install");
//! ```

pub mod cache;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use cache::{CacheOptions, ContentCache, FetchOutcome};
pub use error::{DocsError, LoadError, Result};
pub use model::{Document, Section};
pub use registry::{DocumentRegistry, StaticRegistry};
pub use resolver::resolve_page;
