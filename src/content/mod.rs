//! Content collaborator boundary.
//!
//! # Data Flow
//! ```text
//! content source (URL or file)
//!     → loader.rs (fetch, parse, validate)
//!     → on any failure: SiteContent::fallback()
//!     → ContentReady (watch channel) → page wiring renders sections
//!
//! HTML fragments
//!     → loader.rs (fetch) → security::sanitize::sanitize_fragment
//! ```
//!
//! # Design Decisions
//! - A failed load never leaves the page empty; the fallback set is always published
//! - Section bodies are opaque JSON owned by the renderer
//! - The submission controller does not depend on content

pub mod loader;
pub mod types;

pub use loader::{ContentLoadError, ContentLoader, ContentReady};
pub use types::{NavItem, SiteContent, SiteInfo};
