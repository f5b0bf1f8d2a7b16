//! Core resolution logic.
//!
//! This module contains:
//! - Slug: Canonicalization and candidate spellings
//! - Registry: Per-category slug -> loader maps
//! - Resolver: Single resolution and bulk loading
//! - Routes: Page routes for registered resources

pub mod registry;
pub mod resolver;
pub mod routes;
pub mod slug;

// Re-export commonly used types
pub use registry::{CategoryRegistry, Registry};
pub use resolver::{ResolveError, ResourceResolver};
pub use routes::{resource_route, resource_routes};
pub use slug::{canonicalize, candidates, slug_from_path};
