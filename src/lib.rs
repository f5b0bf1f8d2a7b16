//! resource-loader - Slug-tolerant resolution of packaged content resources
//!
//! Resources (services, insurance plans, scholarship programs, daycares)
//! are JSON documents grouped by category. Two naming conventions coexist
//! for their files and URLs (`fes-eo` and `fesEo`); both resolve to the
//! same record.
//!
//! # Architecture
//!
//! - A content source enumerates `(path, loader)` pairs per category
//! - The registry keys each loader by the canonical slug of its path
//! - The resolver tries every candidate spelling of a requested slug and
//!   returns the first well-formed record as a `ResourceEnvelope`
//!
//! # Modules
//!
//! - `adapters`: Content sources and deferred loaders (directory, embedded)
//! - `core`: Slug canonicalization, registry, resolver, routes
//! - `domain`: Data structures (Category, ResourceEnvelope)
//! - `config`: Configuration layering
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Resolve one resource
//! resload show scholarships fesEo
//!
//! # List a category
//! resload list services
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ContentSource, DirectorySource, LoadError, Loader, SourceEntry, StaticSource};
pub use crate::core::{canonicalize, candidates, Registry, ResolveError, ResourceResolver};
pub use domain::{Category, ResourceEnvelope};
