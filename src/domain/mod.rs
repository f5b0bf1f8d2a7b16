//! Domain types for resource resolution.
//!
//! This module contains the core data structures:
//! - Category: The closed set of resource categories
//! - ResourceEnvelope: The merged record returned to callers

pub mod category;
pub mod envelope;

// Re-export commonly used types
pub use category::{Category, UnknownCategory};
pub use envelope::ResourceEnvelope;
