//! Content source interfaces.
//!
//! A content source enumerates, per category, the packaged documents it
//! knows about as `(path, loader)` pairs. Loaders are deferred: nothing is
//! read until the resolver asks for a specific entry.

pub mod directory;
pub mod embedded;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::Category;

// Re-export the built-in sources
pub use directory::{DirectorySource, FileLoader};
pub use embedded::{JsonTextLoader, StaticSource, ValueLoader};

/// Wrapper key a document may nest its record under
pub const DEFAULT_WRAPPER_KEY: &str = "default";

/// Errors raised by a deferred loader
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Loader failed: {0}")]
    Failed(String),
}

/// Deferred producer of one resource's raw content
#[async_trait]
pub trait Loader: Send + Sync {
    /// Produce the raw document. May be invoked any number of times.
    async fn load(&self) -> Result<Value, LoadError>;
}

/// One enumerated document of a category
#[derive(Clone)]
pub struct SourceEntry {
    /// Identifying path (its final segment names the resource)
    pub path: String,

    /// Deferred loader for the document
    pub loader: Arc<dyn Loader>,
}

impl SourceEntry {
    pub fn new(path: impl Into<String>, loader: Arc<dyn Loader>) -> Self {
        Self {
            path: path.into(),
            loader,
        }
    }
}

impl std::fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Trait for content source providers
pub trait ContentSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Data-format suffix of the source's documents (without the dot)
    fn extension(&self) -> &str {
        "json"
    }

    /// Enumerate the documents of one category, in registration order.
    ///
    /// Must not invoke any loader.
    fn enumerate(&self, category: Category) -> Vec<SourceEntry>;
}

/// Unwrap a raw document into a record.
///
/// A single-key object `{wrapper_key: inner}` is unwrapped exactly once. An
/// object with other keys beside `wrapper_key` is already the record. Returns
/// `None` when the result is not a JSON object (null, primitives, arrays).
pub fn unwrap_payload(raw: Value, wrapper_key: &str) -> Option<Map<String, Value>> {
    let data = match raw {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(wrapper_key) => {
            map.remove(wrapper_key)?
        }
        other => other,
    };

    match data {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
