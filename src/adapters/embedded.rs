//! In-process content table.
//!
//! `StaticSource` is an explicit list of `(category, path, loader)` rows,
//! typically built from `include_str!` documents compiled into the binary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ContentSource, LoadError, Loader, SourceEntry};
use crate::domain::Category;

/// One row of an embedded content table: `(category, path, json)`
pub type EmbeddedDocument = (Category, &'static str, &'static str);

/// Content source backed by a registration-ordered table
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<(Category, SourceEntry)>,
}

impl StaticSource {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from embedded JSON documents
    pub fn from_table(table: &[EmbeddedDocument]) -> Self {
        table
            .iter()
            .fold(Self::new(), |source, (category, path, json)| {
                source.with_json(*category, *path, *json)
            })
    }

    /// Register an arbitrary loader
    pub fn with_loader(
        mut self,
        category: Category,
        path: impl Into<String>,
        loader: Arc<dyn Loader>,
    ) -> Self {
        self.rows.push((category, SourceEntry::new(path, loader)));
        self
    }

    /// Register a JSON document, parsed when loaded
    pub fn with_json(self, category: Category, path: impl Into<String>, json: &'static str) -> Self {
        let path = path.into();
        let loader = JsonTextLoader::new(path.clone(), json);
        self.with_loader(category, path, Arc::new(loader))
    }

    /// Register an already-built document
    pub fn with_value(self, category: Category, path: impl Into<String>, value: Value) -> Self {
        self.with_loader(category, path, Arc::new(ValueLoader(value)))
    }

    /// Number of rows across all categories
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ContentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn enumerate(&self, category: Category) -> Vec<SourceEntry> {
        self.rows
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}

/// Loader parsing a JSON document held in memory
#[derive(Debug, Clone)]
pub struct JsonTextLoader {
    path: String,
    json: &'static str,
}

impl JsonTextLoader {
    pub fn new(path: impl Into<String>, json: &'static str) -> Self {
        Self {
            path: path.into(),
            json,
        }
    }
}

#[async_trait]
impl Loader for JsonTextLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        serde_json::from_str(self.json).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Loader returning a fixed document
#[derive(Debug, Clone)]
pub struct ValueLoader(pub Value);

#[async_trait]
impl Loader for ValueLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        Ok(self.0.clone())
    }
}
