//! Directory-backed content source.
//!
//! Documents live under `<root>/<category>/*.<extension>`. The directory is
//! enumerated when a category's registry is built; files are only read when
//! their loader is invoked.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use glob::Pattern;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ContentSource, LoadError, Loader, SourceEntry};
use crate::domain::Category;

/// Content source reading one folder per category
#[derive(Debug, Clone)]
pub struct DirectorySource {
    /// Content root containing the category folders
    root: PathBuf,

    /// Document suffix (default: "json")
    extension: String,
}

impl DirectorySource {
    /// Create a source rooted at `root` reading `.json` documents
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "json".to_string(),
        }
    }

    /// Use a different document suffix
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Get the content root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the folder holding one category's documents
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    fn pattern(&self, category: Category) -> String {
        let dir = self.category_dir(category);
        format!(
            "{}/*.{}",
            Pattern::escape(&dir.to_string_lossy()),
            Pattern::escape(&self.extension)
        )
    }
}

impl ContentSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn enumerate(&self, category: Category) -> Vec<SourceEntry> {
        let pattern = self.pattern(category);

        let paths = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(%category, %pattern, error = %e, "Invalid content glob pattern");
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        for path in paths {
            match path {
                Ok(path) if path.is_file() => {
                    let id = path.to_string_lossy().into_owned();
                    entries.push(SourceEntry::new(id, Arc::new(FileLoader::new(path))));
                }
                Ok(path) => {
                    debug!(path = %path.display(), "Skipping non-file content entry");
                }
                Err(e) => {
                    warn!(%category, error = %e, "Unreadable content entry");
                }
            }
        }

        debug!(%category, count = entries.len(), root = %self.root.display(), "Enumerated content directory");
        entries
    }
}

/// Loader reading and parsing one JSON document from disk
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the document path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Loader for FileLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| LoadError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }
}
