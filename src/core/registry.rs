//! Per-category registries of deferred loaders.
//!
//! Each category's registry maps canonical slugs to loaders. It is built
//! from the content source the first time the category is touched and is
//! read-only afterwards. Building one category never enumerates another.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use super::slug::slug_from_path;
use crate::adapters::{ContentSource, Loader, SourceEntry};
use crate::domain::Category;

/// Registry of one category: canonical slug -> deferred loader
pub struct CategoryRegistry {
    category: Category,
    entries: BTreeMap<String, RegistryEntry>,
}

struct RegistryEntry {
    path: String,
    loader: Arc<dyn Loader>,
}

impl CategoryRegistry {
    /// Build a registry from enumerated source entries.
    ///
    /// Keys come from [`slug_from_path`]. When two paths produce the same
    /// key the later entry replaces the earlier one. Paths whose stem is
    /// empty are skipped.
    pub fn build(
        category: Category,
        sources: impl IntoIterator<Item = SourceEntry>,
        extension: &str,
    ) -> Self {
        let mut entries = BTreeMap::new();

        for SourceEntry { path, loader } in sources {
            let slug = slug_from_path(&path, extension);
            if slug.is_empty() {
                warn!(%category, %path, "Skipping content source with an empty slug");
                continue;
            }
            if let Some(previous) = entries.insert(slug.clone(), RegistryEntry { path, loader }) {
                let current = entries.get(&slug).map(|e| e.path.as_str()).unwrap_or_default();
                warn!(
                    %category,
                    %slug,
                    replaced = %previous.path,
                    by = %current,
                    "Slug collision; later source wins"
                );
            }
        }

        Self { category, entries }
    }

    /// Category this registry belongs to
    pub fn category(&self) -> Category {
        self.category
    }

    /// Get the loader registered under `slug`
    pub fn get(&self, slug: &str) -> Option<&Arc<dyn Loader>> {
        self.entries.get(slug).map(|e| &e.loader)
    }

    /// Get the source path registered under `slug`
    pub fn source_path(&self, slug: &str) -> Option<&str> {
        self.entries.get(slug).map(|e| e.path.as_str())
    }

    /// Check if `slug` is a registry key
    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    /// Registry keys, in order
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(slug, loader)` pairs, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Loader>)> {
        self.entries.iter().map(|(slug, e)| (slug.as_str(), &e.loader))
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRegistry")
            .field("category", &self.category)
            .field("slugs", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Lazily-built registries for every category
pub struct Registry {
    source: Arc<dyn ContentSource>,
    categories: [OnceLock<CategoryRegistry>; 4],
}

impl Registry {
    /// Create a registry over a content source; nothing is enumerated yet
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    /// Create a registry over a shared content source
    pub fn from_source(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            categories: Default::default(),
        }
    }

    /// Create a registry and build every category up front
    pub fn eager(source: impl ContentSource + 'static) -> Self {
        let registry = Self::new(source);
        for category in Category::ALL {
            registry.category(category);
        }
        registry
    }

    /// Get a category's registry, building it on first access
    pub fn category(&self, category: Category) -> &CategoryRegistry {
        self.categories[category.index()].get_or_init(|| {
            let entries = self.source.enumerate(category);
            let registry = CategoryRegistry::build(category, entries, self.source.extension());
            debug!(
                %category,
                source = self.source.name(),
                entries = registry.len(),
                "Built category registry"
            );
            registry
        })
    }

    /// Check whether a category's registry has been built
    pub fn is_built(&self, category: Category) -> bool {
        self.categories[category.index()].get().is_some()
    }

    /// Registry keys of a category, in order
    pub fn slugs(&self, category: Category) -> Vec<String> {
        self.category(category).slugs().map(str::to_string).collect()
    }

    /// Name of the underlying content source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("source", &self.source.name())
            .field("categories", &self.categories)
            .finish()
    }
}
