//! Resource resolution and bulk loading.
//!
//! `resolve` tries every candidate spelling of a slug and recovers from
//! per-candidate failures; only exhaustion reaches the caller, as an
//! absence. `load_all` has no such isolation: one failing entry fails the
//! whole listing.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, error, instrument, warn};

use super::registry::Registry;
use super::slug::candidates;
use crate::adapters::{unwrap_payload, DirectorySource, LoadError, Loader, DEFAULT_WRAPPER_KEY};
use crate::config::ResolvedConfig;
use crate::domain::{Category, ResourceEnvelope, UnknownCategory};

/// Resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("Missing resource: {category} {slug}")]
    NotFound { category: Category, slug: String },

    #[error("Failed to load '{slug}': {source}")]
    Load {
        slug: String,
        #[source]
        source: LoadError,
    },

    #[error("Resource '{slug}' is not a structured record")]
    Malformed { slug: String },

    #[error("Loading '{slug}' timed out after {after:?}")]
    Timeout { slug: String, after: Duration },

    #[error("Bulk load of {category} failed at '{slug}': {source}")]
    BulkLoad {
        category: Category,
        slug: String,
        #[source]
        source: Box<ResolveError>,
    },

    #[error("Bulk load task for {category} did not complete: {message}")]
    Join { category: Category, message: String },
}

/// Resolves `(category, slug)` pairs against a registry
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    /// Shared, read-only registry
    registry: Arc<Registry>,

    /// Key a document may nest its record under
    wrapper_key: String,

    /// Deadline for a single loader invocation (default: none)
    load_timeout: Option<Duration>,
}

impl ResourceResolver {
    /// Create a resolver over a registry
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            wrapper_key: DEFAULT_WRAPPER_KEY.to_string(),
            load_timeout: None,
        }
    }

    /// Create a resolver reading the configured content directory
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let source = DirectorySource::new(&config.content_root).with_extension(&config.extension);
        let resolver = Self::new(Arc::new(Registry::new(source)))
            .with_wrapper_key(config.wrapper_key.clone());

        match config.load_timeout {
            Some(after) => resolver.with_load_timeout(after),
            None => resolver,
        }
    }

    /// Unwrap documents nested under `key` instead of `default`
    pub fn with_wrapper_key(mut self, key: impl Into<String>) -> Self {
        self.wrapper_key = key.into();
        self
    }

    /// Bound every loader invocation by `after`
    pub fn with_load_timeout(mut self, after: Duration) -> Self {
        self.load_timeout = Some(after);
        self
    }

    /// Get the underlying registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve a resource, logging and returning `None` when it is unavailable
    #[instrument(skip(self))]
    pub async fn resolve(&self, category: &str, slug: &str) -> Option<ResourceEnvelope> {
        match self.try_resolve(category, slug).await {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                error!(%category, %slug, error = %e, "Resource not resolved");
                None
            }
        }
    }

    /// Resolve a resource, reporting why it is unavailable
    pub async fn try_resolve(&self, category: &str, slug: &str) -> Result<ResourceEnvelope, ResolveError> {
        let category: Category = category.parse()?;
        self.resolve_in(category, slug).await
    }

    /// Resolve a resource of a known category.
    ///
    /// Candidates are tried in order; a failing or malformed candidate is a
    /// miss and the next one is tried.
    pub async fn resolve_in(&self, category: Category, slug: &str) -> Result<ResourceEnvelope, ResolveError> {
        let registry = self.registry.category(category);

        for candidate in candidates(slug) {
            let Some(loader) = registry.get(&candidate) else {
                continue;
            };

            match self.load_candidate(&candidate, Arc::clone(loader)).await {
                Ok(payload) => return Ok(ResourceEnvelope::new(candidate, category, payload)),
                Err(e) => {
                    debug!(%category, %candidate, error = %e, "Candidate miss");
                }
            }
        }

        Err(ResolveError::NotFound {
            category,
            slug: slug.to_string(),
        })
    }

    /// Load every entry of a category.
    ///
    /// An unknown category yields an empty list; any failing entry fails the
    /// whole call.
    #[instrument(skip(self))]
    pub async fn load_all(&self, category: &str) -> Result<Vec<ResourceEnvelope>, ResolveError> {
        let Ok(category) = category.parse::<Category>() else {
            debug!(%category, "Unknown category; nothing to list");
            return Ok(Vec::new());
        };

        self.load_all_in(category).await.inspect_err(|e| {
            error!(%category, error = %e, "Bulk load failed");
        })
    }

    /// Load every entry of a known category concurrently.
    ///
    /// Envelopes come back in registry order, each keyed by its registry
    /// slug verbatim. The first failure aborts the remaining loads.
    pub async fn load_all_in(&self, category: Category) -> Result<Vec<ResourceEnvelope>, ResolveError> {
        let registry = self.registry.category(category);
        let mut tasks = JoinSet::new();

        for (index, (slug, loader)) in registry.iter().enumerate() {
            let slug = slug.to_string();
            let loader = Arc::clone(loader);
            let load_timeout = self.load_timeout;

            tasks.spawn(async move {
                let result = invoke(&slug, loader, load_timeout).await;
                (index, slug, result)
            });
        }

        let mut loaded: Vec<Option<ResourceEnvelope>> = (0..registry.len()).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            let (index, slug, result) = joined.map_err(|e| ResolveError::Join {
                category,
                message: e.to_string(),
            })?;

            let raw = result.map_err(|source| ResolveError::BulkLoad {
                category,
                slug: slug.clone(),
                source: Box::new(source),
            })?;

            let payload = unwrap_payload(raw, &self.wrapper_key).unwrap_or_else(|| {
                warn!(%category, %slug, "Entry is not a structured record; listing it without fields");
                Map::new()
            });

            loaded[index] = Some(ResourceEnvelope::new(slug, category, payload));
        }

        Ok(loaded.into_iter().flatten().collect())
    }

    async fn load_candidate(
        &self,
        slug: &str,
        loader: Arc<dyn Loader>,
    ) -> Result<Map<String, Value>, ResolveError> {
        let raw = invoke(slug, loader, self.load_timeout).await?;

        unwrap_payload(raw, &self.wrapper_key).ok_or_else(|| ResolveError::Malformed {
            slug: slug.to_string(),
        })
    }
}

/// Invoke a loader once, under an optional deadline
async fn invoke(
    slug: &str,
    loader: Arc<dyn Loader>,
    load_timeout: Option<Duration>,
) -> Result<Value, ResolveError> {
    let result = match load_timeout {
        Some(after) => tokio::time::timeout(after, loader.load())
            .await
            .map_err(|_| ResolveError::Timeout {
                slug: slug.to_string(),
                after,
            })?,
        None => loader.load().await,
    };

    result.map_err(|source| ResolveError::Load {
        slug: slug.to_string(),
        source,
    })
}
