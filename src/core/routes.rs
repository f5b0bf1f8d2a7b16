//! Page routes for registered resources.
//!
//! Every registry entry is served at `/resources/<category>/<slug>`. Route
//! listings feed sitemaps and link checks.

use super::registry::Registry;
use crate::domain::Category;

/// Route path of one resource
pub fn resource_route(category: Category, slug: &str) -> String {
    format!("/resources/{}/{}", category, slug)
}

/// Absolute URLs of every registered resource, category by category.
///
/// An empty `base_url` yields bare route paths.
pub fn resource_routes(registry: &Registry, base_url: &str) -> Vec<String> {
    let base = base_url.trim_end_matches('/');

    Category::ALL
        .iter()
        .flat_map(|&category| {
            registry
                .slugs(category)
                .into_iter()
                .map(move |slug| format!("{}{}", base, resource_route(category, &slug)))
        })
        .collect()
}
