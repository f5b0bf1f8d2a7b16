//! The record handed back to rendering and listing callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::Category;

/// A resolved resource: `{slug, category, ...payload}`
///
/// `slug` and `category` always win over same-named payload fields; those
/// fields are dropped when the envelope is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEnvelope {
    /// Slug the resource was found under (a registry key)
    pub slug: String,

    /// Category the resource belongs to
    pub category: Category,

    /// Category-specific fields (title, description, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ResourceEnvelope {
    /// Build an envelope from a matched slug and an unwrapped payload
    pub fn new(slug: impl Into<String>, category: Category, mut payload: Map<String, Value>) -> Self {
        payload.remove("slug");
        payload.remove("category");

        Self {
            slug: slug.into(),
            category,
            payload,
        }
    }

    /// Get a payload field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// Get a payload field if it is a string
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(Value::as_str)
    }

    /// The `title` field, when present
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Merge into a single JSON object
    pub fn into_value(self) -> Value {
        let mut object = Map::with_capacity(self.payload.len() + 2);
        object.insert("slug".to_string(), Value::String(self.slug));
        object.insert(
            "category".to_string(),
            Value::String(self.category.as_str().to_string()),
        );
        object.extend(self.payload);
        Value::Object(object)
    }
}
