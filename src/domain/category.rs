//! Resource categories.
//!
//! The set is closed: every category maps to one content folder and one
//! route prefix (`/resources/<category>/<slug>`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a packaged content resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Therapy and support services
    Services,

    /// Insurance plans and funding programs
    Insurances,

    /// Scholarship programs
    Scholarships,

    /// Daycare resources
    Daycares,
}

/// Returned when a name is not one of the known categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resource category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category, in registry order
    pub const ALL: [Category; 4] = [
        Category::Services,
        Category::Insurances,
        Category::Scholarships,
        Category::Daycares,
    ];

    /// Folder / route name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Services => "services",
            Category::Insurances => "insurances",
            Category::Scholarships => "scholarships",
            Category::Daycares => "daycares",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Services => 0,
            Category::Insurances => 1,
            Category::Scholarships => 2,
            Category::Daycares => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(Category::Services),
            "insurances" => Ok(Category::Insurances),
            "scholarships" => Ok(Category::Scholarships),
            "daycares" => Ok(Category::Daycares),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
