//! Catalog search filters.

use serde::{Deserialize, Serialize};

use donahub_entity::material::{Material, MaterialCategory};

/// Optional criteria narrowing a catalog listing. Empty fields match
/// everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialFilter {
    /// Pickup city, compared ignoring case.
    #[serde(default)]
    pub city: Option<String>,
    /// Material category.
    #[serde(default)]
    pub category: Option<MaterialCategory>,
    /// Text searched in title and description, ignoring case.
    #[serde(default)]
    pub query: Option<String>,
}

impl MaterialFilter {
    /// Whether `material` satisfies every set criterion.
    pub fn matches(&self, material: &Material) -> bool {
        let city_ok = self.city.as_deref().is_none_or(|city| {
            material.pickup_location.city.trim().to_lowercase() == city.trim().to_lowercase()
        });
        let category_ok = self.category.is_none_or(|c| material.category == c);
        let query_ok = self.query.as_deref().is_none_or(|q| {
            let q = q.trim().to_lowercase();
            q.is_empty()
                || material.title.to_lowercase().contains(&q)
                || material.description.to_lowercase().contains(&q)
        });
        city_ok && category_ok && query_ok
    }
}
