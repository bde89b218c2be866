//! Platform-wide impact aggregates.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use donahub_core::types::{MaterialId, UserId};
use donahub_entity::material::{Material, MaterialCategory, MaterialStatus};
use donahub_entity::request::{Request, RequestStatus};

/// Delivered materials of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Category.
    pub category: MaterialCategory,
    /// Delivered materials in it.
    pub materials: usize,
    /// Rounded share of all delivered materials, 0 to 100.
    pub percentage: u32,
}

/// Completed donations picked up in one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityImpact {
    /// Pickup city as written on the material.
    pub city: String,
    /// Completed requests.
    pub projects: usize,
    /// Distinct NGOs served.
    pub organizations: usize,
}

/// Activity of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyDonations {
    /// `YYYY-MM`.
    pub month: String,
    /// Materials published.
    pub published: usize,
    /// Requests completed.
    pub completed: usize,
}

/// Aggregated impact of every donation on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Materials ever published and not deleted.
    pub materials_published: usize,
    /// Materials handed over.
    pub materials_delivered: usize,
    /// Completed requests.
    pub projects_helped: usize,
    /// Distinct NGOs with a completed request.
    pub organizations_helped: usize,
    /// Largest category first.
    pub material_distribution: Vec<CategoryShare>,
    /// Most projects first.
    pub geographic_impact: Vec<CityImpact>,
    /// Oldest month first.
    pub monthly_donations: Vec<MonthlyDonations>,
}

impl ImpactReport {
    /// Aggregate the given records. Completed requests whose material was
    /// deleted count towards the totals but not towards any city.
    pub fn compute(materials: &[Material], requests: &[Request]) -> Self {
        let completed: Vec<&Request> = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Completed)
            .collect();
        let delivered: Vec<&Material> = materials
            .iter()
            .filter(|m| m.status == MaterialStatus::Delivered)
            .collect();

        Self {
            materials_published: materials.len(),
            materials_delivered: delivered.len(),
            projects_helped: completed.len(),
            organizations_helped: completed
                .iter()
                .map(|r| r.ngo_id)
                .collect::<HashSet<_>>()
                .len(),
            material_distribution: distribution(&delivered),
            geographic_impact: by_city(materials, &completed),
            monthly_donations: by_month(materials, &completed),
        }
    }
}

fn distribution(delivered: &[&Material]) -> Vec<CategoryShare> {
    let mut counts: HashMap<MaterialCategory, usize> = HashMap::new();
    for material in delivered {
        *counts.entry(material.category).or_default() += 1;
    }
    let total = delivered.len();
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(category, materials)| CategoryShare {
            category,
            materials,
            percentage: ((materials * 100 + total / 2) / total) as u32,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.materials
            .cmp(&a.materials)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    shares
}

fn by_city(materials: &[Material], completed: &[&Request]) -> Vec<CityImpact> {
    let cities: HashMap<MaterialId, &str> = materials
        .iter()
        .map(|m| (m.id, m.pickup_location.city.as_str()))
        .collect();

    let mut grouped: BTreeMap<&str, (usize, HashSet<UserId>)> = BTreeMap::new();
    for request in completed {
        let Some(city) = cities.get(&request.material_id) else {
            continue;
        };
        let entry = grouped.entry(*city).or_default();
        entry.0 += 1;
        entry.1.insert(request.ngo_id);
    }

    let mut impact: Vec<CityImpact> = grouped
        .into_iter()
        .map(|(city, (projects, ngos))| CityImpact {
            city: city.to_string(),
            projects,
            organizations: ngos.len(),
        })
        .collect();
    // Stable, so equal counts stay alphabetical.
    impact.sort_by(|a, b| b.projects.cmp(&a.projects));
    impact
}

fn by_month(materials: &[Material], completed: &[&Request]) -> Vec<MonthlyDonations> {
    let mut months: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for material in materials {
        months
            .entry(material.created_at.format("%Y-%m").to_string())
            .or_default()
            .0 += 1;
    }
    for request in completed {
        months
            .entry(request.updated_at.format("%Y-%m").to_string())
            .or_default()
            .1 += 1;
    }
    months
        .into_iter()
        .map(|(month, (published, completed))| MonthlyDonations {
            month,
            published,
            completed,
        })
        .collect()
}
