//! Pickup location and schedule value objects.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where the material can be collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    /// Street address of the site.
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    /// City, matched against volunteer coverage zones.
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    /// Optional map position.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// On-site contact.
    #[serde(default)]
    pub contact_person: String,
    /// On-site contact phone.
    #[serde(default)]
    pub contact_phone: String,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// When the site accepts pickups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupSchedule {
    /// Weekdays, free text.
    #[serde(default)]
    pub days: Vec<String>,
    /// Opening time, `HH:MM`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Closing time, `HH:MM`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Access notes for the driver.
    #[serde(default)]
    pub special_instructions: Option<String>,
}
